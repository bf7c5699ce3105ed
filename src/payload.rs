// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! IPS QR payload assembly.
//!
//! The payload is a sequence of `TAG:value` pairs joined by `|` in the fixed
//! order required by the NBS IPS QR standard:
//!
//! ```text
//! K:PR|V:01|C:1|R:<account>|N:<recipient>|I:<amount>|SF:<code>[|S:<purpose>][|RO:<reference>]
//! ```
//!
//! `S` and `RO` are omitted when empty. Any invalid input fails the whole
//! payload; nothing is emitted best-effort.
//!
//! # Example
//!
//! ```
//! use ips_qr::PaymentInstruction;
//! use rust_decimal_macros::dec;
//!
//! let payload = PaymentInstruction::new("Poreska uprava", "840-0000711122843-32", dec!(5000))
//!     .with_location("Beograd")
//!     .with_payment_code("189")
//!     .with_purpose("Uplata poreza")
//!     .with_reference("97", "7100790000005418408")
//!     .encode()
//!     .unwrap();
//!
//! assert_eq!(
//!     payload.as_str(),
//!     "K:PR|V:01|C:1|R:840000071112284332|N:Poreska uprava\r\nBeograd|I:RSD5000,00|SF:189|S:Uplata poreza|RO:977100790000005418408"
//! );
//! ```

use crate::account::AccountNumber;
use crate::amount::format_amount;
use crate::error::{EncodingError, Field, ValidationError};
use crate::fields::{
    SEPARATOR, ensure_no_separator, payment_code_field, purpose_field, recipient_field,
};
use crate::instruction::PaymentInstruction;
use crate::reference::reference_field;
use serde::Serialize;
use std::fmt;
use std::fmt::Write as _;

/// Identification code: payment order.
pub const IDENTIFICATION_CODE: &str = "PR";

/// Protocol version.
pub const VERSION: &str = "01";

/// Character set: UTF-8.
pub const CHARACTER_SET: &str = "1";

/// A complete, valid IPS QR payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IpsPayload(String);

impl IpsPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for IpsPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IpsPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Assembles the IPS payload for `instruction`.
///
/// # Errors
///
/// - [`ValidationError::ForbiddenSeparator`] - a text field contains `|`.
/// - [`ValidationError::MissingRecipient`] - the recipient name is blank.
/// - [`ValidationError::NegativeAmount`] / [`ValidationError::AmountTooLarge`].
/// - [`crate::FormatError`] - malformed account number or payment code.
pub fn encode(instruction: &PaymentInstruction) -> Result<IpsPayload, EncodingError> {
    check_separators(instruction)?;

    if instruction.recipient_name.trim().is_empty() {
        return Err(ValidationError::MissingRecipient.into());
    }

    let account = AccountNumber::parse(&instruction.account_number)?;
    let amount = format_amount(instruction.amount)?;
    let payment_code = payment_code_field(instruction.payment_code.as_deref())?;
    let recipient = recipient_field(
        &instruction.recipient_name,
        instruction.recipient_location.as_deref(),
    );
    let purpose = purpose_field(&instruction.payment_purpose);
    let reference = reference_field(
        instruction.model.as_deref(),
        &instruction.reference_number,
    );

    let mut payload = format!(
        "K:{IDENTIFICATION_CODE}|V:{VERSION}|C:{CHARACTER_SET}|R:{account}|N:{recipient}|I:{amount}|SF:{payment_code}"
    );
    // Writing into a String cannot fail.
    if !purpose.is_empty() {
        let _ = write!(payload, "{SEPARATOR}S:{purpose}");
    }
    if let Some(reference) = reference {
        let _ = write!(payload, "{SEPARATOR}RO:{reference}");
    }

    tracing::debug!(%payload, "encoded IPS payload");
    Ok(IpsPayload(payload))
}

fn check_separators(instruction: &PaymentInstruction) -> Result<(), ValidationError> {
    ensure_no_separator(Field::RecipientName, &instruction.recipient_name)?;
    if let Some(location) = &instruction.recipient_location {
        ensure_no_separator(Field::RecipientLocation, location)?;
    }
    ensure_no_separator(Field::AccountNumber, &instruction.account_number)?;
    if let Some(code) = &instruction.payment_code {
        ensure_no_separator(Field::PaymentCode, code)?;
    }
    ensure_no_separator(Field::PaymentPurpose, &instruction.payment_purpose)?;
    if let Some(model) = &instruction.model {
        ensure_no_separator(Field::Model, model)?;
    }
    ensure_no_separator(Field::ReferenceNumber, &instruction.reference_number)
}
