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

//! Payment instruction, the input of the IPS encoder.

use crate::error::EncodingError;
use crate::payload::{self, IpsPayload};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything needed to print one IPS QR payment code.
///
/// Built from a stored payment record right before rendering and dropped
/// afterwards. Encoding borrows it and never modifies it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInstruction {
    /// Payee name, first line of the recipient field.
    pub recipient_name: String,
    /// Payee address or city, second line of the recipient field.
    #[serde(default)]
    pub recipient_location: Option<String>,
    /// Account in local notation, e.g. `840-4848-37`.
    pub account_number: String,
    /// Amount in RSD.
    pub amount: Decimal,
    /// Three-digit payment code; `189` when absent.
    #[serde(default)]
    pub payment_code: Option<String>,
    /// Human-readable purpose; only the first 35 characters are encoded.
    #[serde(default)]
    pub payment_purpose: String,
    /// Reference model; `97` when absent.
    #[serde(default)]
    pub model: Option<String>,
    /// Reference number, may contain dashes and spaces.
    #[serde(default)]
    pub reference_number: String,
}

impl PaymentInstruction {
    pub fn new(
        recipient_name: impl Into<String>,
        account_number: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            recipient_name: recipient_name.into(),
            account_number: account_number.into(),
            amount,
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.recipient_location = Some(location.into());
        self
    }

    pub fn with_payment_code(mut self, code: impl Into<String>) -> Self {
        self.payment_code = Some(code.into());
        self
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.payment_purpose = purpose.into();
        self
    }

    pub fn with_reference(
        mut self,
        model: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        self.model = Some(model.into());
        self.reference_number = reference.into();
        self
    }

    /// Encodes the instruction. See [`payload::encode`].
    pub fn encode(&self) -> Result<IpsPayload, EncodingError> {
        payload::encode(self)
    }
}
