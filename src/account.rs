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

//! Bank account number normalization.
//!
//! Serbian accounts are written as `BBB-AAAAAAAAAAAAA-CC` (bank code, account,
//! check digits) and the middle segment is often shortened by dropping leading
//! zeros, e.g. `840-4848-37`. The IPS payload needs the full 18-digit form.
//!
//! # Example
//!
//! ```
//! use ips_qr::AccountNumber;
//!
//! let account = AccountNumber::parse("840-4848-37").unwrap();
//! assert_eq!(account.as_str(), "840000000000484837");
//! ```

use crate::base::strip_separators;
use crate::error::FormatError;
use serde::Serialize;
use std::fmt;

/// Number of digits in a normalized account number.
pub const ACCOUNT_LENGTH: usize = 18;

const BANK_CODE_LENGTH: usize = 3;

/// An account number in canonical 18-digit form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Normalizes a raw account number.
    ///
    /// # Errors
    ///
    /// - [`FormatError::AccountTooShort`] - fewer than 3 characters after stripping.
    /// - [`FormatError::AccountNotNumeric`] - anything other than digits remains.
    /// - [`FormatError::AccountTooLong`] - more than 18 digits.
    pub fn parse(raw: &str) -> Result<Self, FormatError> {
        normalize_account(raw).map(AccountNumber)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The three-digit bank code.
    pub fn bank_code(&self) -> &str {
        &self.0[..BANK_CODE_LENGTH]
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strips separators and pads the account segment to produce 18 digits.
///
/// An input that is already 18 characters long after stripping is taken as
/// canonical. Otherwise the first three digits are the bank code and the rest
/// is left-padded with zeros to 15 digits.
pub fn normalize_account(raw: &str) -> Result<String, FormatError> {
    let clean = strip_separators(raw);
    let length = clean.chars().count();

    if length < BANK_CODE_LENGTH {
        return Err(FormatError::AccountTooShort { length });
    }
    if !clean.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::AccountNotNumeric);
    }
    if length > ACCOUNT_LENGTH {
        return Err(FormatError::AccountTooLong { length });
    }
    if length == ACCOUNT_LENGTH {
        return Ok(clean);
    }

    // All ASCII from here on, byte slicing is safe.
    let (bank_code, account) = clean.split_at(BANK_CODE_LENGTH);
    let width = ACCOUNT_LENGTH - BANK_CODE_LENGTH;
    let normalized = format!("{bank_code}{account:0>width$}");

    debug_assert_eq!(normalized.len(), ACCOUNT_LENGTH);
    Ok(normalized)
}
