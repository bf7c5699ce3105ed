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

//! Error types for payload encoding, payment records and rendering.
//!
//! The encoder distinguishes structural problems ([`FormatError`]) from
//! semantic ones ([`ValidationError`]); the assembler wraps both in
//! [`EncodingError`], which is the only error a renderer has to handle.

use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

/// Caller-supplied payload field, used to point at the offending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RecipientName,
    RecipientLocation,
    AccountNumber,
    PaymentCode,
    PaymentPurpose,
    Model,
    ReferenceNumber,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::RecipientName => "recipient name",
            Field::RecipientLocation => "recipient location",
            Field::AccountNumber => "account number",
            Field::PaymentCode => "payment code",
            Field::PaymentPurpose => "payment purpose",
            Field::Model => "model",
            Field::ReferenceNumber => "reference number",
        };
        f.write_str(name)
    }
}

/// Structurally malformed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Fewer than the three bank-code digits remain after stripping separators
    #[error("account number too short ({length} characters, need at least 3)")]
    AccountTooShort { length: usize },

    /// Account number contains something other than digits, dashes and spaces
    #[error("account number contains non-digit characters")]
    AccountNotNumeric,

    /// Account part does not fit into 15 digits after the bank code
    #[error("account number too long ({length} digits, at most 18)")]
    AccountTooLong { length: usize },

    /// Payment code is not exactly three digits
    #[error("payment code must be 3 digits, got {0:?}")]
    InvalidPaymentCode(String),
}

/// Semantically invalid input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Payment instructions never carry a negative amount
    #[error("negative amount: {0}")]
    NegativeAmount(Decimal),

    /// Formatted amount exceeds the IPS field length
    #[error("amount {0} does not fit into the amount field")]
    AmountTooLarge(Decimal),

    /// Recipient name is empty
    #[error("recipient name is required")]
    MissingRecipient,

    /// Field separator found in caller-supplied text
    #[error("{0} contains the '|' field separator")]
    ForbiddenSeparator(Field),
}

/// Failure to assemble a payload. No partial payload is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("cannot encode payment: {0}")]
    Format(#[from] FormatError),

    #[error("cannot encode payment: {0}")]
    Validation(#[from] ValidationError),
}

/// Payment record state errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Payment was already marked as paid
    #[error("payment already marked as paid")]
    AlreadyPaid,
}

/// QR image rendering errors.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The QR library could not build a symbol for the payload
    #[error("qr generation failed: {0}")]
    Qr(String),

    /// Writing the image failed
    #[error("cannot write image: {0}")]
    Io(String),
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Color is not a `#rrggbb` hex string
    #[error("invalid color {0:?} (expected #rrggbb)")]
    InvalidColor(String),
}
