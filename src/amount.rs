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

//! Amount formatting for the `I` payload field.
//!
//! The field is the currency code followed by the amount with a comma as
//! decimal separator and exactly two decimals: `RSD3596,13`.

use crate::error::ValidationError;
use rust_decimal::{Decimal, RoundingStrategy};

/// ISO 4217 code of the only supported currency.
pub const CURRENCY: &str = "RSD";

/// Maximum length of the whole `I` value, currency code included.
pub const AMOUNT_FIELD_LENGTH: usize = 18;

/// Formats an amount as `RSD<integer>,<2 decimals>`.
///
/// Rounds half-up to two decimal places. No thousands separators are emitted.
///
/// # Errors
///
/// - [`ValidationError::NegativeAmount`] - the amount is below zero.
/// - [`ValidationError::AmountTooLarge`] - the result exceeds 18 characters.
pub fn format_amount(amount: Decimal) -> Result<String, ValidationError> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount(amount));
    }

    // abs() clears the sign of a negative zero.
    let mut rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let field = format!("{CURRENCY}{}", rounded.to_string().replace('.', ","));
    if field.len() > AMOUNT_FIELD_LENGTH {
        return Err(ValidationError::AmountTooLarge(amount));
    }
    Ok(field)
}
