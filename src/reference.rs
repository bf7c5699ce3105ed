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

//! Reference number (`RO`) handling.
//!
//! The payload carries the reference prefixed with its model: `97` for the
//! check-digit-validated model 97, `00` for every other model. The check
//! digits themselves are not verified here.

use crate::base::{DEFAULT_MODEL, strip_separators};

/// Model whose references keep their own `97` prefix.
pub const MODEL_97: &str = "97";

/// Prefix used for any model other than 97.
pub const FREE_FORM_PREFIX: &str = "00";

/// Payload prefix for a reference written under `model`.
///
/// A missing or blank model is treated as model 97.
pub fn reference_prefix(model: Option<&str>) -> &'static str {
    let model = model.map(str::trim).filter(|m| !m.is_empty()).unwrap_or(DEFAULT_MODEL);
    if model == MODEL_97 { MODEL_97 } else { FREE_FORM_PREFIX }
}

/// Builds the `RO` value, or `None` when the reference is empty after
/// stripping dashes and whitespace.
pub fn reference_field(model: Option<&str>, reference: &str) -> Option<String> {
    let clean = strip_separators(reference);
    if clean.is_empty() {
        return None;
    }
    Some(format!("{}{clean}", reference_prefix(model)))
}
