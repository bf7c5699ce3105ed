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

//! Length, line and character rules for free-text payload fields.

use crate::base::{DEFAULT_PAYMENT_CODE, take_chars};
use crate::error::{Field, FormatError, ValidationError};

/// Payload field separator.
pub const SEPARATOR: char = '|';

/// Line break between recipient name and location.
pub const LINE_BREAK: &str = "\r\n";

/// Maximum characters in the recipient (`N`) field.
pub const RECIPIENT_LENGTH: usize = 70;

/// Maximum lines in the recipient (`N`) field.
pub const RECIPIENT_LINES: usize = 3;

/// Maximum characters in the purpose (`S`) field.
pub const PURPOSE_LENGTH: usize = 35;

/// Rejects text containing the field separator.
pub fn ensure_no_separator(field: Field, text: &str) -> Result<(), ValidationError> {
    if text.contains(SEPARATOR) {
        return Err(ValidationError::ForbiddenSeparator(field));
    }
    Ok(())
}

/// Builds the recipient field from name and optional location.
///
/// The location goes on its own line; a blank location is ignored. When the result exceeds 70 characters
/// it is cut from the end, so the location shrinks first and the name only
/// once the location is gone. A location cut down to nothing is dropped with
/// its line break. Lines past the third are dropped.
pub fn recipient_field(name: &str, location: Option<&str>) -> String {
    let Some(location) = location.filter(|l| !l.trim().is_empty()) else {
        return limit_lines(take_chars(name, RECIPIENT_LENGTH)).to_owned();
    };

    let combined = format!("{name}{LINE_BREAK}{location}");
    let truncated = take_chars(&combined, RECIPIENT_LENGTH);
    let name_and_break = name.chars().count() + LINE_BREAK.len();
    if truncated.chars().count() <= name_and_break {
        return limit_lines(take_chars(name, RECIPIENT_LENGTH)).to_owned();
    }
    limit_lines(truncated).to_owned()
}

/// Keeps the first [`RECIPIENT_LINES`] lines of `text`, without a dangling
/// line break left by truncation.
fn limit_lines(text: &str) -> &str {
    let text = match text.match_indices('\n').nth(RECIPIENT_LINES - 1) {
        Some((end, _)) => &text[..end],
        None => text,
    };
    text.trim_end_matches(['\r', '\n'])
}

/// First 35 characters of the purpose. Line breaks are kept as-is.
pub fn purpose_field(purpose: &str) -> &str {
    take_chars(purpose, PURPOSE_LENGTH)
}

/// Validated payment code (`SF`), defaulting to `189` when absent or blank.
pub fn payment_code_field(code: Option<&str>) -> Result<&str, FormatError> {
    let code = code.map(str::trim).filter(|c| !c.is_empty());
    let Some(code) = code else {
        return Ok(DEFAULT_PAYMENT_CODE);
    };
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::InvalidPaymentCode(code.to_owned()));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_location_on_separate_lines() {
        assert_eq!(
            recipient_field("Poreska uprava", Some("Beograd")),
            "Poreska uprava\r\nBeograd"
        );
        assert_eq!(recipient_field("Poreska uprava", None), "Poreska uprava");
        assert_eq!(recipient_field("Poreska uprava", Some("")), "Poreska uprava");
    }

    #[test]
    fn long_location_is_truncated_first() {
        let name = "Republički fond za zdravstveno osiguranje"; // 41 chars
        let location = "Jovana Marinovića 2, 11000 Beograd, Republika Srbija";
        let field = recipient_field(name, Some(location));

        assert_eq!(field.chars().count(), RECIPIENT_LENGTH);
        assert!(field.starts_with(&format!("{name}\r\n")));
        assert_eq!(field, format!("{name}\r\nJovana Marinovića 2, 11000 "));
    }

    #[test]
    fn location_is_dropped_when_name_fills_the_field() {
        let name = "N".repeat(69);
        assert_eq!(recipient_field(&name, Some("Beograd")), name);

        let name = "N".repeat(75);
        assert_eq!(recipient_field(&name, Some("Beograd")), "N".repeat(70));
    }

    #[test]
    fn location_cut_to_nothing_drops_line_break() {
        let name = "N".repeat(68);
        assert_eq!(recipient_field(&name, Some("Beograd")), name);
    }

    #[test]
    fn blank_location_is_ignored() {
        assert_eq!(recipient_field("Poreska uprava", Some("   ")), "Poreska uprava");
        assert_eq!(recipient_field("Poreska uprava", Some("\t")), "Poreska uprava");
    }

    #[test]
    fn truncation_never_splits_a_line_break() {
        let name = format!("{}\r\nB", "A".repeat(69));
        assert_eq!(recipient_field(&name, None), "A".repeat(69));
        assert_eq!(recipient_field(&name, Some("Beograd")), "A".repeat(69));

        let name = format!("{}\r\nB", "A".repeat(68));
        assert_eq!(recipient_field(&name, None), "A".repeat(68));
        assert_eq!(recipient_field(&name, Some("Beograd")), "A".repeat(68));
    }

    #[test]
    fn at_most_three_lines() {
        assert_eq!(
            recipient_field("JP EPS\r\nBeograd", Some("Balkanska 13\r\nSrbija")),
            "JP EPS\r\nBeograd\r\nBalkanska 13"
        );
        assert_eq!(recipient_field("a\nb\nc\nd", None), "a\nb\nc");
    }

    #[test]
    fn purpose_is_capped_at_35_characters() {
        let purpose = "Doprinos za osiguranje za slučaj nezaposlenosti";
        assert_eq!(purpose_field(purpose), "Doprinos za osiguranje za slučaj ne");
        assert_eq!(purpose_field(purpose).chars().count(), PURPOSE_LENGTH);
        assert_eq!(purpose_field("Uplata poreza"), "Uplata poreza");
    }

    #[test]
    fn purpose_keeps_line_breaks() {
        assert_eq!(purpose_field("Uplata\r\nporeza"), "Uplata\r\nporeza");
    }

    #[test]
    fn separator_is_rejected() {
        assert_eq!(
            ensure_no_separator(Field::PaymentPurpose, "a|b"),
            Err(ValidationError::ForbiddenSeparator(Field::PaymentPurpose))
        );
        assert_eq!(ensure_no_separator(Field::RecipientName, "ab"), Ok(()));
    }

    #[test]
    fn payment_code_defaults_and_validates() {
        assert_eq!(payment_code_field(None), Ok("189"));
        assert_eq!(payment_code_field(Some(" ")), Ok("189"));
        assert_eq!(payment_code_field(Some("253")), Ok("253"));
        assert_eq!(
            payment_code_field(Some("18")),
            Err(FormatError::InvalidPaymentCode("18".into()))
        );
        assert_eq!(
            payment_code_field(Some("1a9")),
            Err(FormatError::InvalidPaymentCode("1a9".into()))
        );
    }
}
