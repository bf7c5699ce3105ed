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

//! Property-based tests for the IPS encoder.
//!
//! These tests verify invariants that should hold for any instruction the
//! encoder accepts, and that rejected instructions never yield a payload.

use ips_qr::{
    EncodingError, PaymentInstruction, ValidationError, encode, format_amount, normalize_account,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// Non-negative amount with up to 4 decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000_000_000i64).prop_map(|units| Decimal::new(units, 4))
}

/// Account number in local notation: bank code, shortened account, check digits.
fn arb_account() -> impl Strategy<Value = String> {
    ("[0-9]{3}", "[0-9]{1,13}", "[0-9]{2}")
        .prop_map(|(bank, account, check)| format!("{bank}-{account}-{check}"))
}

/// Free text without the field separator, Serbian Latin letters included.
fn arb_text(max: usize) -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[A-Za-zčćžšđČĆŽŠĐ0-9 .,\\-]{{0,{max}}}"))
        .expect("valid regex")
}

fn arb_instruction() -> impl Strategy<Value = PaymentInstruction> {
    (
        "[A-Za-zčćžšđ][A-Za-zčćžšđ .]{0,80}",
        proptest::option::of(arb_text(60)),
        arb_account(),
        arb_amount(),
        arb_text(80),
        proptest::option::of(prop_oneof![Just("97".to_owned()), "[0-9]{2}"]),
        "[0-9\\- ]{0,25}",
    )
        .prop_map(
            |(name, location, account, amount, purpose, model, reference)| PaymentInstruction {
                recipient_name: name,
                recipient_location: location,
                account_number: account,
                amount,
                payment_code: None,
                payment_purpose: purpose,
                model,
                reference_number: reference,
            },
        )
}

fn field<'a>(payload: &'a str, tag: &str) -> Option<&'a str> {
    payload
        .split('|')
        .find_map(|f| f.strip_prefix(tag).and_then(|rest| rest.strip_prefix(':')))
}

// =============================================================================
// Normalizer Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Normalizing a normalized account changes nothing.
    #[test]
    fn account_normalization_is_idempotent(account in arb_account()) {
        let once = normalize_account(&account).unwrap();
        let twice = normalize_account(&once).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.len(), 18);
        prop_assert!(once.bytes().all(|b| b.is_ascii_digit()));
    }

    /// Bank code survives normalization.
    #[test]
    fn account_keeps_bank_code(account in arb_account()) {
        let normalized = normalize_account(&account).unwrap();
        prop_assert_eq!(&normalized[..3], &account[..3]);
    }

    /// Amount field always has the fixed shape.
    #[test]
    fn amount_has_two_decimals(amount in arb_amount()) {
        let field = format_amount(amount).unwrap();
        let digits = field.strip_prefix("RSD").unwrap();
        let (integer, fraction) = digits.split_once(',').unwrap();

        prop_assert!(!integer.is_empty());
        prop_assert!(integer.bytes().all(|b| b.is_ascii_digit()));
        prop_assert_eq!(fraction.len(), 2);
        prop_assert!(!field.contains('.'));
    }

    /// Negative amounts never format.
    #[test]
    fn negative_amount_rejected(units in 1i64..=1_000_000_000i64) {
        let amount = Decimal::new(-units, 2);
        prop_assert_eq!(format_amount(amount), Err(ValidationError::NegativeAmount(amount)));
    }
}

// =============================================================================
// Payload Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Same input, same bytes.
    #[test]
    fn encoding_is_deterministic(instruction in arb_instruction()) {
        let first = encode(&instruction).unwrap();
        let second = encode(&instruction.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Field limits hold for every accepted instruction.
    #[test]
    fn field_limits_hold(instruction in arb_instruction()) {
        let payload = encode(&instruction).unwrap().into_string();

        prop_assert!(payload.starts_with("K:PR|V:01|C:1|R:"));
        prop_assert!(!payload.ends_with('|'));
        prop_assert_eq!(field(&payload, "R").unwrap().len(), 18);

        let recipient = field(&payload, "N").unwrap();
        prop_assert!(recipient.chars().count() <= 70);
        prop_assert!(recipient.matches('\n').count() <= 2);

        match field(&payload, "S") {
            Some(purpose) => {
                prop_assert!(!purpose.is_empty());
                prop_assert!(purpose.chars().count() <= 35);
            }
            None => prop_assert!(instruction.payment_purpose.is_empty()),
        }
    }

    /// The reference prefix follows the model.
    #[test]
    fn reference_prefix_follows_model(instruction in arb_instruction()) {
        let payload = encode(&instruction).unwrap().into_string();
        if let Some(reference) = field(&payload, "RO") {
            let expected = match instruction.model.as_deref() {
                None | Some("97") => "97",
                Some(_) => "00",
            };
            prop_assert!(reference.starts_with(expected));
            prop_assert!(!reference.contains('-'));
            prop_assert!(!reference.contains(' '));
        }
    }

    /// A separator anywhere in the purpose rejects the whole instruction.
    #[test]
    fn separator_never_passes(instruction in arb_instruction(), position in 0usize..100) {
        let mut purpose: Vec<char> = instruction.payment_purpose.chars().collect();
        purpose.insert(position.min(purpose.len()), '|');
        let tainted = PaymentInstruction {
            payment_purpose: purpose.into_iter().collect(),
            ..instruction
        };

        prop_assert!(matches!(
            encode(&tainted),
            Err(EncodingError::Validation(ValidationError::ForbiddenSeparator(_)))
        ));
    }
}
