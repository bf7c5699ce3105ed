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

//! Serbian (Latin) amount in words, as printed on invoices ("slovima").
//!
//! # Example
//!
//! ```
//! use ips_qr::amount_in_words;
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(
//!     amount_in_words(dec!(3596.13)).unwrap(),
//!     "trihiljadepetstodevedesetšest dinara i 13/100"
//! );
//! ```

use crate::error::ValidationError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const UNITS: [&str; 20] = [
    "", "jedan", "dva", "tri", "četiri", "pet", "šest", "sedam", "osam", "devet", "deset",
    "jedanaest", "dvanaest", "trinaest", "četrnaest", "petnaest", "šesnaest", "sedamnaest",
    "osamnaest", "devetnaest",
];

const TENS: [&str; 10] = [
    "", "", "dvadeset", "trideset", "četrdeset", "pedeset", "šezdeset", "sedamdeset",
    "osamdeset", "devedeset",
];

const HUNDREDS: [&str; 10] = [
    "", "sto", "dvesta", "trista", "četiristo", "petsto", "šeststo", "sedamsto", "osamsto",
    "devetsto",
];

/// Largest integer part that can be spelled out.
const MAX_INTEGER: u64 = 999_999_999_999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gender {
    Masculine,
    Feminine,
}

/// Grammatical forms of a scale word.
struct Scale {
    gender: Gender,
    /// Used alone for a chunk of exactly one ("hiljadu", "milion").
    alone: &'static str,
    /// After numbers ending in 1 (except 11).
    one: &'static str,
    /// After numbers ending in 2-4 (except 12-14).
    few: &'static str,
    many: &'static str,
}

static SCALES: [Scale; 4] = [
    Scale {
        gender: Gender::Feminine,
        alone: "hiljadu",
        one: "hiljada",
        few: "hiljade",
        many: "hiljada",
    },
    Scale {
        gender: Gender::Masculine,
        alone: "milion",
        one: "milion",
        few: "miliona",
        many: "miliona",
    },
    Scale {
        gender: Gender::Feminine,
        alone: "milijarda",
        one: "milijarda",
        few: "milijarde",
        many: "milijardi",
    },
    Scale {
        gender: Gender::Masculine,
        alone: "bilion",
        one: "bilion",
        few: "biliona",
        many: "biliona",
    },
];

impl Scale {
    fn form(&self, chunk: u64) -> &'static str {
        match (chunk % 100, chunk % 10) {
            (11..=14, _) => self.many,
            (_, 1) => self.one,
            (_, 2..=4) => self.few,
            _ => self.many,
        }
    }
}

fn unit(n: u64, gender: Gender) -> &'static str {
    match (n, gender) {
        (1, Gender::Feminine) => "jedna",
        (2, Gender::Feminine) => "dve",
        _ => UNITS[n as usize],
    }
}

fn below_thousand(n: u64, gender: Gender) -> String {
    let mut words = String::from(HUNDREDS[(n / 100) as usize]);
    let rest = n % 100;
    if rest < 20 {
        words.push_str(unit(rest, gender));
    } else {
        words.push_str(TENS[(rest / 10) as usize]);
        words.push_str(unit(rest % 10, gender));
    }
    words
}

fn integer_in_words(n: u64) -> String {
    if n == 0 {
        return "nula".to_owned();
    }

    let mut words = String::new();
    let mut chunks = Vec::new();
    let mut rest = n;
    while rest > 0 {
        chunks.push(rest % 1000);
        rest /= 1000;
    }

    for (index, chunk) in chunks.iter().copied().enumerate().rev() {
        if chunk == 0 {
            continue;
        }
        match index.checked_sub(1).map(|i| &SCALES[i]) {
            None => words.push_str(&below_thousand(chunk, Gender::Masculine)),
            Some(scale) if chunk == 1 => words.push_str(scale.alone),
            Some(scale) => {
                words.push_str(&below_thousand(chunk, scale.gender));
                words.push_str(scale.form(chunk));
            }
        }
    }
    words
}

/// Spells out an RSD amount: words for the dinars, then `dinara i NN/100`.
///
/// Cents are rounded half-up. Negative amounts are prefixed with `minus `.
///
/// # Errors
///
/// Returns [`ValidationError::AmountTooLarge`] for a thousand trillion or more.
pub fn amount_in_words(amount: Decimal) -> Result<String, ValidationError> {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let integer = rounded
        .trunc()
        .to_u64()
        .filter(|n| *n <= MAX_INTEGER)
        .ok_or(ValidationError::AmountTooLarge(amount))?;
    let cents = (rounded.fract() * Decimal::ONE_HUNDRED).to_u64().unwrap_or(0);

    let sign = if amount < Decimal::ZERO && !rounded.is_zero() { "minus " } else { "" };
    Ok(format!("{sign}{} dinara i {cents:02}/100", integer_in_words(integer)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn small_numbers() {
        assert_eq!(integer_in_words(0), "nula");
        assert_eq!(integer_in_words(1), "jedan");
        assert_eq!(integer_in_words(15), "petnaest");
        assert_eq!(integer_in_words(21), "dvadesetjedan");
        assert_eq!(integer_in_words(40), "četrdeset");
    }

    #[test]
    fn hundreds() {
        assert_eq!(integer_in_words(100), "sto");
        assert_eq!(integer_in_words(101), "stojedan");
        assert_eq!(integer_in_words(200), "dvesta");
        assert_eq!(integer_in_words(596), "petstodevedesetšest");
    }

    #[test]
    fn thousands_use_feminine_forms() {
        assert_eq!(integer_in_words(1000), "hiljadu");
        assert_eq!(integer_in_words(2000), "dvehiljade");
        assert_eq!(integer_in_words(5000), "pethiljada");
        assert_eq!(integer_in_words(12_000), "dvanaesthiljada");
        assert_eq!(integer_in_words(21_000), "dvadesetjednahiljada");
        assert_eq!(integer_in_words(1_001), "hiljadujedan");
    }

    #[test]
    fn millions_and_milliards() {
        assert_eq!(integer_in_words(1_000_000), "milion");
        assert_eq!(integer_in_words(2_500_000), "dvamilionapetstohiljada");
        assert_eq!(integer_in_words(1_000_000_000), "milijarda");
        assert_eq!(integer_in_words(3_000_000_000), "trimilijarde");
        assert_eq!(integer_in_words(5_000_000_000), "petmilijardi");
    }

    #[test]
    fn amount_with_cents() {
        assert_eq!(
            amount_in_words(dec!(3596.13)).unwrap(),
            "trihiljadepetstodevedesetšest dinara i 13/100"
        );
        assert_eq!(amount_in_words(dec!(5000)).unwrap(), "pethiljada dinara i 00/100");
        assert_eq!(amount_in_words(dec!(0.5)).unwrap(), "nula dinara i 50/100");
        assert_eq!(amount_in_words(dec!(9.999)).unwrap(), "deset dinara i 00/100");
    }

    #[test]
    fn negative_amount() {
        assert_eq!(amount_in_words(dec!(-2)).unwrap(), "minus dva dinara i 00/100");
    }

    #[test]
    fn too_large() {
        let amount = Decimal::from(1_000_000_000_000_000u64);
        assert_eq!(amount_in_words(amount), Err(ValidationError::AmountTooLarge(amount)));
    }
}
