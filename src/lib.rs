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

//! # IPS QR
//!
//! This library builds NBS IPS QR payment codes for the recurring tax and
//! contribution payments of Serbian flat-rate sole proprietors, so the
//! payments can be scanned straight into a mobile banking app.
//!
//! ## Core Components
//!
//! - [`PaymentInstruction`]: Everything printed in one payment code
//! - [`encode`]: Assembles the payload string in the fixed IPS field order
//! - [`normalize_account`], [`format_amount`], [`reference_field`]: Field formatting rules
//! - [`PaymentRecord`]: Stored obligation with status and per-type defaults
//! - [`QrRenderer`]: Boundary to the image generator, with placeholder fallback
//! - [`EncodingError`]: The single error a renderer needs to handle
//!
//! ## Example
//!
//! ```
//! use ips_qr::{PaymentType, PaymentRecord, PaymentId};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let due = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
//! let record = PaymentRecord::new(PaymentId(1), PaymentType::Porez, due, dec!(5000));
//!
//! let payload = record.to_instruction().encode().unwrap();
//! assert!(payload.as_str().starts_with("K:PR|V:01|C:1|R:840000071112284332|"));
//! ```
//!
//! ## Thread Safety
//!
//! Encoding is a pure function of its input. Any number of threads can encode
//! unrelated instructions at once without coordination.

mod account;
mod amount;
mod base;
pub mod config;
pub mod error;
pub mod fields;
mod instruction;
mod payload;
pub mod payment;
mod reference;
pub mod render;
mod words;

pub use account::{ACCOUNT_LENGTH, AccountNumber, normalize_account};
pub use amount::{AMOUNT_FIELD_LENGTH, CURRENCY, format_amount};
pub use base::{DEFAULT_MODEL, DEFAULT_PAYMENT_CODE, PaymentId};
pub use config::Config;
pub use error::{EncodingError, Field, FormatError, PaymentError, ValidationError};
pub use instruction::PaymentInstruction;
pub use payload::{IpsPayload, encode};
pub use payment::{PaymentDetails, PaymentRecord, PaymentStatus, PaymentType};
pub use reference::{reference_field, reference_prefix};
pub use render::{PngRenderer, QrCodeView, QrRenderer, RenderOptions, render_instruction};
pub use words::amount_in_words;
