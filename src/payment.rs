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

//! Stored payment records and per-type payment details.
//!
//! A flat-rate sole proprietor owes four monthly obligations: income tax and
//! three social contributions. Each obligation is stored as a
//! [`PaymentRecord`]; the encoder only ever sees the [`PaymentInstruction`]
//! derived from it.
//!
//! Status follows:
//!
//! ```text
//! Pending ──(due date passes)──► Overdue
//!    │                              │
//!    └─────────mark_paid────────────┴──► Paid
//! ```

use crate::base::{DEFAULT_MODEL, DEFAULT_PAYMENT_CODE, PaymentId};
use crate::error::PaymentError;
use crate::instruction::PaymentInstruction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recurring obligation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    /// Income tax.
    Porez,
    /// Pension and disability insurance contribution.
    Pio,
    /// Health insurance contribution.
    Zdravstveno,
    /// Unemployment insurance contribution.
    Nezaposlenost,
}

impl PaymentType {
    pub const ALL: [PaymentType; 4] = [
        PaymentType::Porez,
        PaymentType::Pio,
        PaymentType::Zdravstveno,
        PaymentType::Nezaposlenost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Porez => "porez",
            Self::Pio => "pio",
            Self::Zdravstveno => "zdravstveno",
            Self::Nezaposlenost => "nezaposlenost",
        }
    }

    /// Details used when the user has not stored their own.
    pub fn default_details(&self) -> PaymentDetails {
        let (recipient, location, reference, purpose, account) = match self {
            Self::Porez => (
                "Poreska uprava",
                Some("Beograd"),
                "7100790000005418408",
                "Uplata poreza",
                "840-0000711122843-32",
            ),
            Self::Pio => (
                "Republički fond za penzijsko i invalidsko osiguranje",
                None,
                "12-123456789-02",
                "Doprinos za PIO za samostalne delatnosti",
                "840-4848-37",
            ),
            Self::Zdravstveno => (
                "Republički fond za zdravstveno osiguranje",
                None,
                "13-123456789-03",
                "Doprinos za zdravstveno osiguranje",
                "840-4848-37",
            ),
            Self::Nezaposlenost => (
                "Nacionalna služba za zapošljavanje",
                None,
                "14-123456789-04",
                "Doprinos za osiguranje za slučaj nezaposlenosti",
                "840-4848-37",
            ),
        };

        PaymentDetails {
            recipient: recipient.to_owned(),
            recipient_location: location.map(str::to_owned),
            model: DEFAULT_MODEL.to_owned(),
            reference_number: reference.to_owned(),
            payment_purpose: purpose.to_owned(),
            account_number: account.to_owned(),
            payment_code: Some(DEFAULT_PAYMENT_CODE.to_owned()),
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payee details configured per payment type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub recipient: String,
    #[serde(default)]
    pub recipient_location: Option<String>,
    pub model: String,
    pub reference_number: String,
    pub payment_purpose: String,
    pub account_number: String,
    #[serde(default)]
    pub payment_code: Option<String>,
}

impl PaymentDetails {
    /// Instruction for paying `amount` with these details.
    pub fn instruction(&self, amount: Decimal) -> PaymentInstruction {
        PaymentInstruction {
            recipient_name: self.recipient.clone(),
            recipient_location: self.recipient_location.clone(),
            account_number: self.account_number.clone(),
            amount,
            payment_code: self.payment_code.clone(),
            payment_purpose: self.payment_purpose.clone(),
            model: Some(self.model.clone()),
            reference_number: self.reference_number.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

/// One obligation for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub payment_type: PaymentType,
    pub due_date: NaiveDate,
    pub amount: Decimal,
    pub status: PaymentStatus,
    #[serde(default)]
    pub paid_at: Option<NaiveDate>,
    /// Stored payee details; the type defaults apply when absent.
    #[serde(default)]
    pub details: Option<PaymentDetails>,
}

impl PaymentRecord {
    /// Creates a pending payment.
    pub fn new(
        id: PaymentId,
        payment_type: PaymentType,
        due_date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self {
            id,
            payment_type,
            due_date,
            amount,
            status: PaymentStatus::Pending,
            paid_at: None,
            details: None,
        }
    }

    pub fn with_details(mut self, details: PaymentDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Status as of `today`: a pending payment past its due date is overdue.
    pub fn effective_status(&self, today: NaiveDate) -> PaymentStatus {
        match self.status {
            PaymentStatus::Pending if self.due_date < today => PaymentStatus::Overdue,
            status => status,
        }
    }

    /// Marks the payment as paid on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::AlreadyPaid`] if the payment is already paid.
    pub fn mark_paid(&mut self, date: NaiveDate) -> Result<(), PaymentError> {
        if self.status == PaymentStatus::Paid {
            return Err(PaymentError::AlreadyPaid);
        }
        self.status = PaymentStatus::Paid;
        self.paid_at = Some(date);
        Ok(())
    }

    /// Builds the encoder input for this payment.
    pub fn to_instruction(&self) -> PaymentInstruction {
        match &self.details {
            Some(details) => details.instruction(self.amount),
            None => self.payment_type.default_details().instruction(self.amount),
        }
    }
}
