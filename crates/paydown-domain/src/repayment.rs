//! Repayment ledger entries and per-month payment status rows.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Frequency;

#[derive(Debug, Clone, Serialize, Deserialize)]
/// A single money movement against a debt. Append-only: entries are removed
/// only by an atomic status reversal or when the whole debt is deleted.
pub struct RepaymentEntry {
    pub id: Uuid,
    pub debt_id: Uuid,
    pub amount: f64,
    pub repayment_date: NaiveDate,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Back-reference to the expense that produced this entry, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_id: Option<Uuid>,
}

impl RepaymentEntry {
    pub fn new(
        debt_id: Uuid,
        amount: f64,
        repayment_date: NaiveDate,
        frequency: Frequency,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            debt_id,
            amount,
            repayment_date,
            frequency,
            notes: None,
            expense_id: None,
        }
    }

    pub fn with_expense(mut self, expense_id: Uuid) -> Self {
        self.expense_id = Some(expense_id);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Outcome recorded for a debt in a given calendar month.
pub enum PaymentStatus {
    Paid,
    Missed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Missed => "missed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "paid" => Some(PaymentStatus::Paid),
            "missed" => Some(PaymentStatus::Missed),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Per-month payment outcome for a debt; at most one row per debt per month.
pub struct PaymentStatusRecord {
    pub debt_id: Uuid,
    /// `YYYY-MM` month key; lexicographic order matches chronological order.
    pub month: String,
    pub status: PaymentStatus,
    pub penalty_rate: f64,
}

impl PaymentStatusRecord {
    pub fn paid(debt_id: Uuid, month: impl Into<String>) -> Self {
        Self {
            debt_id,
            month: month.into(),
            status: PaymentStatus::Paid,
            penalty_rate: 0.0,
        }
    }

    pub fn missed(debt_id: Uuid, month: impl Into<String>) -> Self {
        Self {
            debt_id,
            month: month.into(),
            status: PaymentStatus::Missed,
            penalty_rate: 0.0,
        }
    }
}
