//! Presentation-facing projections for the debt engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::debt::Debt;
use crate::repayment::PaymentStatusRecord;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Payment plan derived from the current balance; ephemeral, never persisted.
pub struct AmortizationSchedule {
    pub payment_amount: f64,
    pub total_payments: u32,
    pub next_payment_date: NaiveDate,
    pub next_payment_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Aggregated view over every tracked debt, consumed by the presentation layer.
pub struct DebtSummary {
    pub total_outstanding: f64,
    pub active_debts: usize,
    pub highest_interest_debt: Option<Debt>,
    pub upcoming_repayment: Option<NaiveDate>,
    /// Percentage of monthly income consumed by scheduled payments.
    pub debt_to_income_ratio: f64,
    pub monthly_repayment_total: f64,
    pub debts: Vec<Debt>,
    pub missed_payments: usize,
    pub total_penalties: f64,
    pub payment_history: Vec<PaymentStatusRecord>,
}

impl DebtSummary {
    /// Well-formed zeroed summary for an empty debt set.
    pub fn empty() -> Self {
        Self {
            total_outstanding: 0.0,
            active_debts: 0,
            highest_interest_debt: None,
            upcoming_repayment: None,
            debt_to_income_ratio: 0.0,
            monthly_repayment_total: 0.0,
            debts: Vec::new(),
            missed_payments: 0,
            total_penalties: 0.0,
            payment_history: Vec::new(),
        }
    }
}

impl Default for DebtSummary {
    fn default() -> Self {
        Self::empty()
    }
}
