//! Read-only aggregation of debts, schedules, and penalties.

use chrono::NaiveDate;
use tracing::warn;

use paydown_domain::{
    amortization,
    penalty::{consecutive_missed, penalty_rate, total_penalty},
    DebtSummary, Frequency, PaymentStatus,
};
use paydown_store_sqlite::DebtStore;

use crate::{CoreError, CoreResult};

/// Builds the `DebtSummary` projection consumed by the presentation layer.
///
/// Aggregation never mutates anything. A transient read failure is retried
/// once; if the retry also fails, the last summary this service produced is
/// served instead, so a flaky read degrades the display rather than erroring
/// it out.
pub struct SummaryService {
    last_known: Option<DebtSummary>,
}

impl SummaryService {
    pub fn new() -> Self {
        Self { last_known: None }
    }

    /// Summarizes every tracked debt as of `as_of`. `monthly_income` comes
    /// from the income subsystem and only feeds the debt-to-income ratio.
    pub fn summarize(
        &mut self,
        store: &DebtStore,
        monthly_income: f64,
        as_of: NaiveDate,
    ) -> CoreResult<DebtSummary> {
        let attempt = Self::build(store, monthly_income, as_of).or_else(|err| match err {
            CoreError::Transaction(_) => Self::build(store, monthly_income, as_of),
            other => Err(other),
        });
        match attempt {
            Ok(summary) => {
                self.last_known = Some(summary.clone());
                Ok(summary)
            }
            Err(err) => match self.last_known.clone() {
                Some(stale) => {
                    warn!("debt summary refresh failed, serving last known: {err}");
                    Ok(stale)
                }
                None => Err(err),
            },
        }
    }

    fn build(store: &DebtStore, monthly_income: f64, as_of: NaiveDate) -> CoreResult<DebtSummary> {
        let debts = store.list_debts()?;
        if debts.is_empty() {
            return Ok(DebtSummary::empty());
        }

        let total_outstanding: f64 = debts.iter().map(|debt| debt.remaining_amount).sum();
        let active_debts = debts.iter().filter(|debt| debt.is_active()).count();

        let highest_interest_debt = debts
            .iter()
            .fold(None, |best: Option<&paydown_domain::Debt>, debt| match best {
                Some(current) if current.interest_rate >= debt.interest_rate => Some(current),
                _ => Some(debt),
            })
            .cloned();

        let mut monthly_repayment_total = 0.0;
        let mut upcoming_repayment: Option<NaiveDate> = None;
        for debt in debts.iter().filter(|debt| debt.is_active()) {
            match amortization::schedule(
                debt.remaining_amount,
                debt.interest_rate,
                debt.start_date,
                debt.expected_end_date,
                debt.frequency,
                as_of,
            ) {
                Ok(plan) => {
                    monthly_repayment_total +=
                        monthly_equivalent(debt.frequency, plan.payment_amount);
                    upcoming_repayment = match upcoming_repayment {
                        Some(current) => Some(current.min(plan.next_payment_date)),
                        None => Some(plan.next_payment_date),
                    };
                }
                Err(err) => {
                    warn!("schedule unavailable for debt {}: {err}", debt.id);
                }
            }
        }

        let mut missed_payments = 0;
        let mut total_penalties = 0.0;
        for debt in &debts {
            let history = store.status_history(debt.id)?;
            missed_payments += history
                .iter()
                .filter(|record| record.status == PaymentStatus::Missed)
                .count();
            let run = consecutive_missed(&history);
            if run > 0 {
                let escalated = penalty_rate(debt.interest_rate, run);
                total_penalties +=
                    total_penalty(debt.remaining_amount, debt.interest_rate, escalated, run);
            }
        }

        let debt_to_income_ratio = if monthly_income > 0.0 {
            monthly_repayment_total / monthly_income * 100.0
        } else {
            0.0
        };

        let payment_history = store.payment_history()?;

        Ok(DebtSummary {
            total_outstanding,
            active_debts,
            highest_interest_debt,
            upcoming_repayment,
            debt_to_income_ratio,
            monthly_repayment_total,
            debts,
            missed_payments,
            total_penalties,
            payment_history,
        })
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes a per-period payment to a monthly figure. One-time balloon
/// payments are not a recurring obligation and contribute nothing.
fn monthly_equivalent(frequency: Frequency, payment: f64) -> f64 {
    match frequency.periods_per_year() {
        Some(per_year) => payment * per_year as f64 / 12.0,
        None => 0.0,
    }
}
