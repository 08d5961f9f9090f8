//! Closed-form amortization schedules for debt repayment plans.
//!
//! Schedules are recomputed from the current balance on every call. The
//! amortization window runs from `as_of` (clamped to the debt's start date)
//! to the original expected end date, so an off-schedule balance is spread
//! over the periods actually left on the contract.

use std::fmt;

use chrono::{Duration, NaiveDate};

use crate::common::{
    first_of_following_month, shift_month, whole_months_between, whole_weeks_between,
    whole_years_between, Frequency,
};
use crate::summary::AmortizationSchedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors raised when a payment schedule cannot be derived.
pub enum AmortizationError {
    /// No whole payment period remains before the expected end date.
    EmptyWindow,
}

impl fmt::Display for AmortizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmortizationError::EmptyWindow => {
                f.write_str("no whole payment period remains before the expected end date")
            }
        }
    }
}

impl std::error::Error for AmortizationError {}

/// Derives the payment plan for a debt balance.
///
/// `annual_rate` is a percentage (22 means 22 % per year). Periodic
/// frequencies use the standard annuity formula at the period-adjusted rate;
/// a zero rate degrades to straight division. One-time debts owe a single
/// balloon payment of the balance plus simple interest over the term, due on
/// the end date.
pub fn schedule(
    remaining_amount: f64,
    annual_rate: f64,
    start_date: NaiveDate,
    expected_end_date: NaiveDate,
    frequency: Frequency,
    as_of: NaiveDate,
) -> Result<AmortizationSchedule, AmortizationError> {
    let anchor = as_of.max(start_date);
    let end = expected_end_date;

    match frequency {
        Frequency::OneTime => {
            if anchor > end {
                return Err(AmortizationError::EmptyWindow);
            }
            let term_months = whole_months_between(start_date, end).max(0) as f64;
            let payment = remaining_amount * (1.0 + annual_rate / 100.0 * term_months / 12.0);
            Ok(AmortizationSchedule {
                payment_amount: payment,
                total_payments: 1,
                next_payment_date: end,
                next_payment_amount: payment,
            })
        }
        Frequency::Weekly => periodic(
            remaining_amount,
            annual_rate,
            whole_weeks_between(anchor, end),
            52.0,
            anchor + Duration::weeks(1),
        ),
        Frequency::Monthly => periodic(
            remaining_amount,
            annual_rate,
            whole_months_between(anchor, end),
            12.0,
            first_of_following_month(anchor),
        ),
        Frequency::Yearly => periodic(
            remaining_amount,
            annual_rate,
            whole_years_between(anchor, end),
            1.0,
            shift_month(anchor, 12),
        ),
    }
}

fn periodic(
    remaining_amount: f64,
    annual_rate: f64,
    periods: i64,
    periods_per_year: f64,
    next_payment_date: NaiveDate,
) -> Result<AmortizationSchedule, AmortizationError> {
    if periods <= 0 {
        return Err(AmortizationError::EmptyWindow);
    }
    let rate = annual_rate / periods_per_year / 100.0;
    let payment = if rate <= f64::EPSILON {
        remaining_amount / periods as f64
    } else {
        let growth = (1.0 + rate).powi(periods as i32);
        remaining_amount * rate * growth / (growth - 1.0)
    };
    Ok(AmortizationSchedule {
        payment_amount: payment,
        total_payments: periods as u32,
        next_payment_date,
        next_payment_amount: payment,
    })
}
