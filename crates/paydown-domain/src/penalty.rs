//! Escalating penalty rates for consecutively missed repayments.

use crate::repayment::{PaymentStatus, PaymentStatusRecord};

/// Surcharge points added per consecutive missed month.
pub const PENALTY_STEP: f64 = 2.0;
/// Ceiling on the total surcharge, in points.
pub const PENALTY_CAP: f64 = 10.0;

/// Effective annual rate after escalation: base plus two points per
/// consecutive missed payment, capped at ten points above base.
pub fn penalty_rate(base_rate: f64, consecutive_missed: u32) -> f64 {
    base_rate + (consecutive_missed as f64 * PENALTY_STEP).min(PENALTY_CAP)
}

/// Extra cost of the escalation alone over `months_missed` months, excluding
/// base interest. Rates are annual percentages and are applied monthly.
pub fn total_penalty(amount: f64, base_rate: f64, penalty_rate: f64, months_missed: u32) -> f64 {
    let monthly_base = base_rate / 12.0 / 100.0;
    let monthly_penalty = penalty_rate / 12.0 / 100.0;
    amount * (monthly_penalty - monthly_base) * months_missed as f64
}

/// Length of the trailing run of missed months in `history`, which must be
/// ordered oldest first. Any paid month resets the run to zero.
pub fn consecutive_missed(history: &[PaymentStatusRecord]) -> u32 {
    history
        .iter()
        .rev()
        .take_while(|record| record.status == PaymentStatus::Missed)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn escalates_two_points_per_missed_month() {
        assert_eq!(penalty_rate(10.0, 0), 10.0);
        assert_eq!(penalty_rate(10.0, 1), 12.0);
        assert_eq!(penalty_rate(10.0, 3), 16.0);
    }

    #[test]
    fn surcharge_caps_at_ten_points() {
        assert_eq!(penalty_rate(10.0, 5), 20.0);
        assert_eq!(penalty_rate(10.0, 6), 20.0);
        assert_eq!(penalty_rate(22.0, 100), 32.0);
    }

    #[test]
    fn total_penalty_excludes_base_interest() {
        // 1000 * (18/12/100 - 12/12/100) * 3 = 1000 * 0.005 * 3
        let penalty = total_penalty(1_000.0, 12.0, 18.0, 3);
        assert!((penalty - 15.0).abs() < 1e-9);
        assert_eq!(total_penalty(1_000.0, 12.0, 12.0, 3), 0.0);
    }

    #[test]
    fn consecutive_run_resets_on_any_paid_month() {
        let debt_id = Uuid::new_v4();
        let history = vec![
            PaymentStatusRecord::missed(debt_id, "2025-01"),
            PaymentStatusRecord::paid(debt_id, "2025-02"),
            PaymentStatusRecord::missed(debt_id, "2025-03"),
            PaymentStatusRecord::missed(debt_id, "2025-04"),
        ];
        assert_eq!(consecutive_missed(&history), 2);

        let all_paid = vec![PaymentStatusRecord::paid(debt_id, "2025-04")];
        assert_eq!(consecutive_missed(&all_paid), 0);
        assert_eq!(consecutive_missed(&[]), 0);
    }
}
