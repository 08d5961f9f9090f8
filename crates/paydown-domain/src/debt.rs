//! Domain models for tracked debts.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Frequency;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: Uuid,
    pub creditor: String,
    pub total_amount: f64,
    /// Derived balance: always `total_amount` minus the sum of ledger entries.
    pub remaining_amount: f64,
    /// Annual interest rate in percent.
    pub interest_rate: f64,
    pub currency: String,
    pub start_date: NaiveDate,
    pub expected_end_date: NaiveDate,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Debt {
    /// Materializes a new debt from a draft; the balance starts at the full amount.
    pub fn from_draft(draft: DebtDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            creditor: draft.creditor,
            total_amount: draft.total_amount,
            remaining_amount: draft.total_amount,
            interest_rate: draft.interest_rate,
            currency: draft.currency,
            start_date: draft.start_date,
            expected_end_date: draft.expected_end_date,
            frequency: draft.frequency,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// True while any balance is left to repay.
    pub fn is_active(&self) -> bool {
        self.remaining_amount > 0.0
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Input payload for creating or editing a debt.
pub struct DebtDraft {
    pub creditor: String,
    pub total_amount: f64,
    pub interest_rate: f64,
    pub currency: String,
    pub start_date: NaiveDate,
    pub expected_end_date: NaiveDate,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debt_round_trips_through_json() {
        let draft = DebtDraft {
            creditor: "First Bank".into(),
            total_amount: 1_500.0,
            interest_rate: 7.5,
            currency: "USD".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            expected_end_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            frequency: Frequency::Monthly,
            notes: Some("consolidated".into()),
        };
        let debt = Debt::from_draft(draft);
        let json = serde_json::to_string(&debt).expect("serialize");
        let parsed: Debt = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.id, debt.id);
        assert_eq!(parsed.remaining_amount, debt.total_amount);
        assert_eq!(parsed.frequency, Frequency::Monthly);
        assert_eq!(parsed.notes.as_deref(), Some("consolidated"));
    }

    #[test]
    fn fresh_debts_start_active() {
        let debt = Debt::from_draft(DebtDraft {
            creditor: "Lender".into(),
            total_amount: 10.0,
            interest_rate: 0.0,
            currency: "USD".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            expected_end_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            frequency: Frequency::Weekly,
            notes: None,
        });
        assert!(debt.is_active());
    }
}
