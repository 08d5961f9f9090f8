//! Registry operations for tracked debts.

use chrono::{NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use paydown_domain::{amortization, AmortizationSchedule, Debt, DebtDraft};
use paydown_store_sqlite::DebtStore;

use crate::{CoreError, CoreResult};

/// Provides validated create/read/update/delete operations for debts.
pub struct DebtService;

impl DebtService {
    /// Validates the draft and inserts a new debt with its balance set to the
    /// full amount. Returns the new id.
    pub fn create(store: &mut DebtStore, draft: DebtDraft) -> CoreResult<Uuid> {
        Self::validate(&draft)?;
        let debt = Debt::from_draft(draft);
        store.insert_debt(&debt)?;
        debug!("debt {} created for {}", debt.id, debt.creditor);
        Ok(debt.id)
    }

    pub fn get(store: &DebtStore, id: Uuid) -> CoreResult<Debt> {
        Ok(store.get_debt(id)?)
    }

    pub fn list(store: &DebtStore) -> CoreResult<Vec<Debt>> {
        Ok(store.list_debts()?)
    }

    /// Rewrites a debt's terms after the same validation as `create`.
    pub fn update(store: &mut DebtStore, id: Uuid, draft: DebtDraft) -> CoreResult<Debt> {
        Self::validate(&draft)?;
        Ok(store.update_debt(id, &draft)?)
    }

    /// Settles the outstanding balance as of today. Safe to repeat: a second
    /// call on a zero-balance debt changes nothing.
    pub fn mark_paid_off(store: &mut DebtStore, id: Uuid) -> CoreResult<Debt> {
        Ok(store.mark_debt_paid_off(id, Utc::now().date_naive())?)
    }

    /// Removes the debt and everything linked to it.
    pub fn delete(store: &mut DebtStore, id: Uuid) -> CoreResult<()> {
        Ok(store.delete_debt(id)?)
    }

    /// Payment plan for the debt's current balance as of the given date.
    /// Always recomputed; schedules are never cached.
    pub fn schedule(
        store: &DebtStore,
        id: Uuid,
        as_of: NaiveDate,
    ) -> CoreResult<AmortizationSchedule> {
        let debt = store.get_debt(id)?;
        Ok(amortization::schedule(
            debt.remaining_amount,
            debt.interest_rate,
            debt.start_date,
            debt.expected_end_date,
            debt.frequency,
            as_of,
        )?)
    }

    fn validate(draft: &DebtDraft) -> CoreResult<()> {
        if draft.creditor.trim().is_empty() {
            return Err(CoreError::Validation("creditor must not be empty".into()));
        }
        if draft.total_amount <= 0.0 {
            return Err(CoreError::Validation(format!(
                "total amount must be positive, got {}",
                draft.total_amount
            )));
        }
        if draft.interest_rate < 0.0 {
            return Err(CoreError::Validation(format!(
                "interest rate must not be negative, got {}",
                draft.interest_rate
            )));
        }
        if draft.start_date >= draft.expected_end_date {
            return Err(CoreError::Validation(
                "expected end date must be after the start date".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paydown_domain::Frequency;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_draft() -> DebtDraft {
        DebtDraft {
            creditor: "First Bank".into(),
            total_amount: 1_000.0,
            interest_rate: 5.0,
            currency: "USD".into(),
            start_date: date(2025, 1, 1),
            expected_end_date: date(2026, 1, 1),
            frequency: Frequency::Monthly,
            notes: None,
        }
    }

    fn assert_rejected(draft: DebtDraft) {
        let mut store = DebtStore::open_in_memory().expect("store");
        match DebtService::create(&mut store, draft) {
            Err(CoreError::Validation(_)) => {}
            other => panic!("expected Validation error, got {other:?}"),
        }
        assert!(DebtService::list(&store).expect("list").is_empty());
    }

    #[test]
    fn create_inserts_with_full_remaining_balance() {
        let mut store = DebtStore::open_in_memory().expect("store");
        let id = DebtService::create(&mut store, valid_draft()).expect("create");
        let debt = DebtService::get(&store, id).expect("get");
        assert_eq!(debt.remaining_amount, debt.total_amount);
    }

    #[test]
    fn non_positive_total_is_rejected() {
        let mut draft = valid_draft();
        draft.total_amount = 0.0;
        assert_rejected(draft);
    }

    #[test]
    fn negative_interest_is_rejected() {
        let mut draft = valid_draft();
        draft.interest_rate = -1.0;
        assert_rejected(draft);
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let mut draft = valid_draft();
        draft.expected_end_date = draft.start_date;
        assert_rejected(draft);
    }

    #[test]
    fn blank_creditor_is_rejected() {
        let mut draft = valid_draft();
        draft.creditor = "   ".into();
        assert_rejected(draft);
    }

    #[test]
    fn schedule_reflects_the_current_balance() {
        let mut store = DebtStore::open_in_memory().expect("store");
        let mut draft = valid_draft();
        draft.interest_rate = 0.0;
        draft.expected_end_date = date(2025, 11, 1);
        let id = DebtService::create(&mut store, draft).expect("create");
        let plan = DebtService::schedule(&store, id, date(2025, 1, 1)).expect("plan");
        assert_eq!(plan.total_payments, 10);
        assert!((plan.payment_amount - 100.0).abs() < f64::EPSILON);
    }
}
