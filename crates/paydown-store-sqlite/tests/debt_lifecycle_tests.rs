use chrono::NaiveDate;
use uuid::Uuid;

use paydown_domain::{
    month_key, Debt, DebtDraft, ExpenseStatus, Frequency, LinkedExpense, PaymentStatus,
    RepaymentEntry,
};
use paydown_store_sqlite::{DebtStore, StoreError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(total: f64) -> DebtDraft {
    DebtDraft {
        creditor: "First Bank".into(),
        total_amount: total,
        interest_rate: 12.0,
        currency: "USD".into(),
        start_date: date(2025, 1, 1),
        expected_end_date: date(2026, 1, 1),
        frequency: Frequency::Monthly,
        notes: None,
    }
}

fn seeded_store(total: f64) -> (DebtStore, Debt) {
    let mut store = DebtStore::open_in_memory().expect("open store");
    let debt = Debt::from_draft(draft(total));
    store.insert_debt(&debt).expect("insert debt");
    (store, debt)
}

#[test]
fn insert_and_get_round_trip() {
    let (store, debt) = seeded_store(1_000.0);
    let loaded = store.get_debt(debt.id).expect("load debt");
    assert_eq!(loaded.id, debt.id);
    assert_eq!(loaded.creditor, "First Bank");
    assert_eq!(loaded.total_amount, 1_000.0);
    assert_eq!(loaded.remaining_amount, 1_000.0);
    assert_eq!(loaded.frequency, Frequency::Monthly);
    assert_eq!(loaded.start_date, date(2025, 1, 1));
}

#[test]
fn unknown_debt_is_reported_as_not_found() {
    let (store, _) = seeded_store(1_000.0);
    let missing = Uuid::new_v4();
    match store.get_debt(missing) {
        Err(StoreError::DebtNotFound(id)) => assert_eq!(id, missing),
        other => panic!("expected DebtNotFound, got {other:?}"),
    }
}

#[test]
fn list_returns_every_debt() {
    let (mut store, _) = seeded_store(1_000.0);
    let second = Debt::from_draft(draft(2_500.0));
    store.insert_debt(&second).expect("insert second");
    let debts = store.list_debts().expect("list");
    assert_eq!(debts.len(), 2);
}

#[test]
fn update_rederives_remaining_against_the_new_total() {
    let (mut store, debt) = seeded_store(1_000.0);
    let entry = RepaymentEntry::new(debt.id, 100.0, date(2025, 2, 1), Frequency::Monthly);
    store.add_repayment(&entry).expect("repayment");

    let mut edited = draft(500.0);
    edited.creditor = "Second Bank".into();
    let updated = store.update_debt(debt.id, &edited).expect("update");
    assert_eq!(updated.creditor, "Second Bank");
    assert_eq!(updated.total_amount, 500.0);
    assert!((updated.remaining_amount - 400.0).abs() < 1e-9);
}

#[test]
fn mark_paid_off_settles_everything_in_one_transaction() {
    let (mut store, debt) = seeded_store(1_000.0);
    let expense = LinkedExpense::debt_linked(debt.id, 100.0, date(2025, 2, 15));
    store.put_expense(&expense).expect("put expense");

    let today = date(2025, 3, 10);
    let settled = store.mark_debt_paid_off(debt.id, today).expect("pay off");
    assert!((settled.remaining_amount - 0.0).abs() < 1e-9);

    let entries = store.repayments_for(debt.id).expect("entries");
    assert_eq!(entries.len(), 1);
    assert!((entries[0].amount - 1_000.0).abs() < 1e-9);
    assert_eq!(entries[0].repayment_date, today);

    let flipped = store.get_expense(expense.id).expect("expense");
    assert_eq!(flipped.status, ExpenseStatus::Paid);
    assert_eq!(flipped.paid_date, Some(today));

    let record = store
        .status_for_month(debt.id, &month_key(today))
        .expect("status query")
        .expect("status row");
    assert_eq!(record.status, PaymentStatus::Paid);
    assert_eq!(record.penalty_rate, 0.0);
}

#[test]
fn repeated_mark_paid_off_is_a_no_op() {
    let (mut store, debt) = seeded_store(1_000.0);
    let today = date(2025, 3, 10);
    store.mark_debt_paid_off(debt.id, today).expect("first");
    let settled = store.mark_debt_paid_off(debt.id, today).expect("second");
    assert_eq!(settled.remaining_amount, 0.0);
    let entries = store.repayments_for(debt.id).expect("entries");
    assert_eq!(entries.len(), 1, "no zero-amount entry on replay");
}

#[test]
fn delete_cascades_across_every_table() {
    let (mut store, debt) = seeded_store(1_000.0);
    for month in 2..=4 {
        let entry =
            RepaymentEntry::new(debt.id, 50.0, date(2025, month, 1), Frequency::Monthly);
        store.add_repayment(&entry).expect("repayment");
    }
    let first = LinkedExpense::debt_linked(debt.id, 100.0, date(2025, 5, 1));
    let second = LinkedExpense::debt_linked(debt.id, 100.0, date(2025, 6, 1));
    store.put_expense(&first).expect("expense one");
    store.put_expense(&second).expect("expense two");

    store.delete_debt(debt.id).expect("delete");

    match store.get_debt(debt.id) {
        Err(StoreError::DebtNotFound(_)) => {}
        other => panic!("expected DebtNotFound, got {other:?}"),
    }
    assert!(store.repayments_for(debt.id).expect("entries").is_empty());
    assert!(store.status_history(debt.id).expect("history").is_empty());
    assert!(store
        .expenses_for_debt(debt.id)
        .expect("expenses")
        .is_empty());
    match store.get_expense(first.id) {
        Err(StoreError::ExpenseNotFound(_)) => {}
        other => panic!("expected ExpenseNotFound, got {other:?}"),
    }
}

#[test]
fn delete_of_unknown_debt_fails_without_side_effects() {
    let (mut store, debt) = seeded_store(1_000.0);
    match store.delete_debt(Uuid::new_v4()) {
        Err(StoreError::DebtNotFound(_)) => {}
        other => panic!("expected DebtNotFound, got {other:?}"),
    }
    assert!(store.get_debt(debt.id).is_ok());
}

#[test]
fn store_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("paydown.sqlite3");
    let debt = Debt::from_draft(draft(750.0));
    {
        let mut store = DebtStore::open(&path).expect("open");
        store.insert_debt(&debt).expect("insert");
    }
    let store = DebtStore::open(&path).expect("reopen");
    let loaded = store.get_debt(debt.id).expect("load");
    assert_eq!(loaded.total_amount, 750.0);
}
