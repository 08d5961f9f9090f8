//! Entry point the expense subsystem calls when a debt-linked expense
//! changes status.

use chrono::NaiveDate;
use uuid::Uuid;

use paydown_domain::{ExpenseStatus, LinkedExpense};
use paydown_store_sqlite::DebtStore;

use crate::CoreResult;

/// Synchronizes the repayment ledger and payment-status rows with expense
/// status transitions. Each transition is a single atomic unit; replaying a
/// transition leaves the ledger unchanged.
pub struct ExpenseLinkService;

impl ExpenseLinkService {
    /// Ingests (or refreshes) an expense mirror row so later transitions have
    /// something to act on.
    pub fn ingest(store: &mut DebtStore, expense: &LinkedExpense) -> CoreResult<()> {
        store.put_expense(expense)?;
        Ok(())
    }

    /// Applies a status transition. `effective_date` is the payment date used
    /// for paid transitions; it defaults to the expense's due date.
    pub fn apply(
        store: &mut DebtStore,
        expense_id: Uuid,
        new_status: ExpenseStatus,
        effective_date: Option<NaiveDate>,
    ) -> CoreResult<LinkedExpense> {
        Ok(store.transition_expense_status(expense_id, new_status, effective_date)?)
    }
}
