//! Mirror of the externally-owned expenses table and the status-transition
//! state machine that keeps it synchronized with the repayment ledger.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;
use uuid::Uuid;

use paydown_domain::{
    month_key, ExpenseStatus, LinkedExpense, PaymentStatusRecord, RepaymentEntry,
};

use crate::debts::{fetch_debt, refresh_remaining};
use crate::repayments::insert_entry;
use crate::status::upsert_record;
use crate::store::{
    decode_date, decode_expense_status, decode_uuid, sql_date, DebtStore, BALANCE_EPSILON,
};
use crate::StoreError;

const EXPENSE_COLUMNS: &str =
    "id, amount, status, due_date, paid_date, linked_item_type, linked_item_id";

fn read_expense(row: &Row<'_>) -> rusqlite::Result<LinkedExpense> {
    let id: String = row.get(0)?;
    let status: String = row.get(2)?;
    let due_date: String = row.get(3)?;
    let paid_date: Option<String> = row.get(4)?;
    let linked_item_id: Option<String> = row.get(6)?;
    Ok(LinkedExpense {
        id: decode_uuid(0, &id)?,
        amount: row.get(1)?,
        status: decode_expense_status(2, &status)?,
        due_date: decode_date(3, &due_date)?,
        paid_date: paid_date
            .as_deref()
            .map(|value| decode_date(4, value))
            .transpose()?,
        linked_item_type: row.get(5)?,
        linked_item_id: linked_item_id
            .as_deref()
            .map(|value| decode_uuid(6, value))
            .transpose()?,
    })
}

fn fetch_expense(conn: &Connection, id: Uuid) -> Result<LinkedExpense, StoreError> {
    conn.query_row(
        &format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?1"),
        params![id.to_string()],
        read_expense,
    )
    .optional()?
    .ok_or(StoreError::ExpenseNotFound(id))
}

fn write_expense_state(
    conn: &Connection,
    id: Uuid,
    status: ExpenseStatus,
    paid_date: Option<NaiveDate>,
) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE expenses SET status = ?2, paid_date = ?3 WHERE id = ?1",
        params![id.to_string(), status.as_str(), paid_date.map(sql_date)],
    )?;
    Ok(())
}

impl DebtStore {
    /// Inserts or refreshes an expense mirror row.
    pub fn put_expense(&mut self, expense: &LinkedExpense) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO expenses (id, amount, status, due_date, paid_date, \
             linked_item_type, linked_item_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                expense.id.to_string(),
                expense.amount,
                expense.status.as_str(),
                sql_date(expense.due_date),
                expense.paid_date.map(sql_date),
                expense.linked_item_type,
                expense.linked_item_id.map(|id| id.to_string()),
            ],
        )?;
        Ok(())
    }

    pub fn get_expense(&self, id: Uuid) -> Result<LinkedExpense, StoreError> {
        fetch_expense(&self.conn, id)
    }

    pub fn expenses_for_debt(&self, debt_id: Uuid) -> Result<Vec<LinkedExpense>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses \
             WHERE linked_item_type = 'debt' AND linked_item_id = ?1 ORDER BY due_date, id"
        ))?;
        let rows = stmt.query_map(params![debt_id.to_string()], read_expense)?;
        let mut expenses = Vec::new();
        for row in rows {
            expenses.push(row?);
        }
        Ok(expenses)
    }

    /// Applies a status transition for a debt-linked expense as one atomic
    /// unit: any prior ledger entry and status row for this expense are
    /// removed first, then the new state is written. Replaying the same
    /// transition is therefore a no-op in terms of row counts, and a failure
    /// at any step rolls back the expense's own status field too.
    ///
    /// `effective_date` is the payment date used for paid transitions; it
    /// defaults to the expense's due date.
    pub fn transition_expense_status(
        &mut self,
        expense_id: Uuid,
        new_status: ExpenseStatus,
        effective_date: Option<NaiveDate>,
    ) -> Result<LinkedExpense, StoreError> {
        let tx = self.conn.transaction()?;
        let expense = fetch_expense(&tx, expense_id)?;
        let debt_id = expense
            .debt_link()
            .ok_or(StoreError::NotDebtLinked(expense_id))?;
        let debt = fetch_debt(&tx, debt_id)?;

        let prior_date = expense.paid_date.unwrap_or(expense.due_date);
        tx.execute(
            "DELETE FROM debt_repayments WHERE expense_id = ?1",
            params![expense_id.to_string()],
        )?;
        tx.execute(
            "DELETE FROM debt_payment_status WHERE debt_id = ?1 AND month = ?2",
            params![debt_id.to_string(), month_key(prior_date)],
        )?;

        match new_status {
            ExpenseStatus::Paid => {
                let date = effective_date.unwrap_or(expense.due_date);
                let remaining = refresh_remaining(&tx, debt_id)?;
                if expense.amount - remaining > BALANCE_EPSILON {
                    return Err(StoreError::Overpayment {
                        debt_id,
                        amount: expense.amount,
                        remaining,
                    });
                }
                let entry = RepaymentEntry::new(debt_id, expense.amount, date, debt.frequency)
                    .with_expense(expense_id);
                insert_entry(&tx, &entry)?;
                upsert_record(&tx, &PaymentStatusRecord::paid(debt_id, month_key(date)))?;
                write_expense_state(&tx, expense_id, ExpenseStatus::Paid, Some(date))?;
            }
            ExpenseStatus::Missed => {
                upsert_record(
                    &tx,
                    &PaymentStatusRecord::missed(debt_id, month_key(expense.due_date)),
                )?;
                write_expense_state(&tx, expense_id, ExpenseStatus::Missed, None)?;
            }
            ExpenseStatus::Pending => {
                write_expense_state(&tx, expense_id, ExpenseStatus::Pending, None)?;
            }
        }

        refresh_remaining(&tx, debt_id)?;
        tx.commit()?;
        debug!("expense {expense_id} moved to {new_status} against debt {debt_id}");
        fetch_expense(&self.conn, expense_id)
    }
}
