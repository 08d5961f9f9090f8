//! Debt registry rows: creation, lookups, edits, payoff, and cascading delete.

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;
use uuid::Uuid;

use paydown_domain::{
    month_key, Debt, DebtDraft, ExpenseStatus, PaymentStatusRecord, RepaymentEntry,
};

use crate::repayments::insert_entry;
use crate::status::upsert_record;
use crate::store::{
    decode_date, decode_datetime, decode_frequency, decode_uuid, sql_date, sql_datetime,
    DebtStore, BALANCE_EPSILON,
};
use crate::StoreError;

const DEBT_COLUMNS: &str = "id, creditor, total_amount, remaining_amount, interest_rate, \
     currency, start_date, expected_end_date, frequency, notes, created_at, updated_at";

fn read_debt(row: &Row<'_>) -> rusqlite::Result<Debt> {
    let id: String = row.get(0)?;
    let start_date: String = row.get(6)?;
    let expected_end_date: String = row.get(7)?;
    let frequency: String = row.get(8)?;
    let created_at: String = row.get(10)?;
    let updated_at: String = row.get(11)?;
    Ok(Debt {
        id: decode_uuid(0, &id)?,
        creditor: row.get(1)?,
        total_amount: row.get(2)?,
        remaining_amount: row.get(3)?,
        interest_rate: row.get(4)?,
        currency: row.get(5)?,
        start_date: decode_date(6, &start_date)?,
        expected_end_date: decode_date(7, &expected_end_date)?,
        frequency: decode_frequency(8, &frequency)?,
        notes: row.get(9)?,
        created_at: decode_datetime(10, &created_at)?,
        updated_at: decode_datetime(11, &updated_at)?,
    })
}

pub(crate) fn fetch_debt(conn: &Connection, id: Uuid) -> Result<Debt, StoreError> {
    conn.query_row(
        &format!("SELECT {DEBT_COLUMNS} FROM debts WHERE id = ?1"),
        params![id.to_string()],
        read_debt,
    )
    .optional()?
    .ok_or(StoreError::DebtNotFound(id))
}

/// Re-derives `remaining_amount` from the ledger and writes it back. Must be
/// called inside the same transaction as every ledger insert or delete.
pub(crate) fn refresh_remaining(conn: &Connection, debt_id: Uuid) -> Result<f64, StoreError> {
    let repaid: f64 = conn.query_row(
        "SELECT COALESCE(SUM(amount), 0) FROM debt_repayments WHERE debt_id = ?1",
        params![debt_id.to_string()],
        |row| row.get(0),
    )?;
    let total: f64 = conn
        .query_row(
            "SELECT total_amount FROM debts WHERE id = ?1",
            params![debt_id.to_string()],
            |row| row.get(0),
        )
        .optional()?
        .ok_or(StoreError::DebtNotFound(debt_id))?;
    let remaining = total - repaid;
    conn.execute(
        "UPDATE debts SET remaining_amount = ?2, updated_at = ?3 WHERE id = ?1",
        params![
            debt_id.to_string(),
            remaining,
            sql_datetime(Utc::now())
        ],
    )?;
    Ok(remaining)
}

impl DebtStore {
    pub fn insert_debt(&mut self, debt: &Debt) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO debts (id, creditor, total_amount, remaining_amount, interest_rate, \
             currency, start_date, expected_end_date, frequency, notes, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                debt.id.to_string(),
                debt.creditor,
                debt.total_amount,
                debt.remaining_amount,
                debt.interest_rate,
                debt.currency,
                sql_date(debt.start_date),
                sql_date(debt.expected_end_date),
                debt.frequency.as_str(),
                debt.notes,
                sql_datetime(debt.created_at),
                sql_datetime(debt.updated_at),
            ],
        )?;
        Ok(())
    }

    pub fn get_debt(&self, id: Uuid) -> Result<Debt, StoreError> {
        fetch_debt(&self.conn, id)
    }

    pub fn list_debts(&self) -> Result<Vec<Debt>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {DEBT_COLUMNS} FROM debts ORDER BY created_at, rowid"
        ))?;
        let rows = stmt.query_map([], read_debt)?;
        let mut debts = Vec::new();
        for row in rows {
            debts.push(row?);
        }
        Ok(debts)
    }

    /// Rewrites a debt's terms and re-derives the balance against the new
    /// total, all in one transaction.
    pub fn update_debt(&mut self, id: Uuid, draft: &DebtDraft) -> Result<Debt, StoreError> {
        let tx = self.conn.transaction()?;
        fetch_debt(&tx, id)?;
        tx.execute(
            "UPDATE debts SET creditor = ?2, total_amount = ?3, interest_rate = ?4, \
             currency = ?5, start_date = ?6, expected_end_date = ?7, frequency = ?8, \
             notes = ?9, updated_at = ?10 WHERE id = ?1",
            params![
                id.to_string(),
                draft.creditor,
                draft.total_amount,
                draft.interest_rate,
                draft.currency,
                sql_date(draft.start_date),
                sql_date(draft.expected_end_date),
                draft.frequency.as_str(),
                draft.notes,
                sql_datetime(Utc::now()),
            ],
        )?;
        refresh_remaining(&tx, id)?;
        tx.commit()?;
        fetch_debt(&self.conn, id)
    }

    /// Settles the outstanding balance in one transaction: a final ledger
    /// entry for the remaining amount, every still-pending linked expense
    /// flipped to paid, and the current month recorded as paid. A second call
    /// on a zero-balance debt changes nothing.
    pub fn mark_debt_paid_off(&mut self, id: Uuid, today: NaiveDate) -> Result<Debt, StoreError> {
        let tx = self.conn.transaction()?;
        let debt = fetch_debt(&tx, id)?;
        if debt.remaining_amount > BALANCE_EPSILON {
            let entry = RepaymentEntry::new(id, debt.remaining_amount, today, debt.frequency)
                .with_notes("balance settled");
            insert_entry(&tx, &entry)?;
        }
        tx.execute(
            "UPDATE expenses SET status = ?3, paid_date = ?4 \
             WHERE linked_item_type = 'debt' AND linked_item_id = ?1 AND status = ?2",
            params![
                id.to_string(),
                ExpenseStatus::Pending.as_str(),
                ExpenseStatus::Paid.as_str(),
                sql_date(today),
            ],
        )?;
        upsert_record(&tx, &PaymentStatusRecord::paid(id, month_key(today)))?;
        refresh_remaining(&tx, id)?;
        tx.commit()?;
        debug!("debt {id} marked paid off");
        fetch_debt(&self.conn, id)
    }

    /// Removes the debt and everything hanging off it: linked expenses,
    /// ledger entries, and payment-status rows. All-or-nothing.
    pub fn delete_debt(&mut self, id: Uuid) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        fetch_debt(&tx, id)?;
        tx.execute(
            "DELETE FROM expenses WHERE linked_item_type = 'debt' AND linked_item_id = ?1",
            params![id.to_string()],
        )?;
        tx.execute(
            "DELETE FROM debt_repayments WHERE debt_id = ?1",
            params![id.to_string()],
        )?;
        tx.execute(
            "DELETE FROM debt_payment_status WHERE debt_id = ?1",
            params![id.to_string()],
        )?;
        tx.execute("DELETE FROM debts WHERE id = ?1", params![id.to_string()])?;
        tx.commit()?;
        debug!("debt {id} deleted");
        Ok(())
    }
}
