//! The append-only repayment ledger.

use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use paydown_domain::RepaymentEntry;

use crate::debts::{fetch_debt, refresh_remaining};
use crate::store::{
    decode_date, decode_frequency, decode_uuid, sql_date, DebtStore, BALANCE_EPSILON,
};
use crate::StoreError;

const ENTRY_COLUMNS: &str =
    "id, debt_id, amount, repayment_date, frequency, notes, expense_id";

fn read_entry(row: &Row<'_>) -> rusqlite::Result<RepaymentEntry> {
    let id: String = row.get(0)?;
    let debt_id: String = row.get(1)?;
    let repayment_date: String = row.get(3)?;
    let frequency: String = row.get(4)?;
    let expense_id: Option<String> = row.get(6)?;
    Ok(RepaymentEntry {
        id: decode_uuid(0, &id)?,
        debt_id: decode_uuid(1, &debt_id)?,
        amount: row.get(2)?,
        repayment_date: decode_date(3, &repayment_date)?,
        frequency: decode_frequency(4, &frequency)?,
        notes: row.get(5)?,
        expense_id: expense_id
            .as_deref()
            .map(|value| decode_uuid(6, value))
            .transpose()?,
    })
}

pub(crate) fn insert_entry(conn: &Connection, entry: &RepaymentEntry) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO debt_repayments (id, debt_id, amount, repayment_date, frequency, notes, \
         expense_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            entry.id.to_string(),
            entry.debt_id.to_string(),
            entry.amount,
            sql_date(entry.repayment_date),
            entry.frequency.as_str(),
            entry.notes,
            entry.expense_id.map(|id| id.to_string()),
        ],
    )?;
    Ok(())
}

impl DebtStore {
    /// Appends a ledger entry and re-establishes the balance invariant in the
    /// same transaction. Returns the new remaining balance.
    ///
    /// An entry that would drive the balance negative is rejected before
    /// anything is written.
    pub fn add_repayment(&mut self, entry: &RepaymentEntry) -> Result<f64, StoreError> {
        if entry.amount <= 0.0 {
            return Err(StoreError::NonPositiveAmount(entry.amount));
        }
        let tx = self.conn.transaction()?;
        let debt = fetch_debt(&tx, entry.debt_id)?;
        if entry.amount - debt.remaining_amount > BALANCE_EPSILON {
            return Err(StoreError::Overpayment {
                debt_id: entry.debt_id,
                amount: entry.amount,
                remaining: debt.remaining_amount,
            });
        }
        insert_entry(&tx, entry)?;
        let remaining = refresh_remaining(&tx, entry.debt_id)?;
        tx.commit()?;
        Ok(remaining)
    }

    /// Ledger entries for a debt, oldest first.
    pub fn repayments_for(&self, debt_id: Uuid) -> Result<Vec<RepaymentEntry>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM debt_repayments WHERE debt_id = ?1 \
             ORDER BY repayment_date, id"
        ))?;
        let rows = stmt.query_map(params![debt_id.to_string()], read_entry)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}
