//! Per-month payment status rows, upsert semantics.

use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use paydown_domain::PaymentStatusRecord;

use crate::store::{decode_payment_status, decode_uuid, DebtStore};
use crate::StoreError;

fn read_record(row: &Row<'_>) -> rusqlite::Result<PaymentStatusRecord> {
    let debt_id: String = row.get(0)?;
    let status: String = row.get(2)?;
    Ok(PaymentStatusRecord {
        debt_id: decode_uuid(0, &debt_id)?,
        month: row.get(1)?,
        status: decode_payment_status(2, &status)?,
        penalty_rate: row.get(3)?,
    })
}

pub(crate) fn upsert_record(
    conn: &Connection,
    record: &PaymentStatusRecord,
) -> Result<(), StoreError> {
    conn.execute(
        "INSERT OR REPLACE INTO debt_payment_status (debt_id, month, status, penalty_rate) \
         VALUES (?1, ?2, ?3, ?4)",
        params![
            record.debt_id.to_string(),
            record.month,
            record.status.as_str(),
            record.penalty_rate,
        ],
    )?;
    Ok(())
}

impl DebtStore {
    pub fn upsert_payment_status(
        &mut self,
        record: &PaymentStatusRecord,
    ) -> Result<(), StoreError> {
        upsert_record(&self.conn, record)
    }

    /// Status rows for one debt, oldest month first.
    pub fn status_history(&self, debt_id: Uuid) -> Result<Vec<PaymentStatusRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT debt_id, month, status, penalty_rate FROM debt_payment_status \
             WHERE debt_id = ?1 ORDER BY month",
        )?;
        let rows = stmt.query_map(params![debt_id.to_string()], read_record)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Status rows across every debt, newest month first.
    pub fn payment_history(&self) -> Result<Vec<PaymentStatusRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT debt_id, month, status, penalty_rate FROM debt_payment_status \
             ORDER BY month DESC, debt_id",
        )?;
        let rows = stmt.query_map([], read_record)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn status_for_month(
        &self,
        debt_id: Uuid,
        month: &str,
    ) -> Result<Option<PaymentStatusRecord>, StoreError> {
        let record = self
            .conn
            .query_row(
                "SELECT debt_id, month, status, penalty_rate FROM debt_payment_status \
                 WHERE debt_id = ?1 AND month = ?2",
                params![debt_id.to_string(), month],
                read_record,
            )
            .optional()?;
        Ok(record)
    }
}
