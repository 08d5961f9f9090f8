//! Connection handling and column codecs for the embedded debt store.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::Connection;
use uuid::Uuid;

use paydown_domain::{ExpenseStatus, Frequency, PaymentStatus};

use crate::{schema, StoreError};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Tolerance used when comparing ledger amounts against balances.
pub(crate) const BALANCE_EPSILON: f64 = 1e-6;

/// Embedded SQLite store holding the debt engine's tables.
///
/// One store per process; every multi-statement mutation runs inside a single
/// rusqlite transaction on the wrapped connection.
pub struct DebtStore {
    pub(crate) conn: Connection,
}

impl DebtStore {
    /// Opens (and bootstraps) the store at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::bootstrap(Connection::open(path)?)
    }

    /// Opens a transient in-memory store.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;")?;
        schema::init(&conn)?;
        Ok(Self { conn })
    }
}

pub(crate) fn sql_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn sql_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

#[derive(Debug)]
struct ColumnDecodeError {
    what: &'static str,
    value: String,
}

impl fmt::Display for ColumnDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} column value: {:?}", self.what, self.value)
    }
}

impl std::error::Error for ColumnDecodeError {}

fn decode_err(idx: usize, what: &'static str, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        Box::new(ColumnDecodeError {
            what,
            value: value.to_string(),
        }),
    )
}

pub(crate) fn decode_uuid(idx: usize, value: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(value).map_err(|_| decode_err(idx, "uuid", value))
}

pub(crate) fn decode_date(idx: usize, value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| decode_err(idx, "date", value))
}

pub(crate) fn decode_datetime(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| decode_err(idx, "timestamp", value))
}

pub(crate) fn decode_frequency(idx: usize, value: &str) -> rusqlite::Result<Frequency> {
    Frequency::parse(value).ok_or_else(|| decode_err(idx, "frequency", value))
}

pub(crate) fn decode_payment_status(idx: usize, value: &str) -> rusqlite::Result<PaymentStatus> {
    PaymentStatus::parse(value).ok_or_else(|| decode_err(idx, "payment status", value))
}

pub(crate) fn decode_expense_status(idx: usize, value: &str) -> rusqlite::Result<ExpenseStatus> {
    ExpenseStatus::parse(value).ok_or_else(|| decode_err(idx, "expense status", value))
}
