//! paydown-store-sqlite
//!
//! Embedded SQLite persistence for the debt engine: the `debts`,
//! `debt_repayments`, and `debt_payment_status` tables plus the mirror of the
//! externally-owned `expenses` table. Every multi-table mutation runs inside
//! one transaction, and the balance invariant (`remaining_amount ==
//! total_amount - sum of ledger entries`) is re-established by an explicit
//! step inside the same transaction as every ledger write.

mod debts;
mod error;
mod expenses;
mod repayments;
mod schema;
mod status;
mod store;

pub use error::StoreError;
pub use store::DebtStore;
