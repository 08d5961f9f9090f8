use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the embedded debt store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("debt not found: {0}")]
    DebtNotFound(Uuid),
    #[error("expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("expense {0} is not linked to a debt")]
    NotDebtLinked(Uuid),
    #[error("repayment amount must be positive, got {0}")]
    NonPositiveAmount(f64),
    #[error("repayment of {amount} exceeds the remaining balance {remaining} on debt {debt_id}")]
    Overpayment {
        debt_id: Uuid,
        amount: f64,
        remaining: f64,
    },
}
