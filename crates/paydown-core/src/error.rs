use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

use paydown_domain::amortization::AmortizationError;
use paydown_store_sqlite::StoreError;

/// Unified error taxonomy for the debt engine services.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("debt not found: {0}")]
    DebtNotFound(Uuid),
    #[error("expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("transaction failed: {0}")]
    Transaction(String),
    #[error("computation failed: {0}")]
    Computation(String),
}

pub type CoreResult<T> = StdResult<T, CoreError>;

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DebtNotFound(id) => CoreError::DebtNotFound(id),
            StoreError::ExpenseNotFound(id) => CoreError::ExpenseNotFound(id),
            StoreError::NotDebtLinked(_)
            | StoreError::NonPositiveAmount(_)
            | StoreError::Overpayment { .. } => CoreError::Validation(err.to_string()),
            StoreError::Sqlite(_) => CoreError::Transaction(err.to_string()),
        }
    }
}

impl From<AmortizationError> for CoreError {
    fn from(err: AmortizationError) -> Self {
        CoreError::Computation(err.to_string())
    }
}
