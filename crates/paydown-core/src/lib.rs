//! paydown-core
//!
//! Services for the debt engine: registry operations, the expense-debt
//! linker, and the read-only summary aggregator. Depends on paydown-domain
//! for models and math and on paydown-store-sqlite for persistence. No UI,
//! no terminal I/O.

pub mod debt_service;
pub mod error;
pub mod linker_service;
pub mod summary_service;

pub use debt_service::DebtService;
pub use error::{CoreError, CoreResult};
pub use linker_service::ExpenseLinkService;
pub use summary_service::SummaryService;
