//! paydown-domain
//!
//! Pure domain models (Debt, RepaymentEntry, PaymentStatusRecord, etc.) and
//! the amortization/penalty calculators. No I/O, no storage. Only data types,
//! core enums, and closed-form math.

pub mod amortization;
pub mod common;
pub mod debt;
pub mod expense;
pub mod penalty;
pub mod repayment;
pub mod summary;

pub use common::*;
pub use debt::*;
pub use expense::*;
pub use repayment::*;
pub use summary::*;
