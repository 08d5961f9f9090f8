//! Mirror of the externally-owned expense records the linker reacts to.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `linked_item_type` value marking an expense as debt-linked.
pub const DEBT_LINK_TYPE: &str = "debt";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Lifecycle state of a linked expense.
pub enum ExpenseStatus {
    Pending,
    Paid,
    Missed,
}

impl ExpenseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpenseStatus::Pending => "pending",
            ExpenseStatus::Paid => "paid",
            ExpenseStatus::Missed => "missed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(ExpenseStatus::Pending),
            "paid" => Some(ExpenseStatus::Paid),
            "missed" => Some(ExpenseStatus::Missed),
            _ => None,
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// An expense owned by the expense subsystem. Status transitions on
/// debt-linked expenses drive ledger and payment-status mutations.
pub struct LinkedExpense {
    pub id: Uuid,
    pub amount: f64,
    pub status: ExpenseStatus,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<NaiveDate>,
    pub linked_item_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_item_id: Option<Uuid>,
}

impl LinkedExpense {
    /// Builds a pending expense linked to the given debt.
    pub fn debt_linked(debt_id: Uuid, amount: f64, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            status: ExpenseStatus::Pending,
            due_date,
            paid_date: None,
            linked_item_type: DEBT_LINK_TYPE.to_string(),
            linked_item_id: Some(debt_id),
        }
    }

    /// The debt this expense is linked to, if it is debt-linked at all.
    pub fn debt_link(&self) -> Option<Uuid> {
        if self.linked_item_type == DEBT_LINK_TYPE {
            self.linked_item_id
        } else {
            None
        }
    }
}
