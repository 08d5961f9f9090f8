//! Table layout for the debt engine.

use rusqlite::Connection;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS debts (
  id TEXT PRIMARY KEY,
  creditor TEXT NOT NULL,
  total_amount REAL NOT NULL,
  remaining_amount REAL NOT NULL,
  interest_rate REAL NOT NULL,
  currency TEXT NOT NULL,
  start_date TEXT NOT NULL,
  expected_end_date TEXT NOT NULL,
  frequency TEXT NOT NULL,
  notes TEXT,
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS expenses (
  id TEXT PRIMARY KEY,
  amount REAL NOT NULL,
  status TEXT NOT NULL,
  due_date TEXT NOT NULL,
  paid_date TEXT,
  linked_item_type TEXT NOT NULL,
  linked_item_id TEXT
);

CREATE TABLE IF NOT EXISTS debt_repayments (
  id TEXT PRIMARY KEY,
  debt_id TEXT NOT NULL,
  amount REAL NOT NULL,
  repayment_date TEXT NOT NULL,
  frequency TEXT NOT NULL,
  notes TEXT,
  expense_id TEXT,
  FOREIGN KEY(debt_id) REFERENCES debts(id),
  FOREIGN KEY(expense_id) REFERENCES expenses(id) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS debt_payment_status (
  debt_id TEXT NOT NULL,
  month TEXT NOT NULL,
  status TEXT NOT NULL,
  penalty_rate REAL NOT NULL,
  PRIMARY KEY (debt_id, month),
  FOREIGN KEY(debt_id) REFERENCES debts(id)
);

CREATE INDEX IF NOT EXISTS idx_debt_repayments_debt ON debt_repayments(debt_id);
CREATE UNIQUE INDEX IF NOT EXISTS idx_debt_repayments_expense
  ON debt_repayments(expense_id) WHERE expense_id IS NOT NULL;
CREATE INDEX IF NOT EXISTS idx_expenses_link ON expenses(linked_item_type, linked_item_id);
";

pub(crate) fn init(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}
