pub(crate) const SCHEMA_V2: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    date            TEXT NOT NULL,
    amount          REAL NOT NULL,
    category        TEXT NOT NULL,
    description     TEXT NOT NULL DEFAULT '',
    type            TEXT NOT NULL,
    payment_method  TEXT,
    recurring       TEXT
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
CREATE INDEX IF NOT EXISTS idx_transactions_type ON transactions(type);
"#;

/// Version 1 is the split layout (`expenses` + `income`, no `type` column).
/// Version 2 is the unified `transactions` table.
pub(crate) const CURRENT_VERSION: i32 = 2;

pub(crate) const LEGACY_EXPENSES_TABLE: &str = "expenses";
pub(crate) const LEGACY_INCOME_TABLE: &str = "income";

pub(crate) const MIGRATE_LEGACY_EXPENSES: &str = r#"
INSERT INTO transactions (date, amount, category, description, type, payment_method, recurring)
SELECT date, amount, category, COALESCE(description, ''), 'Expense', payment_method, recurring
FROM expenses
ORDER BY rowid;
DROP TABLE expenses;
"#;

pub(crate) const MIGRATE_LEGACY_INCOME: &str = r#"
INSERT INTO transactions (date, amount, category, description, type, payment_method, recurring)
SELECT date, amount, category, COALESCE(description, ''), 'Income', NULL, NULL
FROM income
ORDER BY rowid;
DROP TABLE income;
"#;
