mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::path::Path;

use crate::models::*;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if needed) the database file and ensures the schema.
    ///
    /// Rollback journaling keeps every committed row inside the main file,
    /// which is the file mirrored to the remote snapshot.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=DELETE;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.ensure_schema().context("Database schema setup failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.ensure_schema()?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn from_connection(conn: Connection) -> Result<Self> {
        let mut db = Self { conn };
        db.ensure_schema()?;
        Ok(db)
    }

    /// Creates the unified table when absent and folds the legacy
    /// `expenses`/`income` tables into it. Idempotent.
    pub(crate) fn ensure_schema(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(schema::SCHEMA_V2)?;

        let version: Option<i32> = tx
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        for (table, sql) in [
            (schema::LEGACY_EXPENSES_TABLE, schema::MIGRATE_LEGACY_EXPENSES),
            (schema::LEGACY_INCOME_TABLE, schema::MIGRATE_LEGACY_INCOME),
        ] {
            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                params![table],
                |row| row.get(0),
            )?;
            if exists {
                let rows: i64 =
                    tx.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
                tx.execute_batch(sql)
                    .with_context(|| format!("Failed to migrate legacy table '{table}'"))?;
                log::info!("migrated {rows} rows from legacy table '{table}'");
            }
        }

        match version {
            None => {
                tx.execute(
                    "INSERT INTO schema_version (version) VALUES (?1)",
                    params![schema::CURRENT_VERSION],
                )?;
            }
            Some(v) if v < schema::CURRENT_VERSION => {
                tx.execute(
                    "UPDATE schema_version SET version = ?1",
                    params![schema::CURRENT_VERSION],
                )?;
            }
            Some(_) => {}
        }

        tx.commit()?;
        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn insert_transaction(&self, txn: &Transaction) -> Result<i64> {
        let amount = txn
            .amount
            .round_dp(2)
            .to_f64()
            .with_context(|| format!("Amount out of range: {}", txn.amount))?;
        self.conn.execute(
            "INSERT INTO transactions (date, amount, category, description, type, payment_method, recurring)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                txn.date.format("%Y-%m-%d").to_string(),
                amount,
                txn.category,
                txn.description,
                txn.kind.as_str(),
                txn.payment_method.map(|p| p.as_str()),
                txn.recurring.map(recurring_as_str),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All rows, newest first. `kind` narrows to one transaction type.
    pub(crate) fn get_transactions(&self, kind: Option<TransactionType>) -> Result<Vec<Transaction>> {
        let base = "SELECT id, date, amount, category, description, type, payment_method, recurring
                    FROM transactions";
        let rows = match kind {
            Some(k) => {
                let sql = format!("{base} WHERE type = ?1 ORDER BY date DESC, id DESC");
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map(params![k.as_str()], row_to_transaction)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let sql = format!("{base} ORDER BY date DESC, id DESC");
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([], row_to_transaction)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(rows)
    }

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }
}

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(1)?;
    let amount: f64 = row.get(2)?;
    let kind_str: String = row.get(5)?;
    let payment: Option<String> = row.get(6)?;
    let recurring: Option<String> = row.get(7)?;

    let kind = TransactionType::parse(&kind_str)
        .ok_or_else(|| conversion_error(5, format!("unknown transaction type '{kind_str}'")))?;

    Ok(Transaction {
        id: Some(row.get(0)?),
        date: parse_stored_date(&date_str)
            .ok_or_else(|| conversion_error(1, format!("unparseable date '{date_str}'")))?,
        amount: Decimal::from_f64(amount).unwrap_or_default().round_dp(2),
        category: row.get(3)?,
        description: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        kind,
        payment_method: optional_label(
            "payment_method",
            payment.as_deref(),
            PaymentMethod::parse,
        ),
        recurring: optional_label("recurring", recurring.as_deref(), parse_recurring),
    })
}

/// NULL stays `None`. An unrecognised label is dropped with a warning
/// so one odd legacy row does not hide the rest of the ledger.
fn optional_label<T>(
    column: &str,
    raw: Option<&str>,
    parse: fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = raw?;
    let parsed = parse(raw);
    if parsed.is_none() {
        log::warn!("ignoring unknown {column} label '{raw}'");
    }
    parsed
}

fn conversion_error(column: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, msg.into())
}

/// Stored dates are ISO `YYYY-MM-DD`; snapshots written by older tooling may
/// carry a time of day, which is dropped.
pub(crate) fn parse_stored_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    let (day, rest) = (s.get(..10)?, s.get(10..)?);
    if rest.starts_with(' ') || rest.starts_with('T') {
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    } else {
        None
    }
}
