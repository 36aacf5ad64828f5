//! Snapshot access layer with connection pooling
//!
//! This module is organized by view:
//! - `accounts` - Accounts with computed balances
//! - `transactions` - Raw transaction listing
//! - `categories` - Category listing
//! - `cash_flow` - Category-annotated income and spending entries
//!
//! Connections are opened read-only; nothing in this crate writes to a
//! snapshot.

use std::path::Path;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::ValueRef;
use rusqlite::OpenFlags;
use tracing::info;

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::models::{Account, CashFlowEntry, Category, FlowDirection, Transaction};

mod accounts;
mod cash_flow;
mod categories;
mod transactions;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Upper bound on concurrently open snapshot connections
const POOL_SIZE: u32 = 8;

/// Tables every MoneyWiz snapshot must contain
const REQUIRED_TABLES: [&str; 2] = ["ZSYNCOBJECT", "ZCATEGORYASSIGMENT"];

/// Read a column of any storage class as text. MoneyWiz stores some
/// descriptive columns as integers in one export and strings in another.
pub(crate) fn column_text(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    })
}

/// Snapshot wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the snapshot file
    db_path: String,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Open a snapshot read-only.
    ///
    /// Fails if the file is missing or is not a MoneyWiz database.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::Snapshot(format!(
                "snapshot not found at {}",
                path.display()
            )));
        }

        let manager = SqliteConnectionManager::file(path).with_flags(
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        );
        let pool = Pool::builder()
            .max_size(POOL_SIZE)
            .connection_timeout(Duration::from_secs(5))
            .build(manager)?;

        let db = Self {
            pool,
            db_path: path.display().to_string(),
        };
        db.verify_schema()?;

        info!(path = %db.db_path, "opened snapshot");
        Ok(db)
    }

    /// Get the path to the snapshot file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Check that the file is readable SQLite with the MoneyWiz tables
    fn verify_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        for table in REQUIRED_TABLES {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .map_err(Error::query("read snapshot schema"))?;
            if count == 0 {
                return Err(Error::Snapshot(format!(
                    "{} is not a MoneyWiz snapshot (missing table {})",
                    self.db_path, table
                )));
            }
        }
        Ok(())
    }
}

impl Ledger for Database {
    fn list_accounts(&self) -> Result<Vec<Account>> {
        Database::list_accounts(self)
    }

    fn get_account_balance(&self, account_id: i64) -> Result<Account> {
        Database::get_account_balance(self, account_id)
    }

    fn list_transactions(&self, account_id: Option<i64>, limit: usize) -> Result<Vec<Transaction>> {
        Database::list_transactions(self, account_id, limit)
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        Database::list_categories(self)
    }

    fn income_data(&self, months_back: u32) -> Result<Vec<CashFlowEntry>> {
        self.cash_flow(FlowDirection::Income, months_back)
    }

    fn spending_data(&self, months_back: u32) -> Result<Vec<CashFlowEntry>> {
        self.cash_flow(FlowDirection::Spending, months_back)
    }
}

#[cfg(test)]
mod tests;
