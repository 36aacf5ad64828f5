//! Test utilities for wizlens-core
//!
//! [`SnapshotBuilder`] writes a minimal MoneyWiz-shaped SQLite file into a
//! temporary directory so ledger and tool tests run against the real query
//! paths.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use tempfile::TempDir;

use crate::db::Database;
use crate::snapshot::{CATEGORY_ENTITY, CORE_DATA_EPOCH_OFFSET, SNAPSHOT_FILE_NAME};

/// Entity code used for plain accounts
pub const ACCOUNT_ENTITY: i64 = 10;
/// Entity code used for plain transactions
pub const TRANSACTION_ENTITY: i64 = 37;
/// Entity code used for transfers
pub const TRANSFER_ENTITY: i64 = 43;

const SCHEMA: &str = r#"
    CREATE TABLE ZSYNCOBJECT (
        Z_PK INTEGER PRIMARY KEY,
        Z_ENT INTEGER NOT NULL,
        ZNAME TEXT,
        ZNAME2,
        ZBALLANCE REAL,
        ZOPENINGBALANCE REAL,
        ZCURRENCYNAME TEXT,
        ZTYPE,
        ZAMOUNT1 REAL,
        ZDATE1 REAL,
        ZDESC2,
        ZACCOUNT INTEGER,
        ZACCOUNT2 INTEGER
    );

    CREATE TABLE ZCATEGORYASSIGMENT (
        Z_PK INTEGER PRIMARY KEY,
        ZTRANSACTION INTEGER,
        ZCATEGORY INTEGER
    );
"#;

/// Noon on the given day
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Seconds since the Core Data epoch for a UTC datetime
pub fn to_core_data(date: NaiveDateTime) -> f64 {
    (date.and_utc().timestamp() - CORE_DATA_EPOCH_OFFSET) as f64
}

/// Builds a snapshot file row by row
pub struct SnapshotBuilder {
    dir: TempDir,
    conn: Connection,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let conn = Connection::open(dir.path().join(SNAPSHOT_FILE_NAME)).unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        Self { dir, conn }
    }

    /// Add an account with the default entity code, returning its id
    pub fn account(&self, name: &str, opening_balance: f64, currency: &str) -> i64 {
        self.account_with(
            ACCOUNT_ENTITY,
            Some(name),
            Some(opening_balance),
            currency,
            "checking",
        )
    }

    /// Add an account with full control over the stored columns.
    /// `ZBALLANCE` is filled with a stale value that must never be read.
    pub fn account_with(
        &self,
        entity: i64,
        name: Option<&str>,
        opening_balance: Option<f64>,
        currency: &str,
        account_type: &str,
    ) -> i64 {
        self.conn
            .execute(
                "INSERT INTO ZSYNCOBJECT (Z_ENT, ZNAME, ZBALLANCE, ZOPENINGBALANCE, ZCURRENCYNAME, ZTYPE) VALUES (?1, ?2, -999999.0, ?3, ?4, ?5)",
                params![entity, name, opening_balance, currency, account_type],
            )
            .unwrap();
        self.conn.last_insert_rowid()
    }

    /// Add a named category, returning its id
    pub fn category(&self, name: &str) -> i64 {
        self.conn
            .execute(
                "INSERT INTO ZSYNCOBJECT (Z_ENT, ZNAME2) VALUES (?1, ?2)",
                params![CATEGORY_ENTITY, name],
            )
            .unwrap();
        self.conn.last_insert_rowid()
    }

    /// Add a regular transaction linked through `ZACCOUNT2`
    pub fn transaction(
        &self,
        account_id: i64,
        amount: f64,
        date: NaiveDateTime,
        description: &str,
    ) -> i64 {
        self.transaction_row(
            TRANSACTION_ENTITY,
            None,
            Some(account_id),
            Some(amount),
            Some(date),
            Some(description),
        )
    }

    /// Add a regular transaction and assign it to a category
    pub fn categorized(
        &self,
        account_id: i64,
        category_id: i64,
        amount: f64,
        date: NaiveDateTime,
    ) -> i64 {
        let id = self.transaction(account_id, amount, date, "");
        self.assign(id, category_id);
        id
    }

    /// Add a transfer row linking both accounts
    pub fn transfer(
        &self,
        account_id: i64,
        counterpart_id: i64,
        amount: f64,
        date: NaiveDateTime,
    ) -> i64 {
        self.transaction_row(
            TRANSFER_ENTITY,
            Some(counterpart_id),
            Some(account_id),
            Some(amount),
            Some(date),
            Some("Transfer"),
        )
    }

    /// Add a transaction row with full control over the stored columns
    pub fn transaction_row(
        &self,
        entity: i64,
        account: Option<i64>,
        account2: Option<i64>,
        amount: Option<f64>,
        date: Option<NaiveDateTime>,
        description: Option<&str>,
    ) -> i64 {
        self.conn
            .execute(
                "INSERT INTO ZSYNCOBJECT (Z_ENT, ZACCOUNT, ZACCOUNT2, ZAMOUNT1, ZDATE1, ZDESC2) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    entity,
                    account,
                    account2,
                    amount,
                    date.map(to_core_data),
                    description
                ],
            )
            .unwrap();
        self.conn.last_insert_rowid()
    }

    /// Assign an existing transaction to a category
    pub fn assign(&self, transaction_id: i64, category_id: i64) {
        self.conn
            .execute(
                "INSERT INTO ZCATEGORYASSIGMENT (ZTRANSACTION, ZCATEGORY) VALUES (?1, ?2)",
                params![transaction_id, category_id],
            )
            .unwrap();
    }

    /// Run arbitrary SQL against the snapshot under construction
    pub fn execute(&self, sql: &str) {
        self.conn.execute_batch(sql).unwrap();
    }

    /// Finish writing and hand over the file
    pub fn build(self) -> Snapshot {
        let path = self.dir.path().join(SNAPSHOT_FILE_NAME);
        drop(self.conn);
        Snapshot {
            _dir: self.dir,
            path,
        }
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A finished snapshot file, removed when dropped
pub struct Snapshot {
    _dir: TempDir,
    path: PathBuf,
}

impl Snapshot {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the snapshot file
    pub fn dir(&self) -> &Path {
        self._dir.path()
    }

    pub fn open(&self) -> Database {
        Database::open(&self.path).unwrap()
    }
}
