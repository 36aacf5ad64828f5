//! Transaction operations

use rusqlite::Row;

use super::{column_text, Database};
use crate::error::{Error, Result};
use crate::models::Transaction;
use crate::snapshot::{core_data_to_datetime, TRANSACTION_ENTITIES};

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let date: Option<f64> = row.get(2)?;

    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        date: date.and_then(core_data_to_datetime),
        description: column_text(row, 3)?,
        account_id: row.get(4)?,
    })
}

impl Database {
    /// List the most recent transactions, optionally for a single account.
    ///
    /// A transaction belongs to an account when either link column names it.
    /// `None` or a non-positive id lists every account.
    pub fn list_transactions(
        &self,
        account_id: Option<i64>,
        limit: usize,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let account_id = account_id.filter(|id| *id > 0);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let account_clause = if account_id.is_some() {
            "AND (ZACCOUNT2 = ?2 OR ZACCOUNT = ?2)"
        } else {
            ""
        };
        let sql = format!(
            r#"
            SELECT Z_PK, ZAMOUNT1, ZDATE1, ZDESC2, ZACCOUNT2
            FROM ZSYNCOBJECT
            WHERE Z_ENT IN ({}) AND ZAMOUNT1 IS NOT NULL {}
            ORDER BY ZDATE1 DESC
            LIMIT ?1
            "#,
            TRANSACTION_ENTITIES, account_clause
        );

        let mut stmt = conn.prepare(&sql).map_err(Error::query("query transactions"))?;
        let rows = match account_id {
            Some(id) => stmt.query_map(rusqlite::params![limit, id], transaction_from_row),
            None => stmt.query_map(rusqlite::params![limit], transaction_from_row),
        }
        .map_err(Error::query("query transactions"))?;

        let transactions = rows
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::query("read transactions"))?;

        Ok(transactions)
    }
}
