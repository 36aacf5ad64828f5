//! Account operations

use rusqlite::{params, OptionalExtension, Row};

use super::{column_text, Database};
use crate::error::{Error, Result};
use crate::models::Account;
use crate::snapshot::{ACCOUNT_ENTITIES, TRANSACTION_ENTITIES};

/// Account columns plus the linked-transaction sum. A transaction counts once
/// when either link column names the account, including transfers that name
/// it in both.
fn account_select() -> String {
    format!(
        r#"
        SELECT a.Z_PK, a.ZNAME, a.ZOPENINGBALANCE, a.ZCURRENCYNAME, a.ZTYPE,
            (SELECT COALESCE(SUM(t.ZAMOUNT1), 0)
             FROM ZSYNCOBJECT t
             WHERE t.Z_ENT IN ({tx})
               AND t.ZAMOUNT1 IS NOT NULL
               AND (t.ZACCOUNT2 = a.Z_PK OR t.ZACCOUNT = a.Z_PK)) AS linked_total
        FROM ZSYNCOBJECT a
        WHERE a.Z_ENT IN ({acc})
        "#,
        tx = TRANSACTION_ENTITIES,
        acc = ACCOUNT_ENTITIES,
    )
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    let opening: Option<f64> = row.get(2)?;
    let linked_total: f64 = row.get(5)?;

    Ok(Account {
        id: row.get(0)?,
        name: column_text(row, 1)?,
        balance: opening.unwrap_or(0.0) + linked_total,
        currency: column_text(row, 3)?,
        account_type: column_text(row, 4)?,
    })
}

impl Database {
    /// List all named accounts, sorted by name
    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        let conn = self.conn()?;
        let sql = format!("{} AND a.ZNAME IS NOT NULL ORDER BY a.ZNAME", account_select());
        let mut stmt = conn.prepare(&sql).map_err(Error::query("query accounts"))?;

        let accounts = stmt
            .query_map([], account_from_row)
            .map_err(Error::query("query accounts"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::query("read accounts"))?;

        Ok(accounts)
    }

    /// Get one account with its computed balance
    pub fn get_account_balance(&self, account_id: i64) -> Result<Account> {
        let conn = self.conn()?;
        let sql = format!("{} AND a.Z_PK = ?1", account_select());

        conn.query_row(&sql, params![account_id], account_from_row)
            .optional()
            .map_err(Error::query("query account"))?
            .ok_or_else(|| Error::NotFound(format!("account with ID {}", account_id)))
    }
}
