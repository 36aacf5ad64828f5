//! Income and spending views
//!
//! Both views come from the same transaction set split by the sign of the
//! amount. Each row is joined through `ZCATEGORYASSIGMENT` (sic) to its
//! category; a transaction with several assignments yields one entry per
//! assignment.

use rusqlite::params;
use tracing::debug;

use super::{column_text, Database};
use crate::error::{Error, Result};
use crate::models::{CashFlowEntry, FlowDirection, UNCATEGORIZED};
use crate::snapshot::{
    core_data_to_datetime, CATEGORY_ENTITY, SECONDS_PER_MONTH, TRANSACTION_ENTITIES,
};

impl Database {
    /// Category-annotated entries for one side of the ledger, newest first.
    ///
    /// With `months_back > 0` only entries within that many months of the
    /// latest transaction in the snapshot are returned.
    pub fn cash_flow(
        &self,
        direction: FlowDirection,
        months_back: u32,
    ) -> Result<Vec<CashFlowEntry>> {
        let conn = self.conn()?;

        let sign_clause = match direction {
            FlowDirection::Income => "t.ZAMOUNT1 > 0",
            FlowDirection::Spending => "t.ZAMOUNT1 < 0",
        };
        let window_clause = if months_back > 0 {
            format!(
                "AND t.ZDATE1 >= (SELECT MAX(ZDATE1) FROM ZSYNCOBJECT WHERE Z_ENT IN ({}) AND ZDATE1 IS NOT NULL) - ?2",
                TRANSACTION_ENTITIES
            )
        } else {
            String::new()
        };

        let sql = format!(
            r#"
            SELECT
                COALESCE(c.Z_PK, 0),
                COALESCE(c.ZNAME2, ?1),
                ABS(t.ZAMOUNT1),
                t.ZDATE1
            FROM ZSYNCOBJECT t
            LEFT JOIN ZCATEGORYASSIGMENT ca ON ca.ZTRANSACTION = t.Z_PK
            LEFT JOIN ZSYNCOBJECT c ON c.Z_PK = ca.ZCATEGORY AND c.Z_ENT = {cat}
            WHERE t.Z_ENT IN ({tx})
              AND {sign}
              AND t.ZDATE1 IS NOT NULL
              {window}
            ORDER BY t.ZDATE1 DESC
            "#,
            tx = TRANSACTION_ENTITIES,
            cat = CATEGORY_ENTITY,
            sign = sign_clause,
            window = window_clause,
        );

        let operation = match direction {
            FlowDirection::Income => "query income data",
            FlowDirection::Spending => "query spending data",
        };

        let mut stmt = conn.prepare(&sql).map_err(Error::query(operation))?;
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<(i64, String, f64, f64)> {
            Ok((row.get(0)?, column_text(row, 1)?, row.get(2)?, row.get(3)?))
        };
        let rows = if months_back > 0 {
            let window_seconds = i64::from(months_back) * SECONDS_PER_MONTH;
            stmt.query_map(params![UNCATEGORIZED, window_seconds], map_row)
        } else {
            stmt.query_map(params![UNCATEGORIZED], map_row)
        }
        .map_err(Error::query(operation))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::query(operation))?;

        let entries: Vec<CashFlowEntry> = rows
            .into_iter()
            .filter_map(|(category_id, category_name, amount, seconds)| {
                let date = core_data_to_datetime(seconds);
                if date.is_none() {
                    debug!(seconds, "skipping entry with unrepresentable timestamp");
                }
                date.map(|date| CashFlowEntry::new(category_id, category_name, amount, date))
            })
            .collect();

        debug!(
            direction = direction.as_str(),
            months_back,
            count = entries.len(),
            "loaded cash flow"
        );
        Ok(entries)
    }
}
