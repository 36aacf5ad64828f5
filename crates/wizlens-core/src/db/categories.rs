//! Category operations

use super::{column_text, Database};
use crate::error::{Error, Result};
use crate::models::Category;
use crate::snapshot::CATEGORY_ENTITY;

impl Database {
    /// List all named categories, sorted by name
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT Z_PK, ZNAME2 FROM ZSYNCOBJECT WHERE Z_ENT = ?1 AND ZNAME2 IS NOT NULL ORDER BY ZNAME2",
            )
            .map_err(Error::query("query categories"))?;

        let categories = stmt
            .query_map([CATEGORY_ENTITY], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: column_text(row, 1)?,
                })
            })
            .map_err(Error::query("query categories"))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::query("read categories"))?;

        Ok(categories)
    }
}
