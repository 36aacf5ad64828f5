//! Server command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use super::open_db;

/// Serve MCP over stdio. Everything user-facing goes to the log on stderr.
pub async fn cmd_serve(db_path: Option<&Path>) -> Result<()> {
    let db = open_db(db_path)?;
    info!(snapshot = db.path(), "wizlens MCP server ready");

    wizlens_server::serve_stdio(Arc::new(db)).await
}
