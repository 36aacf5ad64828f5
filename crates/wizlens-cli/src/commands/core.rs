//! Shared command utilities
//!
//! This module contains:
//! - `open_db` - Locate and open the snapshot
//! - `print_json` - `--json` output

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use wizlens_core::{resolve_snapshot_path, Database};

/// Locate the snapshot from `--db` / `WIZLENS_DB` or by discovery, and open it
/// read-only
pub fn open_db(db_path: Option<&Path>) -> Result<Database> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let path = resolve_snapshot_path(db_path, &cwd).context("Failed to locate MoneyWiz snapshot")?;
    Database::open(&path).with_context(|| format!("Failed to open snapshot {}", path.display()))
}

/// Print a tool result as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}
