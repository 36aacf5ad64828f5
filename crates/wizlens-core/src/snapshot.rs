//! MoneyWiz snapshot layout: file discovery and Core Data encodings
//!
//! A MoneyWiz backup is a directory such as
//! `iMoneyWiz-Data-Backup-2025_12_21-17_23/` holding a single SQLite file.
//! Every record lives in `ZSYNCOBJECT`, discriminated by its `Z_ENT`
//! entity code.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime};
use tracing::debug;

use crate::error::{Error, Result};

/// File name of the SQLite database inside a backup directory
pub const SNAPSHOT_FILE_NAME: &str = "ipadMoneyWiz.sqlite";

/// Prefix of the backup directories MoneyWiz exports
pub const BACKUP_DIR_PREFIX: &str = "iMoneyWiz-Data-Backup";

/// Seconds between the Unix epoch and the Core Data epoch (2001-01-01T00:00:00Z)
pub const CORE_DATA_EPOCH_OFFSET: i64 = 978_307_200;

/// Length of an average Gregorian month in seconds (~30.44 days)
pub const SECONDS_PER_MONTH: i64 = 2_629_746;

/// Entity codes of account records (bank, deposit, cash, other, investment, regular)
pub const ACCOUNT_ENTITIES: &str = "10, 11, 12, 13, 15, 16";

/// Entity codes of transaction records, transfers (43) included
pub const TRANSACTION_ENTITIES: &str = "37, 43, 45, 46, 47";

/// Entity code of category records
pub const CATEGORY_ENTITY: i64 = 19;

/// Convert a Core Data timestamp (seconds since 2001-01-01) to a UTC
/// datetime, truncated to whole seconds
pub fn core_data_to_datetime(seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    let unix = (seconds.trunc() as i64).checked_add(CORE_DATA_EPOCH_OFFSET)?;
    DateTime::from_timestamp(unix, 0).map(|dt| dt.naive_utc())
}

/// Resolve the snapshot file to open.
///
/// An explicit path may name the SQLite file or its backup directory. Without
/// one, the working directory and its parent are searched for backup
/// directories and the most recent one wins.
pub fn resolve_snapshot_path(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        let path = if path.is_dir() {
            path.join(SNAPSHOT_FILE_NAME)
        } else {
            path.to_path_buf()
        };
        if !path.is_file() {
            return Err(Error::Snapshot(format!(
                "snapshot not found at {}",
                path.display()
            )));
        }
        return Ok(path);
    }

    let mut search_roots = vec![cwd.to_path_buf()];
    if let Some(parent) = cwd.parent() {
        search_roots.push(parent.to_path_buf());
    }

    for root in &search_roots {
        if let Some(found) = latest_backup_in(root)? {
            debug!(path = %found.display(), "discovered snapshot");
            return Ok(found);
        }
    }

    Err(Error::Snapshot(format!(
        "no {} directory containing {} found in {}; pass --db with the path to the snapshot",
        BACKUP_DIR_PREFIX,
        SNAPSHOT_FILE_NAME,
        cwd.display()
    )))
}

/// Newest backup directory directly under `root` that holds a snapshot file.
/// Backup names embed their timestamp, so the greatest name is the newest.
fn latest_backup_in(root: &Path) -> Result<Option<PathBuf>> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(BACKUP_DIR_PREFIX))
        })
        .map(|entry| entry.path().join(SNAPSHOT_FILE_NAME))
        .filter(|path| path.is_file())
        .collect();

    candidates.sort();
    Ok(candidates.pop())
}
