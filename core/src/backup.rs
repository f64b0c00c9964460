//! # Backups
//!
//! Every in-place mutation is preceded by a `.backup` copy of the file.

use crate::error::AppResult;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to the original file name.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Returns `<path>.backup`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copies `path` to its backup location.
///
/// An existing backup is left untouched so the pristine original survives
/// repeated runs. Returns the backup path only when a copy was made.
pub fn backup_file(path: &Path) -> AppResult<Option<PathBuf>> {
    let target = backup_path(path);
    if target.exists() {
        tracing::debug!(backup = %target.display(), "backup already exists, keeping it");
        return Ok(None);
    }
    fs::copy(path, &target)?;
    tracing::info!(backup = %target.display(), "backup created");
    Ok(Some(target))
}

/// Removes a backup taken for a mutation that did not happen.
pub fn discard_backup(backup: &Path) -> AppResult<()> {
    if backup.exists() {
        fs::remove_file(backup)?;
        tracing::debug!(backup = %backup.display(), "unused backup removed");
    }
    Ok(())
}
