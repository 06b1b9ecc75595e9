//! Directory existence check.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::ValidationResult;
use crate::error::{MigrateError, Result};

/// Confirms a directory exists and counts its immediate subdirectories.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryChecker;

impl DirectoryChecker {
    pub fn new() -> Self {
        Self
    }

    /// Check `path`. `label` only appears in logs.
    pub fn check(&self, label: &str, path: &str) -> ValidationResult {
        match count_subdirectories(path) {
            Ok(count) => {
                debug!("{}{} has {} folders", label.trim(), path, count);
                ValidationResult::passed(format!("Directory found. Folders: {}", count))
            }
            Err(e) => {
                debug!("{}{}: {}", label.trim(), path, e);
                e.into()
            }
        }
    }
}

fn resolve(path: &str) -> Result<PathBuf> {
    std::path::absolute(Path::new(path)).map_err(|e| MigrateError::path_resolution(path, e))
}

fn count_subdirectories(path: &str) -> Result<usize> {
    let full_path = resolve(path)?;
    if !full_path.is_dir() {
        return Err(MigrateError::DirectoryMissing(full_path));
    }

    let mut count = 0;
    for entry in std::fs::read_dir(&full_path)? {
        if entry?.path().is_dir() {
            count += 1;
        }
    }
    Ok(count)
}
