//! Writing the merged configuration back to disk
//!
//! This module provides:
//! - ConfigWriter for persisting a merged document
//! - Dry-run mode support (no actual file modifications)
//! - Parent directory creation and owner-only permissions for new files

use crate::error::IoError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Writer for the dependabot configuration file
#[derive(Debug, Clone, Copy)]
pub struct ConfigWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

impl ConfigWriter {
    /// Create a new ConfigWriter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Write `content` to `path`, creating parent directories as needed
    ///
    /// Returns true if the file was written.
    pub fn write(&self, path: &Path, content: &str) -> Result<bool, IoError> {
        if self.dry_run {
            tracing::info!("dry-run: not writing {}", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| IoError::create_dir(parent, e))?;
            }
        }

        let mut file = open_for_write(path).map_err(|e| IoError::write(path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| IoError::write(path, e))?;
        tracing::info!("wrote {}", path.display());
        Ok(true)
    }
}

#[cfg(unix)]
fn open_for_write(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_for_write(path: &Path) -> std::io::Result<fs::File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Read the configuration file content
pub fn read_config(path: &Path) -> Result<String, IoError> {
    fs::read_to_string(path).map_err(|e| IoError::read(path, e))
}
