//! Path resolution for quickdev configuration and data files.
//!
//! All quickdev data is stored in `~/.quickdev/` unless `QUICKDEV_HOME`
//! points elsewhere:
//! - `config.yaml` - Main configuration file
//! - `quickdev.db` - SQLite database for projects, tasks and time logs

use std::path::PathBuf;

use crate::error::QuickDevError;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "QUICKDEV_HOME";

/// Paths to quickdev configuration and data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Root directory: `~/.quickdev/`
    pub root: PathBuf,
    /// Config file: `~/.quickdev/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.quickdev/quickdev.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `QUICKDEV_HOME`, falling back to `~/.quickdev`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `QUICKDEV_HOME` nor `HOME` is set.
    pub fn new() -> Result<Self, QuickDevError> {
        if let Ok(custom) = std::env::var(HOME_ENV) {
            if !custom.is_empty() {
                return Ok(Self::with_root(PathBuf::from(custom)));
            }
        }

        let home = std::env::var("HOME").map_err(|_| {
            QuickDevError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".quickdev")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("quickdev.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), QuickDevError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                QuickDevError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
