//! On-disk locations for dumps, CSV files, and backups.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{Error, Result};

/// Directory name under the home directory
const DEFAULT_DIR_NAME: &str = ".fcb1010";

const DUMP_FILE: &str = "dump.syx";
const CSV_FILE: &str = "fcb1010.csv";
const BACKUP_DIR: &str = "backups";

/// Backup file name format: yymmdd_hhmm
const BACKUP_TIMESTAMP: &str = "%y%m%d_%H%M";

/// Working directory holding the current dump, its CSV, and backups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Workspace rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.fcb1010`
    pub fn in_home() -> Result<Self> {
        dirs::home_dir()
            .map(|home| Self::new(home.join(DEFAULT_DIR_NAME)))
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "could not determine home directory",
                ))
            })
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current dump
    pub fn dump_path(&self) -> PathBuf {
        self.root.join(DUMP_FILE)
    }

    /// Editable CSV
    pub fn csv_path(&self) -> PathBuf {
        self.root.join(CSV_FILE)
    }

    /// Backup directory
    pub fn backup_dir(&self) -> PathBuf {
        self.root.join(BACKUP_DIR)
    }

    /// Create the root and backup directories if missing.
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(self.backup_dir())?;
        Ok(())
    }

    /// Backup path for a given time
    pub fn backup_path_at(&self, time: DateTime<Local>) -> PathBuf {
        self.backup_dir()
            .join(format!("{}.syx", time.format(BACKUP_TIMESTAMP)))
    }

    /// Copy the current dump into the backup directory, named by local time.
    ///
    /// A backup made in the same minute replaces the earlier one.
    pub fn backup(&self) -> Result<PathBuf> {
        self.backup_file(&self.dump_path())
    }

    /// Copy any dump file into the backup directory, named by local time.
    pub fn backup_file(&self, source: &Path) -> Result<PathBuf> {
        self.ensure()?;
        let target = self.backup_path_at(Local::now());
        let bytes = fs::copy(source, &target)?;
        log::info!("Backed up {} bytes to {}", bytes, target.display());
        Ok(target)
    }
}
