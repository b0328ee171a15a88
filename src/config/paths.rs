//! Path management for the bookstore inventory
//!
//! Every location the program touches is held in one [`BookstorePaths`]
//! value built at startup and handed to each component.
//!
//! ## Path Resolution Order
//!
//! 1. Command-line flag (`--db-path`, `--seed-script`, `--backup-dir`, `--exports-dir`)
//! 2. Environment variable (`BOOKSTORE_DB_PATH`, `BOOKSTORE_INIT_SQL`,
//!    `BOOKSTORE_BACKUP_DIR`, `BOOKSTORE_EXPORTS_DIR`)
//! 3. The fixed defaults below
//!
//! Steps 1 and 2 are handled by clap; this module only supplies the defaults.

use std::path::{Path, PathBuf};

use crate::error::BookstoreError;

/// Default location of the database file
pub const DEFAULT_DB_PATH: &str = "/data/bookstore.db";

/// Default location of the optional seed script
pub const DEFAULT_SEED_SCRIPT: &str = "/app/init.sql";

/// Default backup directory
pub const DEFAULT_BACKUP_DIR: &str = "/backups";

/// Default directory for CSV exports and PDF reports
pub const DEFAULT_EXPORTS_DIR: &str = "/exports";

/// Name of the settings file kept beside the database
pub const SETTINGS_FILE_NAME: &str = "bookstore.json";

/// Manages all paths used by the bookstore inventory
#[derive(Debug, Clone)]
pub struct BookstorePaths {
    db_path: PathBuf,
    seed_script: Option<PathBuf>,
    backup_dir: PathBuf,
    exports_dir: PathBuf,
}

impl Default for BookstorePaths {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            seed_script: Some(PathBuf::from(DEFAULT_SEED_SCRIPT)),
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
            exports_dir: PathBuf::from(DEFAULT_EXPORTS_DIR),
        }
    }
}

impl BookstorePaths {
    /// Create a new BookstorePaths from explicit locations
    pub fn new(
        db_path: PathBuf,
        seed_script: Option<PathBuf>,
        backup_dir: PathBuf,
        exports_dir: PathBuf,
    ) -> Self {
        Self {
            db_path,
            seed_script,
            backup_dir,
            exports_dir,
        }
    }

    /// Create BookstorePaths rooted at a single directory (useful for testing)
    ///
    /// Layout: `data/bookstore.db`, `init.sql`, `backups/`, `exports/`.
    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        Self {
            db_path: base_dir.join("data").join("bookstore.db"),
            seed_script: Some(base_dir.join("init.sql")),
            backup_dir: base_dir.join("backups"),
            exports_dir: base_dir.join("exports"),
        }
    }

    /// Get the path to the database file
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Get the seed script path, if one is configured
    pub fn seed_script(&self) -> Option<&Path> {
        self.seed_script.as_deref()
    }

    /// Get the backup directory
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Get the export/report directory
    pub fn exports_dir(&self) -> &Path {
        &self.exports_dir
    }

    /// Get the path to the settings file (beside the database)
    pub fn settings_file(&self) -> PathBuf {
        self.db_dir().join(SETTINGS_FILE_NAME)
    }

    /// Directory holding the database file
    pub fn db_dir(&self) -> PathBuf {
        self.db_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve a caller-supplied file name inside the export directory.
    ///
    /// Absolute paths are returned unchanged.
    pub fn export_file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.exports_dir.join(name)
    }

    /// Ensure the backup and export directories exist
    pub fn ensure_directories(&self) -> Result<(), BookstoreError> {
        std::fs::create_dir_all(&self.backup_dir)
            .map_err(|e| BookstoreError::Io(format!("Failed to create backup directory: {}", e)))?;

        std::fs::create_dir_all(&self.exports_dir)
            .map_err(|e| BookstoreError::Io(format!("Failed to create exports directory: {}", e)))?;

        Ok(())
    }
}
