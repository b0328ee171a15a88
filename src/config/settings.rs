//! User settings for the bookstore inventory
//!
//! Manages backup naming and retention plus the default file names used by
//! the exchange commands.

use serde::{Deserialize, Serialize};

use super::paths::BookstorePaths;
use crate::error::BookstoreError;

/// Settings for the bookstore inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// File name prefix for database snapshots
    #[serde(default = "default_backup_prefix")]
    pub backup_prefix: String,

    /// Number of snapshots kept by retention pruning
    #[serde(default = "default_backup_keep")]
    pub backup_keep: usize,

    /// Default CSV export file name (inside the export directory)
    #[serde(default = "default_export_file")]
    pub export_file: String,

    /// Default PDF report file name (inside the export directory)
    #[serde(default = "default_report_file")]
    pub report_file: String,

    /// Title printed at the top of the PDF report
    #[serde(default = "default_report_title")]
    pub report_title: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_backup_prefix() -> String {
    "backup_bookstore".to_string()
}

fn default_backup_keep() -> usize {
    5
}

fn default_export_file() -> String {
    "books_export.csv".to_string()
}

fn default_report_file() -> String {
    "bookstore_report.pdf".to_string()
}

fn default_report_title() -> String {
    "Bookstore Report".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backup_prefix: default_backup_prefix(),
            backup_keep: default_backup_keep(),
            export_file: default_export_file(),
            report_file: default_report_file(),
            report_title: default_report_title(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &BookstorePaths) -> Result<Self, BookstoreError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BookstoreError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BookstoreError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BookstorePaths) -> Result<(), BookstoreError> {
        std::fs::create_dir_all(paths.db_dir()).map_err(|e| {
            BookstoreError::Io(format!("Failed to create settings directory: {}", e))
        })?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BookstoreError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            BookstoreError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
