//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.
//! Handlers write to any `Write` so the interactive menu can reuse them.

pub mod backup;
pub mod book;
pub mod menu;

pub use backup::{handle_backup_command, BackupCommands};
pub use menu::run_menu;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Args;

use crate::backup::BackupManager;
use crate::config::paths::{
    BookstorePaths, DEFAULT_BACKUP_DIR, DEFAULT_DB_PATH, DEFAULT_EXPORTS_DIR, DEFAULT_SEED_SCRIPT,
};
use crate::config::settings::Settings;
use crate::error::BookstoreResult;
use crate::services::InventoryService;
use crate::storage::Storage;

/// File locations, shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct LocationArgs {
    /// Database file
    #[arg(long, global = true, env = "BOOKSTORE_DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// SQL script applied once when the database is first initialized (empty to disable)
    #[arg(long, global = true, env = "BOOKSTORE_INIT_SQL", default_value = DEFAULT_SEED_SCRIPT)]
    pub seed_script: PathBuf,

    /// Directory for database snapshots
    #[arg(long, global = true, env = "BOOKSTORE_BACKUP_DIR", default_value = DEFAULT_BACKUP_DIR)]
    pub backup_dir: PathBuf,

    /// Directory for CSV exports and PDF reports
    #[arg(long, global = true, env = "BOOKSTORE_EXPORTS_DIR", default_value = DEFAULT_EXPORTS_DIR)]
    pub exports_dir: PathBuf,
}

impl LocationArgs {
    /// Build the path configuration
    pub fn into_paths(self) -> BookstorePaths {
        let seed_script = Some(self.seed_script).filter(|p| !p.as_os_str().is_empty());
        BookstorePaths::new(self.db_path, seed_script, self.backup_dir, self.exports_dir)
    }
}

/// Everything a command needs, opened once per process
pub struct Context {
    pub paths: BookstorePaths,
    pub settings: Settings,
    pub storage: Storage,
    pub backups: BackupManager,
}

impl Context {
    /// Load settings, open and initialize the database, ensure directories exist
    pub fn open(paths: BookstorePaths) -> BookstoreResult<Self> {
        let settings = Settings::load_or_create(&paths)?;

        let storage = Storage::open(paths.db_path())?;
        storage.initialize(paths.seed_script())?;
        paths.ensure_directories()?;

        let backups = BackupManager::new(&paths);

        Ok(Self {
            paths,
            settings,
            storage,
            backups,
        })
    }

    /// Inventory operations over this context
    pub fn inventory(&self) -> InventoryService<'_> {
        InventoryService::new(&self.storage, &self.backups, &self.settings)
    }

    /// Resolve an optional user-supplied file name against the export directory
    pub fn export_target(&self, name: Option<PathBuf>, default_name: &str) -> PathBuf {
        match name {
            Some(name) => self.paths.export_file(name),
            None => self.paths.export_file(default_name),
        }
    }
}

/// Ask a yes/no question. EOF counts as "no".
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<bool> {
    write!(out, "{} (y/n): ", question)?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }

    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
