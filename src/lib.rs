//! Bookstore - command-line inventory for a small bookstore
//!
//! Books live in a single SQLite file. Every destructive operation is
//! bracketed by a file-level snapshot of that database and a retention pass
//! over the snapshot directory. The inventory can be exported to CSV,
//! re-imported from CSV, and rendered as a paginated PDF report.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path and settings management
//! - `error`: Custom error types
//! - `models`: Book records and field parsing
//! - `storage`: SQLite connection, schema and book repository
//! - `backup`: Snapshot creation and retention
//! - `export`: CSV export and PDF report rendering
//! - `services`: CSV import and the inventory service that orchestrates backups
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive menu
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore::backup::BackupManager;
//! use bookstore::config::{paths::BookstorePaths, settings::Settings};
//! use bookstore::services::InventoryService;
//! use bookstore::storage::Storage;
//!
//! let paths = BookstorePaths::default();
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths.db_path())?;
//! storage.initialize(paths.seed_script())?;
//! let backups = BackupManager::new(&paths);
//!
//! let inventory = InventoryService::new(&storage, &backups, &settings);
//! for book in inventory.list()? {
//!     println!("{}", book.title);
//! }
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BookstoreError, BookstoreResult};
