//! Backup system for the bookstore inventory
//!
//! Snapshots copy the live database file into the backup directory under a
//! timestamped name; retention pruning keeps only the newest few.
//!
//! # Snapshot Format
//!
//! `{prefix}_{YYYY-MM-DD_HH-MM-SS}.{ext}`, where `ext` is the database file's
//! own extension. Nothing besides the file itself is recorded: retention
//! orders snapshots by modification time.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore::backup::BackupManager;
//! use bookstore::config::BookstorePaths;
//!
//! let paths = BookstorePaths::default();
//! let manager = BackupManager::new(&paths);
//!
//! let snapshot = manager.snapshot("backup_bookstore")?;
//! let outcome = manager.prune(5);
//! ```

mod manager;

pub use manager::{BackupInfo, BackupManager, PruneFailure, PruneOutcome};
