//! Backup manager for the bookstore inventory
//!
//! Snapshots are byte copies of the database file named
//! `{prefix}_{YYYY-MM-DD_HH-MM-SS}.{ext}`. Retention keeps the newest N by
//! modification time and removes the rest on a best-effort basis.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Local};
use crate::config::paths::BookstorePaths;
use crate::error::{BookstoreError, BookstoreResult};

/// Extension used when the database file has none
const DEFAULT_EXTENSION: &str = "db";

/// Metadata about a snapshot file
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Snapshot filename
    pub filename: String,
    /// Full path to the snapshot
    pub path: PathBuf,
    /// Last modification time, used for retention ordering
    pub modified: DateTime<Local>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// A snapshot that could not be inspected or removed during pruning
#[derive(Debug, Clone)]
pub struct PruneFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a retention pass
#[derive(Debug, Clone, Default)]
pub struct PruneOutcome {
    /// Snapshots retained
    pub kept: usize,
    /// Snapshots deleted
    pub removed: Vec<PathBuf>,
    /// Failures that were logged and skipped
    pub failures: Vec<PruneFailure>,
}

impl PruneOutcome {
    /// True when every selected snapshot was handled without error
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Manages snapshot creation and retention
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Live database file
    db_path: PathBuf,
    /// Snapshot file extension (taken from the database file)
    extension: String,
    /// Serializes snapshot creation against pruning
    lock: Mutex<()>,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: &BookstorePaths) -> Self {
        let db_path = paths.db_path().to_path_buf();
        let extension = db_path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        Self {
            backup_dir: paths.backup_dir().to_path_buf(),
            db_path,
            extension,
            lock: Mutex::new(()),
        }
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// File name of a snapshot taken at `at`
    pub fn snapshot_file_name(&self, prefix: &str, at: DateTime<Local>) -> String {
        format!(
            "{}_{}.{}",
            prefix,
            at.format("%Y-%m-%d_%H-%M-%S"),
            self.extension
        )
    }

    /// Copy the live database into a timestamped snapshot.
    ///
    /// If the database file does not exist yet, nothing is written and the
    /// would-be destination is returned. A second snapshot within the same
    /// second overwrites the first.
    pub fn snapshot(&self, prefix: &str) -> BookstoreResult<PathBuf> {
        let _guard = self.lock();

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            BookstoreError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let dest = self
            .backup_dir
            .join(self.snapshot_file_name(prefix, Local::now()));

        if !self.db_path.exists() {
            tracing::debug!(dest = %dest.display(), "database missing, snapshot skipped");
            return Ok(dest);
        }

        fs::copy(&self.db_path, &dest).map_err(|e| {
            BookstoreError::Io(format!("Failed to write snapshot {}: {}", dest.display(), e))
        })?;

        if let Err(e) = preserve_modified(&self.db_path, &dest) {
            tracing::warn!(dest = %dest.display(), error = %e, "could not preserve snapshot mtime");
        }

        tracing::info!(dest = %dest.display(), "created snapshot");
        Ok(dest)
    }

    /// Keep the `keep` newest snapshots and delete the rest.
    ///
    /// Never fails: every problem is logged and recorded in the outcome.
    pub fn prune(&self, keep: usize) -> PruneOutcome {
        let _guard = self.lock();
        let mut outcome = PruneOutcome::default();

        let entries = match self.scan() {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return outcome,
            Err(e) => {
                tracing::warn!(dir = %self.backup_dir.display(), error = %e, "could not list backups");
                outcome.failures.push(PruneFailure {
                    path: self.backup_dir.clone(),
                    reason: e.to_string(),
                });
                return outcome;
            }
        };

        let mut backups = Vec::new();
        for entry in entries {
            match entry {
                Ok(info) => backups.push(info),
                Err(failure) => outcome.failures.push(failure),
            }
        }
        sort_newest_first(&mut backups);

        outcome.kept = backups.len().min(keep);
        for backup in backups.into_iter().skip(keep) {
            match fs::remove_file(&backup.path) {
                Ok(()) => {
                    tracing::debug!(path = %backup.path.display(), "pruned snapshot");
                    outcome.removed.push(backup.path);
                }
                Err(e) => {
                    tracing::warn!(path = %backup.path.display(), error = %e, "could not prune snapshot");
                    outcome.failures.push(PruneFailure {
                        path: backup.path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        outcome
    }

    /// List all snapshots, newest first
    pub fn list_backups(&self) -> BookstoreResult<Vec<BackupInfo>> {
        let _guard = self.lock();

        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = self.scan().map_err(|e| {
            BookstoreError::Io(format!("Failed to read backup directory: {}", e))
        })?;

        let mut backups: Vec<BackupInfo> = entries.into_iter().filter_map(Result::ok).collect();
        sort_newest_first(&mut backups);
        Ok(backups)
    }

    /// Get the most recent snapshot
    pub fn get_latest_backup(&self) -> BookstoreResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    /// Read every snapshot-looking file in the backup directory
    fn scan(&self) -> io::Result<Vec<Result<BackupInfo, PruneFailure>>> {
        let mut entries = Vec::new();
        // The backup directory may be the one holding the live database.
        let live_db = fs::canonicalize(&self.db_path).ok();

        for entry in fs::read_dir(&self.backup_dir)? {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    entries.push(Err(PruneFailure {
                        path: self.backup_dir.clone(),
                        reason: e.to_string(),
                    }));
                    continue;
                }
            };

            if !path.extension().is_some_and(|ext| ext == self.extension.as_str()) {
                continue;
            }
            if live_db.is_some() && fs::canonicalize(&path).ok() == live_db {
                continue;
            }

            match backup_info(&path) {
                Ok(Some(info)) => entries.push(Ok(info)),
                Ok(None) => {}
                Err(e) => entries.push(Err(PruneFailure {
                    path,
                    reason: e.to_string(),
                })),
            }
        }

        Ok(entries)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn backup_info(path: &Path) -> io::Result<Option<BackupInfo>> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Ok(None);
    }

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        modified: DateTime::from(metadata.modified()?),
        size_bytes: metadata.len(),
    }))
}

fn sort_newest_first(backups: &mut [BackupInfo]) {
    backups.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| b.filename.cmp(&a.filename))
    });
}

/// Carry the source modification time over to the copy
fn preserve_modified(src: &Path, dest: &Path) -> io::Result<()> {
    let modified = fs::metadata(src)?.modified()?;
    let file = fs::OpenOptions::new().write(true).open(dest)?;
    file.set_modified(modified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    const PREFIX: &str = "backup_bookstore";

    fn create_test_manager() -> (BackupManager, BookstorePaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookstorePaths::with_base_dir(temp_dir.path());
        let manager = BackupManager::new(&paths);
        (manager, paths, temp_dir)
    }

    fn write_db(paths: &BookstorePaths, contents: &[u8]) {
        fs::create_dir_all(paths.db_dir()).unwrap();
        fs::write(paths.db_path(), contents).unwrap();
    }

    /// Place an older snapshot in the backup directory, `age_hours` in the past
    fn write_old_snapshot(paths: &BookstorePaths, name: &str, age_hours: u64) -> PathBuf {
        fs::create_dir_all(paths.backup_dir()).unwrap();
        let path = paths.backup_dir().join(name);
        fs::write(&path, b"old").unwrap();
        let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(age_hours * 3600))
            .unwrap();
        path
    }

    #[test]
    fn test_snapshot_file_name() {
        let (manager, _paths, _temp) = create_test_manager();
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            manager.snapshot_file_name("backup_bookstore", at),
            "backup_bookstore_2024-03-09_07-05-01.db"
        );
    }

    #[test]
    fn test_snapshot_without_database_is_noop() {
        let (manager, paths, _temp) = create_test_manager();

        let dest = manager.snapshot(PREFIX).unwrap();

        assert!(!dest.exists());
        assert_eq!(dest.parent().unwrap(), paths.backup_dir());
        assert!(paths.backup_dir().exists());
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_copies_database() {
        let (manager, paths, _temp) = create_test_manager();
        write_db(&paths, b"sqlite bytes");

        let dest = manager.snapshot(PREFIX).unwrap();

        assert!(dest.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"sqlite bytes");
        let name = dest.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("backup_bookstore_"));
        assert!(name.ends_with(".db"));
    }

    #[test]
    fn test_snapshot_preserves_modification_time() {
        let (manager, paths, _temp) = create_test_manager();
        write_db(&paths, b"sqlite bytes");
        let then = SystemTime::now() - Duration::from_secs(86_400);
        fs::OpenOptions::new()
            .write(true)
            .open(paths.db_path())
            .unwrap()
            .set_modified(then)
            .unwrap();

        let dest = manager.snapshot(PREFIX).unwrap();

        let copied = fs::metadata(&dest).unwrap().modified().unwrap();
        let original = fs::metadata(paths.db_path()).unwrap().modified().unwrap();
        assert_eq!(copied, original);
    }

    #[test]
    fn test_snapshot_then_prune_one_keeps_newest() {
        let (manager, paths, _temp) = create_test_manager();
        write_db(&paths, b"current");
        write_old_snapshot(&paths, "backup_bookstore_2020-01-01_00-00-00.db", 72);
        write_old_snapshot(&paths, "backup_bookstore_2020-01-02_00-00-00.db", 48);
        write_old_snapshot(&paths, "backup_bookstore_2020-01-03_00-00-00.db", 24);

        let newest = manager.snapshot(PREFIX).unwrap();
        let outcome = manager.prune(1);

        assert!(outcome.is_clean());
        assert_eq!(outcome.kept, 1);
        assert_eq!(outcome.removed.len(), 3);

        let remaining = manager.list_backups().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].path, newest);
    }

    #[test]
    fn test_prune_keeps_most_recent_by_mtime() {
        let (manager, paths, _temp) = create_test_manager();
        // Names deliberately disagree with ages; mtime decides.
        let young = write_old_snapshot(&paths, "a.db", 1);
        let middle = write_old_snapshot(&paths, "b.db", 2);
        let old = write_old_snapshot(&paths, "c.db", 3);

        let outcome = manager.prune(2);

        assert_eq!(outcome.removed, vec![old.clone()]);
        assert!(young.exists());
        assert!(middle.exists());
        assert!(!old.exists());
    }

    #[test]
    fn test_prune_ignores_other_files() {
        let (manager, paths, _temp) = create_test_manager();
        write_old_snapshot(&paths, "one.db", 2);
        write_old_snapshot(&paths, "two.db", 1);
        let notes = paths.backup_dir().join("notes.txt");
        fs::write(&notes, b"keep me").unwrap();

        let outcome = manager.prune(0);

        assert_eq!(outcome.removed.len(), 2);
        assert!(notes.exists());
    }

    #[test]
    fn test_prune_under_limit_removes_nothing() {
        let (manager, paths, _temp) = create_test_manager();
        write_old_snapshot(&paths, "one.db", 1);

        let outcome = manager.prune(5);

        assert_eq!(outcome.kept, 1);
        assert!(outcome.removed.is_empty());
    }

    #[test]
    fn test_prune_missing_directory_is_quiet() {
        let (manager, _paths, _temp) = create_test_manager();

        let outcome = manager.prune(5);

        assert!(outcome.is_clean());
        assert_eq!(outcome.kept, 0);
    }

    #[test]
    fn test_get_latest_backup() {
        let (manager, paths, _temp) = create_test_manager();
        assert!(manager.get_latest_backup().unwrap().is_none());

        write_old_snapshot(&paths, "old.db", 5);
        write_db(&paths, b"current");
        let path = manager.snapshot(PREFIX).unwrap();

        let latest = manager.get_latest_backup().unwrap().unwrap();
        assert_eq!(latest.path, path);
        assert_eq!(latest.size_bytes, 7);
    }

    #[test]
    fn test_live_database_in_backup_dir_is_never_pruned() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("shared");
        let paths = BookstorePaths::new(
            dir.join("bookstore.db"),
            None,
            dir.clone(),
            temp_dir.path().join("exports"),
        );
        let manager = BackupManager::new(&paths);
        write_db(&paths, b"live");
        manager.snapshot(PREFIX).unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert!(backups[0].filename.starts_with(PREFIX));

        let outcome = manager.prune(0);

        assert_eq!(outcome.removed.len(), 1);
        assert_eq!(fs::read(paths.db_path()).unwrap(), b"live");
    }
}
