//! Inventory service
//!
//! Entry point for every command. Destructive operations run inside the
//! backup cycle: snapshot the database, apply the mutation, prune old
//! snapshots. Pruning runs whatever the mutation's outcome. Reads bypass the
//! cycle.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::backup::{BackupManager, PruneOutcome};
use crate::config::settings::Settings;
use crate::error::{BookstoreError, BookstoreResult};
use crate::export::{export_books_csv, plan_report, write_report_pdf};
use crate::models::{Book, BookId, NewBook};
use crate::storage::Storage;

use super::import::{import_books_csv_file, ImportSummary};

/// Service for inventory operations
pub struct InventoryService<'a> {
    storage: &'a Storage,
    backups: &'a BackupManager,
    settings: &'a Settings,
}

impl<'a> InventoryService<'a> {
    /// Create a new inventory service
    pub fn new(storage: &'a Storage, backups: &'a BackupManager, settings: &'a Settings) -> Self {
        Self {
            storage,
            backups,
            settings,
        }
    }

    /// Add a book
    pub fn add(&self, book: &NewBook) -> BookstoreResult<BookId> {
        self.guarded("add", || self.storage.books.add(book))
    }

    /// Change a book's price. `false` means no book has that id.
    pub fn update_price(&self, id: BookId, price: f64) -> BookstoreResult<bool> {
        self.guarded("update-price", || self.storage.books.update_price(id, price))
    }

    /// Delete a book. `false` means no book has that id.
    pub fn delete(&self, id: BookId) -> BookstoreResult<bool> {
        self.guarded("delete", || self.storage.books.delete(id))
    }

    /// Remove every book. Returns how many were removed.
    pub fn clear_all(&self) -> BookstoreResult<usize> {
        self.guarded("clear", || self.storage.books.clear_all())
    }

    /// Import books from a CSV file
    pub fn import_csv(&self, path: &Path) -> BookstoreResult<ImportSummary> {
        self.guarded("import", || import_books_csv_file(self.storage, path))
    }

    /// All books, ordered by id
    pub fn list(&self) -> BookstoreResult<Vec<Book>> {
        self.storage.books.list()
    }

    /// A single book by id
    pub fn get(&self, id: BookId) -> BookstoreResult<Option<Book>> {
        self.storage.books.get(id)
    }

    /// Books whose author contains `needle`, ordered by id
    pub fn search_by_author(&self, needle: &str) -> BookstoreResult<Vec<Book>> {
        self.storage.books.search_by_author(needle)
    }

    /// Write every book to a CSV file and return its path
    pub fn export_csv(&self, path: &Path) -> BookstoreResult<PathBuf> {
        create_parent_dir(path)?;

        let file = File::create(path).map_err(|e| {
            BookstoreError::Io(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        let rows = export_books_csv(self.storage, &mut writer)?;
        writer.flush()?;

        tracing::info!(rows, path = %path.display(), "exported CSV");
        Ok(path.to_path_buf())
    }

    /// Render the PDF report. `None` when there are no books to report on.
    pub fn render_report(&self, path: &Path) -> BookstoreResult<Option<PathBuf>> {
        let books = self.storage.books.list()?;
        if books.is_empty() {
            return Ok(None);
        }

        create_parent_dir(path)?;
        let pages = plan_report(&self.settings.report_title, &books);
        write_report_pdf(&self.settings.report_title, &pages, path)?;

        tracing::info!(books = books.len(), pages = pages.len(), path = %path.display(), "rendered report");
        Ok(Some(path.to_path_buf()))
    }

    /// Take a snapshot on demand, then apply retention
    pub fn backup(&self) -> BookstoreResult<(PathBuf, PruneOutcome)> {
        let snapshot = self.backups.snapshot(&self.settings.backup_prefix)?;
        let outcome = self.backups.prune(self.settings.backup_keep);
        Ok((snapshot, outcome))
    }

    /// Apply retention without taking a snapshot
    pub fn prune(&self) -> PruneOutcome {
        self.backups.prune(self.settings.backup_keep)
    }

    /// Snapshot, mutate, prune
    fn guarded<T>(
        &self,
        operation: &str,
        mutation: impl FnOnce() -> BookstoreResult<T>,
    ) -> BookstoreResult<T> {
        let snapshot = self.backups.snapshot(&self.settings.backup_prefix)?;
        tracing::debug!(operation, snapshot = %snapshot.display(), "pre-mutation snapshot");

        let result = mutation();

        // Retention failures are recorded in the outcome and already logged.
        let _ = self.backups.prune(self.settings.backup_keep);

        if let Err(e) = &result {
            tracing::error!(operation, error = %e, "mutation failed");
        }
        result
    }
}

fn create_parent_dir(path: &Path) -> BookstoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            BookstoreError::Io(format!("Failed to create directory {}: {}", parent.display(), e))
        })?;
    }
    Ok(())
}
