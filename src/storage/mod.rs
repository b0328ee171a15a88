//! Storage layer for the bookstore inventory
//!
//! Provides the SQLite handle, schema initialization and the book repository.

pub mod books;
pub mod database;
pub mod init;

pub use books::BookRepository;
pub use database::Database;
pub use init::initialize_database;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::BookstoreError;

/// Main storage coordinator that provides access to the repositories
pub struct Storage {
    db_path: Option<PathBuf>,
    db: Arc<Database>,
    pub books: BookRepository,
}

impl Storage {
    /// Open (or create) the database file at `db_path`
    pub fn open(db_path: &Path) -> Result<Self, BookstoreError> {
        let db = Arc::new(Database::open(db_path)?);
        tracing::debug!(path = %db_path.display(), "opened database");

        Ok(Self {
            db_path: Some(db_path.to_path_buf()),
            books: BookRepository::new(Arc::clone(&db)),
            db,
        })
    }

    /// Open an in-memory store with the schema in place. Useful for testing.
    pub fn open_in_memory() -> Result<Self, BookstoreError> {
        let db = Arc::new(Database::open_in_memory()?);
        initialize_database(&db, None)?;

        Ok(Self {
            db_path: None,
            books: BookRepository::new(Arc::clone(&db)),
            db,
        })
    }

    /// Create the schema if missing and apply the seed script, if any
    pub fn initialize(&self, seed_script: Option<&Path>) -> Result<bool, BookstoreError> {
        initialize_database(&self.db, seed_script)
    }

    /// Path of the database file, or `None` for an in-memory store
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBook;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("bookstore.db");

        let storage = Storage::open(&path).unwrap();
        storage.initialize(None).unwrap();

        assert!(path.exists());
        assert_eq!(storage.db_path(), Some(path.as_path()));
        assert_eq!(storage.books.count().unwrap(), 0);
    }

    #[test]
    fn test_data_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bookstore.db");

        {
            let storage = Storage::open(&path).unwrap();
            storage.initialize(None).unwrap();
            storage
                .books
                .add(&NewBook::new("Dune", "Herbert", Some(1965), 39.9))
                .unwrap();
        }

        let storage = Storage::open(&path).unwrap();
        storage.initialize(None).unwrap();
        assert_eq!(storage.books.list().unwrap()[0].title, "Dune");
    }
}
