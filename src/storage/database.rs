//! SQLite connection handle
//!
//! One long-lived connection guarded by a mutex. Each closure passed to
//! [`Database::with_connection`] runs with exclusive access, so every logical
//! operation is atomic with respect to the database file.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use crate::error::{BookstoreError, BookstoreResult};

/// Shared SQLite connection
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create the database file, creating its directory first
    pub fn open(path: &Path) -> BookstoreResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                BookstoreError::StorageUnavailable(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let conn = Connection::open(path).map_err(|e| {
            BookstoreError::StorageUnavailable(format!(
                "Failed to open database {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database. Useful for testing.
    pub fn open_in_memory() -> BookstoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with exclusive access to the connection
    pub fn with_connection<T, F>(&self, f: F) -> BookstoreResult<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| {
            BookstoreError::StorageUnavailable(format!("Failed to acquire database lock: {}", e))
        })?;

        f(&conn).map_err(BookstoreError::from)
    }
}
