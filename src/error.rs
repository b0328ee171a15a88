//! Custom error types for the bookstore inventory
//!
//! Hard failures are variants of [`BookstoreError`]. Expected irregularities
//! (a missing id, an unparseable import field, a snapshot that could not be
//! pruned) are reported as values by the operations themselves and never
//! show up here.

use thiserror::Error;

/// The main error type for bookstore operations
#[derive(Error, Debug)]
pub enum BookstoreError {
    /// The database file or its directory cannot be created, opened, read or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The seed script failed to execute
    #[error("Seed script error: {0}")]
    Seed(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// PDF report rendering errors
    #[error("Report error: {0}")]
    Report(String),
}

impl BookstoreError {
    /// Check if this is a storage failure
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<std::io::Error> for BookstoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for BookstoreError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<rusqlite::Error> for BookstoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}

/// Result type alias for bookstore operations
pub type BookstoreResult<T> = Result<T, BookstoreError>;
