//! Storage initialization
//!
//! Creates the schema on first use and applies the optional seed script.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{BookstoreError, BookstoreResult};

use super::database::Database;

/// Schema for the single `books` table. Idempotent.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    publication_year INTEGER,
    price REAL
);
";

/// `PRAGMA user_version` value recorded once the seed script has run
const SEEDED_VERSION: i32 = 1;

/// Create the schema if missing and apply the seed script.
///
/// The seed script is executed verbatim, once per database file: a marker in
/// `user_version` keeps later runs from applying it again. Returns whether the
/// script ran during this call.
pub fn initialize_database(db: &Database, seed_script: Option<&Path>) -> BookstoreResult<bool> {
    db.with_connection(|conn| conn.execute_batch(SCHEMA_SQL))?;

    let Some(seed_path) = seed_script.filter(|p| p.is_file()) else {
        return Ok(false);
    };

    if db.with_connection(seed_version)? >= SEEDED_VERSION {
        tracing::debug!(path = %seed_path.display(), "seed script already applied");
        return Ok(false);
    }

    let sql = std::fs::read_to_string(seed_path).map_err(|e| {
        BookstoreError::Seed(format!("Failed to read {}: {}", seed_path.display(), e))
    })?;

    db.with_connection(|conn| {
        conn.execute_batch(&sql)?;
        conn.pragma_update(None, "user_version", SEEDED_VERSION)
    })
    .map_err(|e| BookstoreError::Seed(format!("{}: {}", seed_path.display(), e)))?;

    tracing::info!(path = %seed_path.display(), "applied seed script");
    Ok(true)
}

fn seed_version(conn: &Connection) -> rusqlite::Result<i32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}
