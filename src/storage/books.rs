//! Book repository for SQLite storage
//!
//! Every operation is a single auto-committed statement.

use std::sync::Arc;

use rusqlite::types::ValueRef;
use rusqlite::{params, Row};

use crate::error::BookstoreResult;
use crate::models::{parse_price, parse_year, Book, BookId, NewBook};

use super::database::Database;

const SELECT_BOOK: &str = "SELECT id, title, author, publication_year, price FROM books";

/// Repository for book persistence
pub struct BookRepository {
    db: Arc<Database>,
}

impl BookRepository {
    /// Create a new book repository over a shared connection
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a book and return the id the store assigned to it
    pub fn add(&self, book: &NewBook) -> BookstoreResult<BookId> {
        let id = self.db.with_connection(|conn| {
            conn.execute(
                "INSERT INTO books (title, author, publication_year, price) VALUES (?1, ?2, ?3, ?4)",
                params![book.title, book.author, book.publication_year, book.price],
            )?;
            Ok(conn.last_insert_rowid())
        })?;

        tracing::debug!(id, title = %book.title, "inserted book");
        Ok(BookId::new(id))
    }

    /// Get all books, ordered by id
    pub fn list(&self) -> BookstoreResult<Vec<Book>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_BOOK} ORDER BY id"))?;
            let rows = stmt.query_map([], row_to_book)?;
            rows.collect()
        })
    }

    /// Get a book by id
    pub fn get(&self, id: BookId) -> BookstoreResult<Option<Book>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_BOOK} WHERE id = ?1"))?;
            let mut rows = stmt.query_map(params![id], row_to_book)?;
            rows.next().transpose()
        })
    }

    /// Change the price of a book. Returns `false` if no such id exists.
    pub fn update_price(&self, id: BookId, price: f64) -> BookstoreResult<bool> {
        let changed = self.db.with_connection(|conn| {
            conn.execute(
                "UPDATE books SET price = ?1 WHERE id = ?2",
                params![price, id],
            )
        })?;
        Ok(changed > 0)
    }

    /// Delete a book. Returns `false` if no such id exists.
    pub fn delete(&self, id: BookId) -> BookstoreResult<bool> {
        let changed = self
            .db
            .with_connection(|conn| conn.execute("DELETE FROM books WHERE id = ?1", params![id]))?;
        Ok(changed > 0)
    }

    /// Find books whose author contains `needle`, ordered by id.
    ///
    /// Uses SQLite `LIKE`, so ASCII letters match case-insensitively. Wildcards
    /// in the needle are matched literally.
    pub fn search_by_author(&self, needle: &str) -> BookstoreResult<Vec<Book>> {
        let pattern = format!("%{}%", escape_like(needle));
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_BOOK} WHERE author LIKE ?1 ESCAPE '\\' ORDER BY id"
            ))?;
            let rows = stmt.query_map(params![pattern], row_to_book)?;
            rows.collect()
        })
    }

    /// Remove every book. Returns how many rows were removed.
    pub fn clear_all(&self) -> BookstoreResult<usize> {
        let removed = self
            .db
            .with_connection(|conn| conn.execute("DELETE FROM books", []))?;
        tracing::info!(removed, "cleared all books");
        Ok(removed)
    }

    /// Number of stored books
    pub fn count(&self) -> BookstoreResult<usize> {
        let count: i64 = self
            .db
            .with_connection(|conn| conn.query_row("SELECT COUNT(*) FROM books", [], |r| r.get(0)))?;
        Ok(count as usize)
    }
}

fn row_to_book(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        publication_year: year_from_sql(row.get_ref(3)?),
        price: price_from_sql(row.get_ref(4)?),
    })
}

/// Column affinity does not stop a seed script from storing text here
fn year_from_sql(value: ValueRef<'_>) -> Option<i64> {
    match value {
        ValueRef::Integer(year) => Some(year),
        ValueRef::Text(text) => parse_year(&String::from_utf8_lossy(text)),
        _ => None,
    }
}

fn price_from_sql(value: ValueRef<'_>) -> f64 {
    match value {
        ValueRef::Real(price) => price,
        ValueRef::Integer(price) => price as f64,
        ValueRef::Text(text) => parse_price(&String::from_utf8_lossy(text)).unwrap_or_default(),
        _ => 0.0,
    }
}

fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
