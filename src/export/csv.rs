//! CSV Export functionality
//!
//! Writes the full record set as `id,title,author,publication_year,price`,
//! one row per book in id order. Fields are quoted only when they need it.

use std::io::Write;

use crate::error::{BookstoreError, BookstoreResult};
use crate::storage::Storage;

/// Header row of the exchange file
pub const CSV_HEADER: [&str; 5] = ["id", "title", "author", "publication_year", "price"];

/// Export all books to CSV. Returns the number of data rows written.
///
/// An empty store still produces the header row.
pub fn export_books_csv<W: Write>(storage: &Storage, writer: &mut W) -> BookstoreResult<usize> {
    let books = storage.books.list()?;

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for book in &books {
        csv_writer.serialize(book)?;
    }

    csv_writer
        .flush()
        .map_err(|e| BookstoreError::Csv(format!("Failed to flush CSV output: {}", e)))?;

    Ok(books.len())
}
