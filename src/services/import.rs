//! CSV Import service
//!
//! Reads book rows from a header-driven CSV file. Columns are located by
//! name, so their order does not matter. A malformed field degrades to its
//! default instead of rejecting the row, and each row is inserted on its own.

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ByteRecord;

use crate::error::{BookstoreError, BookstoreResult};
use crate::models::{parse_price, parse_year, NewBook};
use crate::storage::Storage;

/// Column positions found in the header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub title: Option<usize>,
    pub author: Option<usize>,
    pub publication_year: Option<usize>,
    pub price: Option<usize>,
}

impl ColumnMapping {
    /// Locate the book columns in a header row.
    ///
    /// Names are compared case-insensitively after trimming; a leading UTF-8
    /// byte-order mark is ignored. Unknown columns (including `id`) are skipped.
    pub fn from_headers(headers: &ByteRecord) -> Self {
        let mut mapping = Self::default();

        for (index, raw) in headers.iter().enumerate() {
            let name = String::from_utf8_lossy(raw);
            let name = name.trim_start_matches('\u{feff}').trim().to_ascii_lowercase();
            let slot = match name.as_str() {
                "title" => &mut mapping.title,
                "author" => &mut mapping.author,
                "publication_year" => &mut mapping.publication_year,
                "price" => &mut mapping.price,
                _ => continue,
            };
            slot.get_or_insert(index);
        }

        mapping
    }
}

/// A parsed row, with a note of which fields had to fall back to defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub book: NewBook,
    /// Original row number in the CSV (1-based, excluding header)
    pub row_number: usize,
    /// Present but unparseable fields that were replaced by defaults
    pub degraded_fields: Vec<&'static str>,
}

impl ParsedRow {
    /// Build a row from a record, coercing every field
    pub fn from_record(record: &ByteRecord, mapping: &ColumnMapping, row_number: usize) -> Self {
        let mut degraded_fields = Vec::new();

        let title = field(record, mapping.title).map(Cow::into_owned).unwrap_or_default();
        let author = field(record, mapping.author).map(Cow::into_owned).unwrap_or_default();

        let publication_year = match non_blank(field(record, mapping.publication_year)) {
            Some(raw) => {
                let year = parse_year(&raw);
                if year.is_none() {
                    degraded_fields.push("publication_year");
                }
                year
            }
            None => None,
        };

        let price = match non_blank(field(record, mapping.price)) {
            Some(raw) => parse_price(&raw).unwrap_or_else(|| {
                degraded_fields.push("price");
                0.0
            }),
            None => 0.0,
        };

        Self {
            book: NewBook::new(title, author, publication_year, price),
            row_number,
            degraded_fields,
        }
    }
}

/// Result of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows inserted (every row read is inserted)
    pub imported: usize,
    /// Rows where at least one field fell back to its default
    pub degraded: usize,
}

/// Import books from any CSV source
pub fn import_books_csv<R: Read>(storage: &Storage, source: R) -> BookstoreResult<ImportSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let mapping = ColumnMapping::from_headers(reader.byte_headers()?);
    tracing::debug!(?mapping, "resolved import columns");

    let mut summary = ImportSummary::default();
    let mut record = ByteRecord::new();
    let mut row_number = 0;

    while reader.read_byte_record(&mut record)? {
        row_number += 1;
        let row = ParsedRow::from_record(&record, &mapping, row_number);

        if !row.degraded_fields.is_empty() {
            tracing::warn!(
                row = row.row_number,
                fields = ?row.degraded_fields,
                "unparseable fields replaced by defaults"
            );
            summary.degraded += 1;
        }

        storage.books.add(&row.book)?;
        summary.imported += 1;
    }

    tracing::info!(imported = summary.imported, degraded = summary.degraded, "import finished");
    Ok(summary)
}

/// Import books from a CSV file on disk
pub fn import_books_csv_file(storage: &Storage, path: &Path) -> BookstoreResult<ImportSummary> {
    let file = File::open(path).map_err(|e| {
        BookstoreError::Io(format!("Failed to open {}: {}", path.display(), e))
    })?;
    import_books_csv(storage, file)
}

fn field<'r>(record: &'r ByteRecord, index: Option<usize>) -> Option<Cow<'r, str>> {
    index
        .and_then(|i| record.get(i))
        .map(String::from_utf8_lossy)
}

fn non_blank(value: Option<Cow<'_, str>>) -> Option<Cow<'_, str>> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::export_books_csv;
    use crate::models::Book;
    use tempfile::TempDir;

    fn import_str(storage: &Storage, data: &str) -> ImportSummary {
        import_books_csv(storage, data.as_bytes()).unwrap()
    }

    #[test]
    fn test_column_mapping() {
        let headers = ByteRecord::from(vec!["\u{feff}ID", " Price ", "Title", "AUTHOR", "extra"]);
        let mapping = ColumnMapping::from_headers(&headers);

        assert_eq!(mapping.price, Some(1));
        assert_eq!(mapping.title, Some(2));
        assert_eq!(mapping.author, Some(3));
        assert_eq!(mapping.publication_year, None);
    }

    #[test]
    fn test_import_basic() {
        let storage = Storage::open_in_memory().unwrap();
        let summary = import_str(
            &storage,
            "title,author,publication_year,price\nDune,Herbert,1965,39.9\nEmma,Austen,1815,12.5\n",
        );

        assert_eq!(summary, ImportSummary { imported: 2, degraded: 0 });
        let books = storage.books.list().unwrap();
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[1].publication_year, Some(1815));
    }

    #[test]
    fn test_non_numeric_price_becomes_zero() {
        let storage = Storage::open_in_memory().unwrap();
        let summary = import_str(
            &storage,
            "title,author,publication_year,price\nDune,Herbert,1965,expensive\n",
        );

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.degraded, 1);
        assert_eq!(storage.books.list().unwrap()[0].price, 0.0);
    }

    #[test]
    fn test_bad_year_becomes_none() {
        let storage = Storage::open_in_memory().unwrap();
        import_str(
            &storage,
            "title,author,publication_year,price\nDune,Herbert,sixties,39.9\nEmma,Austen,,12.5\n",
        );

        let books = storage.books.list().unwrap();
        assert_eq!(books[0].publication_year, None);
        assert_eq!(books[0].price, 39.9);
        assert_eq!(books[1].publication_year, None);
    }

    #[test]
    fn test_missing_columns_use_defaults() {
        let storage = Storage::open_in_memory().unwrap();
        let summary = import_str(&storage, "title\nDune\n");

        assert_eq!(summary, ImportSummary { imported: 1, degraded: 0 });
        let book = &storage.books.list().unwrap()[0];
        assert_eq!(book.author, "");
        assert_eq!(book.publication_year, None);
        assert_eq!(book.price, 0.0);
    }

    #[test]
    fn test_short_and_long_rows_do_not_abort() {
        let storage = Storage::open_in_memory().unwrap();
        let summary = import_str(
            &storage,
            "title,author,publication_year,price\nDune,Herbert\nEmma,Austen,1815,12.5,surplus\nSolo\n",
        );

        assert_eq!(summary.imported, 3);
        let books = storage.books.list().unwrap();
        assert_eq!(books[0].price, 0.0);
        assert_eq!(books[1].price, 12.5);
        assert_eq!(books[2].author, "");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let storage = Storage::open_in_memory().unwrap();
        let mut data = b"title,author,price\n".to_vec();
        data.extend_from_slice(b"Caf\xe9,Someone,3\n");

        let summary = import_books_csv(&storage, data.as_slice()).unwrap();

        assert_eq!(summary.imported, 1);
        assert!(storage.books.list().unwrap()[0].title.starts_with("Caf"));
    }

    #[test]
    fn test_header_only_imports_nothing() {
        let storage = Storage::open_in_memory().unwrap();
        let summary = import_str(&storage, "id,title,author,publication_year,price\n");
        assert_eq!(summary.imported, 0);
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open_in_memory().unwrap();

        let err = import_books_csv_file(&storage, &temp_dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, BookstoreError::Io(_)));
    }

    #[test]
    fn test_export_then_import_reproduces_content() {
        let source = Storage::open_in_memory().unwrap();
        for book in [
            NewBook::new("Dune", "Herbert", Some(1965), 39.9),
            NewBook::new("Good Omens", "Pratchett, Gaiman", None, 15.0),
            NewBook::new("", "", Some(0), 0.0),
        ] {
            source.books.add(&book).unwrap();
        }
        let mut exported = Vec::new();
        export_books_csv(&source, &mut exported).unwrap();

        let target = Storage::open_in_memory().unwrap();
        let summary = import_books_csv(&target, exported.as_slice()).unwrap();

        assert_eq!(summary.imported, 3);
        let content = |books: Vec<Book>| books.iter().map(Book::content).collect::<Vec<_>>();
        assert_eq!(
            content(target.books.list().unwrap()),
            content(source.books.list().unwrap())
        );
    }
}
