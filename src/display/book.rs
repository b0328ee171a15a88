//! Book display formatting
//!
//! Formats record sets as terminal tables.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Book;

#[derive(Tabled)]
struct BookRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Price")]
    price: String,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year_label(),
            price: book.price_label(),
        }
    }
}

/// Format a list of books as a grid table
pub fn format_book_table(books: &[Book]) -> String {
    if books.is_empty() {
        return "No books found.".to_string();
    }

    let mut table = Table::new(books.iter().map(BookRow::from));
    table.with(Style::modern());
    table.to_string()
}

/// Format a single book on one line
pub fn format_book_line(book: &Book) -> String {
    let year = match book.publication_year {
        Some(year) => format!(" ({})", year),
        None => String::new(),
    };
    format!(
        "#{} {} by {}{} - {}",
        book.id,
        book.title,
        book.author,
        year,
        book.price_label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookId;

    fn dune() -> Book {
        Book {
            id: BookId::new(1),
            title: "Dune".into(),
            author: "Herbert".into(),
            publication_year: Some(1965),
            price: 39.9,
        }
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_book_table(&[]), "No books found.");
    }

    #[test]
    fn test_table_contains_fields() {
        let table = format_book_table(&[dune()]);
        for expected in ["ID", "Title", "Dune", "Herbert", "1965", "39.90"] {
            assert!(table.contains(expected), "missing {expected} in\n{table}");
        }
    }

    #[test]
    fn test_book_line() {
        assert_eq!(format_book_line(&dune()), "#1 Dune by Herbert (1965) - 39.90");
    }
}
