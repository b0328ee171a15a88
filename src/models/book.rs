//! Book model
//!
//! The single entity of the inventory, plus the lenient field coercions shared
//! by the CSV import and the command surface.

use serde::{Deserialize, Serialize};

use super::ids::BookId;

/// A stored book record
///
/// Field order matches the exchange file header:
/// `id,title,author,publication_year,price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Publication year; `None` when unknown or unparseable at input time
    pub publication_year: Option<i64>,
    pub price: f64,
}

/// A book that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publication_year: Option<i64>,
    pub price: f64,
}

impl NewBook {
    /// Create a new unsaved book
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: Option<i64>,
        price: f64,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publication_year,
            price,
        }
    }
}

impl Book {
    /// Publication year for display: the number, or an empty string
    pub fn year_label(&self) -> String {
        self.publication_year
            .map(|year| year.to_string())
            .unwrap_or_default()
    }

    /// Price formatted to two decimals
    pub fn price_label(&self) -> String {
        format!("{:.2}", self.price)
    }

    /// Drop the id, keeping the record content
    pub fn content(&self) -> NewBook {
        NewBook::new(
            self.title.clone(),
            self.author.clone(),
            self.publication_year,
            self.price,
        )
    }
}

/// Coerce free text into a publication year.
///
/// Blank or non-integer input means "no value"; it never rejects the record.
pub fn parse_year(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

/// Coerce free text into a price.
///
/// Returns `None` for blank or non-numeric input so each caller can pick its
/// own fallback.
pub fn parse_price(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}
