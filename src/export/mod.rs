//! Export module for the bookstore inventory
//!
//! Provides the read-only half of the exchange pipeline:
//! - CSV: the full record set, spreadsheet-compatible and re-importable
//! - PDF: a paginated report of the record set

pub mod csv;
pub mod pdf;

pub use self::csv::{export_books_csv, CSV_HEADER};
pub use pdf::{plan_report, write_report_pdf, ReportPage, TextItem};
