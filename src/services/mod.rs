//! Service layer for the bookstore inventory
//!
//! The service layer sits on top of storage and backups: it sequences the
//! backup cycle around mutations and implements the CSV import.

pub mod import;
pub mod inventory;

pub use import::{import_books_csv, import_books_csv_file, ColumnMapping, ImportSummary, ParsedRow};
pub use inventory::InventoryService;
