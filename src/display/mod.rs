//! Display formatting for terminal output
//!
//! Provides utilities for formatting books and backups for terminal display.

pub mod backup;
pub mod book;

pub use backup::format_backup_list;
pub use book::{format_book_line, format_book_table};
