//! Core data models for the bookstore inventory
//!
//! A single entity: the book record, with its store-assigned id.

pub mod book;
pub mod ids;

pub use book::{parse_price, parse_year, Book, NewBook};
pub use ids::BookId;
