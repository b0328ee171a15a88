//! Configuration module for the bookstore inventory
//!
//! This module provides configuration management including:
//! - Database, seed script, backup and export locations
//! - Settings persistence (backup naming, retention, default file names)

pub mod paths;
pub mod settings;

pub use paths::BookstorePaths;
pub use settings::Settings;
