//! SQLite storage layer for LinkStash.
//!
//! This module provides the persistence layer using SQLite with:
//! - WAL mode for concurrent reads
//! - An IMMEDIATE-transaction insert for duplicate-URL protection
//!
//! # Submodules
//!
//! - [`schema`] - Database schema definitions
//! - [`sqlite`] - Main SQLite storage implementation

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStorage;
