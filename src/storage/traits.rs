//! Storage traits and error types
//!
//! This module defines the trait interface for the destination store and
//! associated error types.

use crate::catalog::BookRecord;
use crate::storage::BookRow;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Table '{0}' does not exist; run the pipeline first")]
    MissingTable(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for the destination store
///
/// Inserts are issued one statement per record with no surrounding
/// transaction: a failure partway leaves the rows inserted so far in place.
pub trait BookStore {
    /// Drops and recreates the destination table
    fn recreate_table(&mut self) -> StorageResult<()>;

    /// Inserts one record and returns its row ID
    fn insert_book(&mut self, book: &BookRecord) -> StorageResult<i64>;

    /// Reads every row back, in row ID order
    fn fetch_all(&self) -> StorageResult<Vec<BookRow>>;

    /// Counts the rows in the destination table
    fn count_books(&self) -> StorageResult<u64>;

    /// Counts rows per category, sorted by category name
    fn count_by_category(&self) -> StorageResult<Vec<(String, u64)>>;

    /// Counts rows per stored rating text, sorted by rating
    fn count_by_rating(&self) -> StorageResult<Vec<(String, u64)>>;
}
