//! Storage module for the destination table
//!
//! This module handles all database operations for the pipeline:
//! - Recreating the `books` table at the start of each load
//! - Inserting scraped records one statement at a time
//! - Reading rows back for export and statistics

mod schema;
mod sqlite;
mod traits;

pub use schema::{BOOKS_TABLE, BOOK_COLUMNS};
pub use sqlite::SqliteStorage;
pub use traits::{BookStore, StorageError, StorageResult};

use crate::catalog::BookRecord;
use crate::pipeline::Stage;
use crate::FolioError;
use std::path::Path;

/// Opens the storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
pub fn open_storage(path: &Path) -> Result<SqliteStorage, FolioError> {
    Ok(SqliteStorage::new(path)?)
}

/// A row read back from the destination table
///
/// Every text column is nullable in the schema, so each field is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub category: Option<String>,
}

/// Loads a crawl's records into the destination table
///
/// Refuses an empty collection before touching the table, so a crawl that
/// found nothing never wipes the previous run's data. Otherwise the table is
/// dropped and recreated and every record is inserted in order.
///
/// # Returns
///
/// * `Ok(usize)` - Number of rows inserted
/// * `Err(FolioError::EmptyResult)` - `books` was empty; nothing was written
/// * `Err(FolioError::Storage)` - A statement failed; rows inserted so far remain
pub fn load_books(store: &mut dyn BookStore, books: &[BookRecord]) -> Result<usize, FolioError> {
    if books.is_empty() {
        return Err(FolioError::EmptyResult);
    }

    {
        let _stage = Stage::CreateTable.span().entered();
        tracing::info!("Recreating table '{}'", BOOKS_TABLE);
        store.recreate_table()?;
    }

    let _stage = Stage::Insert.span().entered();
    for (index, book) in books.iter().enumerate() {
        store.insert_book(book)?;
        if (index + 1) % 250 == 0 {
            tracing::debug!("Inserted {}/{} books", index + 1, books.len());
        }
    }

    tracing::info!("Inserted {} books into '{}'", books.len(), BOOKS_TABLE);
    Ok(books.len())
}
