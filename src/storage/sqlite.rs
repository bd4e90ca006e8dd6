//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the BookStore trait.

use crate::catalog::BookRecord;
use crate::storage::schema::{
    books_table_exists, recreate_books_table, BOOKS_TABLE, INSERT_BOOK_SQL, SELECT_BOOKS_SQL,
};
use crate::storage::traits::{BookStore, StorageError, StorageResult};
use crate::storage::BookRow;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the database file at `path`
    ///
    /// The destination table is not touched until `recreate_table` is called.
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    fn ensure_table(&self) -> StorageResult<()> {
        if books_table_exists(&self.conn)? {
            Ok(())
        } else {
            Err(StorageError::MissingTable(BOOKS_TABLE.to_string()))
        }
    }

    fn grouped_counts(&self, column: &str) -> StorageResult<Vec<(String, u64)>> {
        self.ensure_table()?;

        let sql = format!(
            "SELECT COALESCE({col}, ''), COUNT(*) FROM books GROUP BY {col} ORDER BY {col}",
            col = column
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

impl BookStore for SqliteStorage {
    fn recreate_table(&mut self) -> StorageResult<()> {
        recreate_books_table(&self.conn)?;
        Ok(())
    }

    fn insert_book(&mut self, book: &BookRecord) -> StorageResult<i64> {
        let mut stmt = self.conn.prepare_cached(INSERT_BOOK_SQL)?;
        stmt.execute(params![
            book.title,
            book.author,
            book.price,
            book.rating.as_str(),
            book.category,
        ])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn fetch_all(&self) -> StorageResult<Vec<BookRow>> {
        self.ensure_table()?;

        let mut stmt = self.conn.prepare(SELECT_BOOKS_SQL)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(BookRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    author: row.get(2)?,
                    price: row.get(3)?,
                    rating: row.get(4)?,
                    category: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn count_books(&self) -> StorageResult<u64> {
        self.ensure_table()?;

        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_by_category(&self) -> StorageResult<Vec<(String, u64)>> {
        self.grouped_counts("category")
    }

    fn count_by_rating(&self) -> StorageResult<Vec<(String, u64)>> {
        self.grouped_counts("rating")
    }
}
