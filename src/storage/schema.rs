//! Destination table definition
//!
//! The `books` table is dropped and recreated on every run; nothing carries
//! over between runs.

/// Name of the destination table
pub const BOOKS_TABLE: &str = "books";

/// Drops and recreates the destination table
pub const RECREATE_BOOKS_SQL: &str = r#"
DROP TABLE IF EXISTS books;

CREATE TABLE books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    authors TEXT,
    price TEXT,
    rating TEXT,
    category TEXT
);
"#;

/// Inserts a single book
pub const INSERT_BOOK_SQL: &str =
    "INSERT INTO books (title, authors, price, rating, category) VALUES (?1, ?2, ?3, ?4, ?5)";

/// Reads every row back in insertion order
pub const SELECT_BOOKS_SQL: &str =
    "SELECT id, title, authors, price, rating, category FROM books ORDER BY id";

/// Column names of the destination table, in schema order
pub const BOOK_COLUMNS: [&str; 6] = ["id", "title", "authors", "price", "rating", "category"];

/// Drops and recreates the destination table
pub fn recreate_books_table(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(RECREATE_BOOKS_SQL)
}

/// Returns true if the destination table exists
pub fn books_table_exists(conn: &rusqlite::Connection) -> Result<bool, rusqlite::Error> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [BOOKS_TABLE],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
