//! folio-harvest: a book-catalog scraping pipeline
//!
//! This crate crawls a paginated book catalog, loads the extracted records into
//! a SQLite table and exports the table to a spreadsheet. The run is a fixed
//! four-stage sequence: fetch, create table, insert, export.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;
pub mod pipeline;
pub mod storage;

use thiserror::Error;

/// Main error type for folio-harvest operations
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Parse error: {0}")]
    Parse(#[from] crawler::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("No book records were scraped; refusing to load an empty table")]
    EmptyResult,

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for folio-harvest operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{BookRecord, CategoryLink, ListingPage, Rating};
pub use config::Config;
pub use pipeline::{run_pipeline, RunReport};
