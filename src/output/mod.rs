//! Output module for reports and statistics
//!
//! This module handles:
//! - Exporting the destination table to an xlsx workbook (or CSV)
//! - Reading back table statistics for display

mod spreadsheet;
pub mod stats;

pub use spreadsheet::{export_report, write_report, write_workbook, ReportFormat, UTF8_BOM};
pub use stats::{format_statistics, load_statistics, print_statistics, TableStatistics};

use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
