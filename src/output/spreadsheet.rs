//! Spreadsheet export of the destination table
//!
//! The report is an Excel workbook with a single `Sheet1` worksheet: a header
//! row naming the table columns, then one row per stored book. There is no
//! index column and no styling. A report path ending in `.csv` gets a CSV file
//! instead, prefixed with a UTF-8 byte order mark so spreadsheet applications
//! decode the currency symbols correctly.

use crate::output::OutputResult;
use crate::storage::{BookRow, BookStore, BOOK_COLUMNS};
use rust_xlsxwriter::Workbook;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// UTF-8 byte order mark written at the start of CSV reports
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// File format of the exported report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Csv,
}

impl ReportFormat {
    /// Picks the format from the report path extension
    ///
    /// `.csv` (any case) selects CSV; everything else is written as a workbook.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Xlsx,
        }
    }
}

/// Exports every row of the destination table to `path`
///
/// An existing file at `path` is overwritten.
///
/// # Returns
///
/// * `Ok(usize)` - Number of data rows written (excluding the header)
/// * `Err(OutputError)` - Reading the table or writing the file failed
pub fn export_report(store: &dyn BookStore, path: &Path) -> OutputResult<usize> {
    let rows = store.fetch_all()?;

    let format = ReportFormat::from_path(path);
    let written = match format {
        ReportFormat::Xlsx => write_workbook(&rows, path)?,
        ReportFormat::Csv => write_report(&rows, File::create(path)?)?,
    };

    tracing::info!("Wrote {} rows to {} ({:?})", written, path.display(), format);
    Ok(written)
}

/// Writes rows to an xlsx workbook at `path`
///
/// `id` is stored as a number and every other column as text. Missing values
/// are left as blank cells.
pub fn write_workbook(rows: &[BookRow], path: &Path) -> OutputResult<usize> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in (0u16..).zip(BOOK_COLUMNS) {
        worksheet.write_string(0, col, name)?;
    }

    for (row_num, row) in (1u32..).zip(rows) {
        worksheet.write_number(row_num, 0, row.id as f64)?;

        let text_columns = [&row.title, &row.author, &row.price, &row.rating, &row.category];
        for (col, value) in (1u16..).zip(text_columns) {
            if let Some(value) = value {
                worksheet.write_string(row_num, col, value.as_str())?;
            }
        }
    }

    workbook.save(path)?;
    Ok(rows.len())
}

/// Writes rows as BOM-prefixed CSV to any writer
pub fn write_report<W: Write>(rows: &[BookRow], mut writer: W) -> OutputResult<usize> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(BOOK_COLUMNS)?;

    for row in rows {
        csv_writer.write_record([
            row.id.to_string().as_str(),
            row.title.as_deref().unwrap_or_default(),
            row.author.as_deref().unwrap_or_default(),
            row.price.as_deref().unwrap_or_default(),
            row.rating.as_deref().unwrap_or_default(),
            row.category.as_deref().unwrap_or_default(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(rows.len())
}
