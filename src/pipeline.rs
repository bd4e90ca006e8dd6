//! The four-stage run: fetch, create table, insert, export
//!
//! Stages run strictly in order and the first failure ends the run. There is
//! no resume: a failed run is retried from the top by whoever scheduled it.

use crate::config::Config;
use crate::crawler::{run_crawl, CrawlOutcome};
use crate::output::{export_report, load_statistics, TableStatistics};
use crate::storage::{load_books, open_storage};
use crate::FolioError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::Instrument;

/// A pipeline stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    CreateTable,
    Insert,
    Export,
}

impl Stage {
    /// Stable name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch_book_data",
            Self::CreateTable => "create_table",
            Self::Insert => "insert_book_data",
            Self::Export => "export_report",
        }
    }

    /// The `stage` span every log line of this stage is recorded under
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!("stage", name = self.name())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a completed run did
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Crawl results, including per-category outcomes
    pub crawl: CrawlOutcome,

    /// Rows inserted into the destination table
    pub inserted: usize,

    /// Rows written to the report (excluding the header)
    pub exported: usize,

    /// Where the report was written
    pub report_path: PathBuf,

    /// Contents of the table after the load
    pub stats: TableStatistics,
}

impl RunReport {
    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Runs every stage of the pipeline
///
/// # Errors
///
/// * `FolioError::Fetch` / `FolioError::Parse` - the landing page could not be crawled
/// * `FolioError::EmptyResult` - the crawl produced no books; the table is left as it was
/// * `FolioError::Storage` - the table could not be recreated or a row failed to insert
/// * `FolioError::Output` - the report could not be written
pub async fn run_pipeline(config: &Config) -> Result<RunReport, FolioError> {
    let started_at = Utc::now();

    tracing::info!("Stage {}: crawling {}", Stage::Fetch, config.site.landing_url);
    let crawl = run_crawl(config).instrument(Stage::Fetch.span()).await?;

    // The empty guard runs before the table is dropped (see load_books)
    let mut storage = open_storage(Path::new(&config.output.database_path))?;
    tracing::info!(
        "Stages {} and {}: loading {} books into {}",
        Stage::CreateTable,
        Stage::Insert,
        crawl.books.len(),
        config.output.database_path
    );
    let inserted = load_books(&mut storage, &crawl.books)?;

    let report_path = PathBuf::from(&config.output.report_path);
    let exported = {
        let _stage = Stage::Export.span().entered();
        tracing::info!("Stage {}: writing {}", Stage::Export, report_path.display());
        export_report(&storage, &report_path)?
    };
    let stats = load_statistics(&storage)?;

    let report = RunReport {
        started_at,
        finished_at: Utc::now(),
        crawl,
        inserted,
        exported,
        report_path,
        stats,
    };

    tracing::info!(
        "Run finished in {}s: {} books inserted, {} rows exported",
        report.duration_seconds(),
        report.inserted,
        report.exported
    );

    Ok(report)
}

/// Runs only the export stage against the existing table
pub fn run_export_only(config: &Config) -> Result<usize, FolioError> {
    let storage = open_storage(Path::new(&config.output.database_path))?;
    let _stage = Stage::Export.span().entered();
    tracing::info!("Stage {}: writing {}", Stage::Export, config.output.report_path);
    Ok(export_report(&storage, Path::new(&config.output.report_path))?)
}
