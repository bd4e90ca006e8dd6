//! folio-harvest main entry point
//!
//! This is the command-line interface for the book-catalog pipeline.

use anyhow::Context;
use clap::Parser;
use folio_harvest::config::{load_config_with_hash, Config};
use folio_harvest::output::{load_statistics, print_statistics};
use folio_harvest::pipeline::{run_export_only, run_pipeline, RunReport};
use folio_harvest::storage::open_storage;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// folio-harvest: scrape a book catalog into a table and a spreadsheet
///
/// Crawls every category of the catalog, recreates the `books` table with the
/// scraped records, and exports the table to a CSV report.
#[derive(Parser, Debug)]
#[command(name = "folio-harvest")]
#[command(version)]
#[command(about = "Scrape a book catalog into SQLite and a spreadsheet", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would run without crawling
    #[arg(long, conflicts_with_all = ["stats", "export_only"])]
    dry_run: bool,

    /// Show statistics from the existing table and exit
    #[arg(long, conflicts_with_all = ["dry_run", "export_only"])]
    stats: bool,

    /// Export the existing table to the report without crawling
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    export_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.export_only {
        let rows = run_export_only(&config).context("export failed")?;
        println!("✓ Exported {} rows to {}", rows, config.output.report_path);
    } else {
        let report = run_pipeline(&config).await.context("pipeline run failed")?;
        print_run_report(&report);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("folio_harvest=info,warn"),
            1 => EnvFilter::new("folio_harvest=debug,info"),
            2 => EnvFilter::new("folio_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== folio-harvest Dry Run ===\n");

    println!("Site:");
    println!("  Landing page: {}", config.site.landing_url);
    println!(
        "  Author: {}",
        config
            .site
            .author_placeholder
            .as_deref()
            .unwrap_or("(unavailable, stored as NULL)")
    );

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!(
        "  Timeout: {}s (connect {}s)",
        config.http.timeout_secs, config.http.connect_timeout_secs
    );
    println!(
        "  Retries: {} (delay {}ms)",
        config.http.max_retries, config.http.retry_delay_ms
    );

    println!("\nCrawl:");
    match config.crawl.max_categories {
        Some(max) => println!("  Categories: first {}", max),
        None => println!("  Categories: all"),
    }
    match config.crawl.max_pages_per_category {
        Some(max) => println!("  Pages per category: at most {}", max),
        None => println!("  Pages per category: until exhausted"),
    }
    println!("  Page delay: {}ms", config.crawl.page_delay_ms);
    println!("  On category error: {:?}", config.crawl.on_category_error);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Report: {}", config.output.report_path);

    println!("\n✓ Configuration is valid");
}

/// Handles --stats: shows statistics from the existing table
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let storage = open_storage(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}

/// Prints the end-of-run summary
fn print_run_report(report: &RunReport) {
    println!("=== Run Summary ===\n");
    println!("Started:  {}", report.started_at.to_rfc3339());
    println!("Finished: {}", report.finished_at.to_rfc3339());
    println!("Duration: {}s\n", report.duration_seconds());

    println!("Categories ({}):", report.crawl.categories.len());
    for category in &report.crawl.categories {
        match &category.error {
            Some(error) => println!(
                "  ✗ {} - {} books, {} pages, stopped: {}",
                category.name, category.books_kept, category.pages_visited, error
            ),
            None => println!(
                "  ✓ {} - {} books, {} pages",
                category.name, category.books_kept, category.pages_visited
            ),
        }
    }

    println!("\nInserted: {}", report.inserted);
    println!("Exported: {} rows to {}\n", report.exported, report.report_path.display());

    print_statistics(&report.stats);
}
