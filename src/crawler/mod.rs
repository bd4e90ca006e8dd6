//! Crawler module for fetching and extracting catalog pages
//!
//! This module contains the crawl logic, including:
//! - HTTP fetching with timeout and retry
//! - HTML parsing of the landing page and category listings
//! - The sequential category and pagination loop

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, CategoryOutcome, Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, fetch_page, FetchError, RetryPolicy};
pub use parser::{parse_categories, parse_listing, ParseError};
