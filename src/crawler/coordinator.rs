//! Crawl coordinator - category and pagination loop
//!
//! The coordinator fetches the landing page, then walks every category in
//! document order, following "next" links until a category is exhausted.
//! Everything runs sequentially: one request in flight at a time.

use crate::catalog::{BookRecord, CategoryLink, ListingPage};
use crate::config::{CategoryErrorPolicy, Config, CrawlConfig};
use crate::crawler::fetcher::{build_http_client, fetch_page, RetryPolicy};
use crate::crawler::parser::{parse_categories, parse_listing};
use crate::FolioError;
use reqwest::Client;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use url::Url;

/// How the pagination of a single category ended
#[derive(Debug, Clone)]
pub struct CategoryOutcome {
    /// Category display name
    pub name: String,

    /// Listing pages fetched successfully
    pub pages_visited: usize,

    /// Books kept from this category after applying the error policy
    pub books_kept: usize,

    /// The error that stopped pagination, if any
    pub error: Option<String>,
}

impl CategoryOutcome {
    /// Returns true if pagination was cut short by an error
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Result of a full crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    /// Every kept book, in category then page order
    pub books: Vec<BookRecord>,

    /// Per-category results, in crawl order
    pub categories: Vec<CategoryOutcome>,
}

impl CrawlOutcome {
    /// Number of categories whose pagination stopped on an error
    pub fn failed_categories(&self) -> usize {
        self.categories.iter().filter(|c| c.failed()).count()
    }

    /// Total listing pages fetched
    pub fn pages_visited(&self) -> usize {
        self.categories.iter().map(|c| c.pages_visited).sum()
    }
}

/// Books and bookkeeping collected while paginating one category
struct CategoryCrawl {
    books: Vec<BookRecord>,
    pages_visited: usize,
    error: Option<FolioError>,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    client: Client,
    retry: RetryPolicy,
    landing_url: Url,
    author: Option<String>,
    crawl: CrawlConfig,
}

impl Coordinator {
    /// Creates a new coordinator from the run configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(FolioError)` - The landing URL is invalid or the client failed to build
    pub fn new(config: &Config) -> Result<Self, FolioError> {
        let landing_url = Url::parse(&config.site.landing_url)?;
        let client = build_http_client(&config.http)?;

        Ok(Self {
            client,
            retry: RetryPolicy::from(&config.http),
            landing_url,
            author: config.site.author_placeholder.clone(),
            crawl: config.crawl.clone(),
        })
    }

    /// Runs the crawl
    ///
    /// A failure fetching or parsing the landing page aborts the crawl. A
    /// failure on a category page only stops that category; what happens to
    /// its books is decided by `on-category-error`.
    pub async fn run(&self) -> Result<CrawlOutcome, FolioError> {
        let start_time = Instant::now();

        tracing::info!("Fetching landing page {}", self.landing_url);
        let landing_html = fetch_page(&self.client, &self.landing_url, &self.retry).await?;
        let mut categories = parse_categories(&landing_html, &self.landing_url)?;

        if let Some(max) = self.crawl.max_categories {
            if categories.len() > max {
                tracing::info!("Limiting crawl to the first {} of {} categories", max, categories.len());
                categories.truncate(max);
            }
        }
        tracing::info!("Found {} categories", categories.len());

        let mut outcome = CrawlOutcome::default();

        for category in &categories {
            tracing::info!("Crawling category: {}", category.name);
            let crawl = self.crawl_category(category).await;

            let keep = match (&crawl.error, self.crawl.on_category_error) {
                (None, _) => true,
                (Some(_), CategoryErrorPolicy::KeepPartial) => true,
                (Some(_), CategoryErrorPolicy::DiscardCategory) => false,
            };

            if let Some(e) = &crawl.error {
                tracing::warn!(
                    "Category '{}' stopped after {} pages: {} ({} books {})",
                    category.name,
                    crawl.pages_visited,
                    e,
                    crawl.books.len(),
                    if keep { "kept" } else { "discarded" }
                );
            }

            let books_kept = if keep { crawl.books.len() } else { 0 };
            outcome.categories.push(CategoryOutcome {
                name: category.name.clone(),
                pages_visited: crawl.pages_visited,
                books_kept,
                error: crawl.error.map(|e| e.to_string()),
            });

            if keep {
                outcome.books.extend(crawl.books);
            }
        }

        tracing::info!(
            "Crawl finished: {} books from {} pages in {:?} ({} categories failed)",
            outcome.books.len(),
            outcome.pages_visited(),
            start_time.elapsed(),
            outcome.failed_categories()
        );

        Ok(outcome)
    }

    /// Follows one category's pagination until it runs out or fails
    async fn crawl_category(&self, category: &CategoryLink) -> CategoryCrawl {
        let mut crawl = CategoryCrawl {
            books: Vec::new(),
            pages_visited: 0,
            error: None,
        };
        let mut visited: HashSet<Url> = HashSet::new();
        let mut cursor = Some(category.url.clone());

        while let Some(page_url) = cursor.take() {
            if !visited.insert(page_url.clone()) {
                tracing::warn!("Pagination cycle at {}, stopping '{}'", page_url, category.name);
                break;
            }

            if let Some(max) = self.crawl.max_pages_per_category {
                if crawl.pages_visited >= max {
                    tracing::info!("Reached {} pages for '{}', stopping", max, category.name);
                    break;
                }
            }

            if crawl.pages_visited > 0 && self.crawl.page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.crawl.page_delay_ms)).await;
            }

            match self.fetch_listing(&page_url, &category.name).await {
                Ok(page) => {
                    tracing::debug!("{}: {} books", page_url, page.books.len());
                    if page.is_last() {
                        tracing::debug!("'{}' has no page after {}", category.name, page_url);
                    }
                    crawl.pages_visited += 1;
                    crawl.books.extend(page.books);
                    cursor = page.next_page;
                }
                Err(e) => {
                    crawl.error = Some(e);
                }
            }
        }

        crawl
    }

    /// Fetches and parses one listing page
    async fn fetch_listing(&self, page_url: &Url, category: &str) -> Result<ListingPage, FolioError> {
        let html = fetch_page(&self.client, page_url, &self.retry).await?;
        let page = parse_listing(&html, page_url, category, self.author.as_deref())?;
        Ok(page)
    }
}

/// Runs a complete crawl with the given configuration
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome, FolioError> {
    Coordinator::new(config)?.run().await
}
