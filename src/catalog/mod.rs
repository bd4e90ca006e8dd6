//! Catalog data model
//!
//! Records produced while crawling the book catalog. A `BookRecord` is built
//! once by the parser and never mutated afterwards; the sink persists it
//! verbatim.

mod rating;

pub use rating::Rating;

use url::Url;

/// Title used when a product entry carries no title attribute
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Price used when a product entry carries no price marker
pub const MISSING_PRICE: &str = "0";

/// A single book scraped from a category listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    /// Title from the product heading
    pub title: String,

    /// Author, if known. The catalog listings do not expose authors, so this
    /// is `None` unless a placeholder is configured.
    pub author: Option<String>,

    /// Raw formatted price text (e.g. "£51.77"), never parsed
    pub price: String,

    /// Star rating
    pub rating: Rating,

    /// Name of the category the book was listed under
    pub category: String,
}

/// A category link discovered on the landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLink {
    /// Display name, whitespace-trimmed
    pub name: String,

    /// Absolute URL of the first listing page
    pub url: Url,
}

/// The parse result of one category listing page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Books in page order
    pub books: Vec<BookRecord>,

    /// Absolute URL of the next listing page, if any
    pub next_page: Option<Url>,
}

impl ListingPage {
    /// Returns true if this is the last page of its category
    pub fn is_last(&self) -> bool {
        self.next_page.is_none()
    }
}
