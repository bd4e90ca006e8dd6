//! HTML parser for the book catalog
//!
//! This module extracts:
//! - Category links from the landing page's side navigation
//! - Book records and the "next" link from a category listing page
//!
//! Missing markup never fails a page. Each field falls back to a default
//! (`"Unknown"` title, `"0"` price, `Unrated`) so a malformed entry degrades
//! data quality instead of aborting the category.

use crate::catalog::{BookRecord, CategoryLink, ListingPage, Rating, MISSING_PRICE, UNKNOWN_TITLE};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use url::Url;

/// Category anchors in the landing page navigation
const CATEGORY_LINK: &str = ".nav-list > li > ul > li > a";
const PRODUCT: &str = "article.product_pod";
const PRODUCT_TITLE: &str = "h3 a";
const PRODUCT_PRICE: &str = "p.price_color";
const PRODUCT_RATING: &str = "p.star-rating";
const NEXT_PAGE: &str = "li.next > a";

/// Errors that can occur while parsing a page
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Compiles a CSS selector
fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Selectors used on a listing page, compiled once per page
struct ListingSelectors {
    product: Selector,
    title: Selector,
    price: Selector,
    rating: Selector,
    next: Selector,
}

impl ListingSelectors {
    fn new() -> Result<Self, ParseError> {
        Ok(Self {
            product: selector(PRODUCT)?,
            title: selector(PRODUCT_TITLE)?,
            price: selector(PRODUCT_PRICE)?,
            rating: selector(PRODUCT_RATING)?,
            next: selector(NEXT_PAGE)?,
        })
    }
}

/// Extracts the category links from the landing page
///
/// Links are returned in document order. Anchors without an `href`, or whose
/// `href` cannot be resolved against `base_url`, are skipped.
///
/// # Example
///
/// ```
/// use folio_harvest::crawler::parse_categories;
/// use url::Url;
///
/// let html = r#"<ul class="nav-list"><li><a href="index.html">Books</a><ul>
///     <li><a href="catalogue/category/books/travel_2/index.html"> Travel </a></li>
/// </ul></li></ul>"#;
/// let base = Url::parse("http://books.toscrape.com/index.html").unwrap();
/// let categories = parse_categories(html, &base).unwrap();
/// assert_eq!(categories[0].name, "Travel");
/// ```
pub fn parse_categories(html: &str, base_url: &Url) -> Result<Vec<CategoryLink>, ParseError> {
    let document = Html::parse_document(html);
    let link_selector = selector(CATEGORY_LINK)?;

    let mut categories = Vec::new();
    for element in document.select(&link_selector) {
        let name = element.text().collect::<String>().trim().to_string();

        let Some(href) = element.value().attr("href") else {
            tracing::debug!("Category '{}' has no href, skipping", name);
            continue;
        };

        match base_url.join(href.trim()) {
            Ok(url) => categories.push(CategoryLink { name, url }),
            Err(e) => tracing::debug!("Cannot resolve category href '{}': {}", href, e),
        }
    }

    Ok(categories)
}

/// Extracts books and the next-page link from a category listing page
///
/// # Arguments
///
/// * `html` - The listing page markup
/// * `page_url` - URL the page was fetched from; the next link is resolved against it
/// * `category` - Category name stamped onto every record
/// * `author` - Author stamped onto every record (the listings carry none)
pub fn parse_listing(
    html: &str,
    page_url: &Url,
    category: &str,
    author: Option<&str>,
) -> Result<ListingPage, ParseError> {
    let document = Html::parse_document(html);
    let selectors = ListingSelectors::new()?;

    let books = document
        .select(&selectors.product)
        .map(|product| extract_book(product, &selectors, category, author))
        .collect();

    let next_page = document
        .select(&selectors.next)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .and_then(|href| match page_url.join(href.trim()) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!("Cannot resolve next link '{}' on {}: {}", href, page_url, e);
                None
            }
        });

    Ok(ListingPage { books, next_page })
}

/// Builds a record from one product entry
fn extract_book(
    product: ElementRef<'_>,
    selectors: &ListingSelectors,
    category: &str,
    author: Option<&str>,
) -> BookRecord {
    let title = product
        .select(&selectors.title)
        .next()
        .and_then(|anchor| anchor.value().attr("title"))
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    let price = product
        .select(&selectors.price)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| MISSING_PRICE.to_string());

    let rating = product
        .select(&selectors.rating)
        .next()
        .map(|element| Rating::from_star_classes(element.value().classes()))
        .unwrap_or(Rating::Unrated);

    BookRecord {
        title,
        author: author.map(str::to_string),
        price,
        rating,
        category: category.to_string(),
    }
}
