//! Catalog fixtures and mock server helpers

use folio_harvest::config::{
    CategoryErrorPolicy, Config, CrawlConfig, HttpConfig, OutputConfig, SiteConfig,
};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TRAVEL_PATH: &str = "/catalogue/category/books/travel_2/index.html";
pub const MYSTERY_PATH: &str = "/catalogue/category/books/mystery_3/index.html";

/// Renders a landing page whose navigation lists `categories` as (name, href)
pub fn landing_page(categories: &[(&str, &str)]) -> String {
    let items: String = categories
        .iter()
        .map(|(name, href)| format!(r#"<li><a href="{}">{}</a></li>"#, href, name))
        .collect();

    format!(
        r#"<html><head><title>All products | Books to Scrape</title></head><body>
        <div class="side_categories">
            <ul class="nav nav-list">
                <li>
                    <a href="catalogue/category/books_1/index.html">Books</a>
                    <ul>{}</ul>
                </li>
            </ul>
        </div>
        </body></html>"#,
        items
    )
}

/// Renders a listing page with `books` as (title, price, rating token)
pub fn listing_page(books: &[(&str, &str, &str)], next: Option<&str>) -> String {
    let items: String = books
        .iter()
        .map(|(title, price, rating)| {
            format!(
                r#"<li class="col-xs-6"><article class="product_pod">
                    <p class="star-rating {rating}"><i class="icon-star"></i></p>
                    <h3><a href="../../../book/index.html" title="{title}">{title}</a></h3>
                    <div class="product_price"><p class="price_color">{price}</p></div>
                </article></li>"#
            )
        })
        .collect();

    let pager = next
        .map(|href| {
            format!(
                r#"<ul class="pager"><li class="current">Page</li><li class="next"><a href="{}">next</a></li></ul>"#,
                href
            )
        })
        .unwrap_or_default();

    format!(
        r#"<html><body><section><ol class="row">{}</ol><div>{}</div></section></body></html>"#,
        items, pager
    )
}

/// Mounts an HTML page that must be requested exactly `times` times
pub async fn mount_page(server: &MockServer, page_path: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Mounts a failing page
pub async fn mount_status(server: &MockServer, page_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Builds a configuration pointing at the mock server, writing into `dir`
pub fn test_config(base_url: &str, dir: &Path) -> Config {
    Config {
        site: SiteConfig {
            landing_url: format!("{}/index.html", base_url),
            author_placeholder: None,
        },
        http: HttpConfig {
            user_agent: "Mozilla/5.0".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
            max_retries: 0,
            retry_delay_ms: 0,
        },
        crawl: CrawlConfig {
            max_categories: None,
            max_pages_per_category: None,
            page_delay_ms: 0,
            on_category_error: CategoryErrorPolicy::KeepPartial,
        },
        output: OutputConfig {
            database_path: dir.join("books.db").to_string_lossy().into_owned(),
            report_path: dir.join("books_report.xlsx").to_string_lossy().into_owned(),
        },
    }
}
