//! Crawl loop tests: pagination, failure policy and limits

use crate::fixtures::{
    landing_page, listing_page, mount_page, mount_status, test_config, MYSTERY_PATH, TRAVEL_PATH,
};
use folio_harvest::config::CategoryErrorPolicy;
use folio_harvest::crawler::Coordinator;
use folio_harvest::{FolioError, Rating};
use wiremock::MockServer;

fn two_categories() -> String {
    landing_page(&[
        ("Travel", "catalogue/category/books/travel_2/index.html"),
        ("Mystery", "catalogue/category/books/mystery_3/index.html"),
    ])
}

#[tokio::test]
async fn test_pagination_visits_each_page_once() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &server,
        "/index.html",
        landing_page(&[("Travel", "catalogue/category/books/travel_2/index.html")]),
        1,
    )
    .await;
    mount_page(
        &server,
        TRAVEL_PATH,
        listing_page(&[("P1 Book", "£1.00", "One")], Some("page-2.html")),
        1,
    )
    .await;
    mount_page(
        &server,
        "/catalogue/category/books/travel_2/page-2.html",
        listing_page(&[("P2 Book", "£2.00", "Two")], Some("page-3.html")),
        1,
    )
    .await;
    mount_page(
        &server,
        "/catalogue/category/books/travel_2/page-3.html",
        listing_page(&[("P3 Book", "£3.00", "Three")], None),
        1,
    )
    .await;

    let config = test_config(&server.uri(), dir.path());
    let outcome = Coordinator::new(&config).unwrap().run().await.unwrap();

    let titles: Vec<&str> = outcome.books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["P1 Book", "P2 Book", "P3 Book"]);
    assert_eq!(outcome.categories.len(), 1);
    assert_eq!(outcome.categories[0].pages_visited, 3);
    assert!(!outcome.categories[0].failed());
    assert_eq!(outcome.books[2].rating, Rating::Three);
    // Each mock's expect(1) is verified when the server drops
}

#[tokio::test]
async fn test_categories_crawled_in_document_order() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(&server, "/index.html", two_categories(), 1).await;
    mount_page(
        &server,
        TRAVEL_PATH,
        listing_page(&[("Travel Book", "£10.00", "Four")], None),
        1,
    )
    .await;
    mount_page(
        &server,
        MYSTERY_PATH,
        listing_page(&[("Mystery Book", "£20.00", "Five")], None),
        1,
    )
    .await;

    let config = test_config(&server.uri(), dir.path());
    let outcome = Coordinator::new(&config).unwrap().run().await.unwrap();

    assert_eq!(outcome.books.len(), 2);
    assert_eq!(outcome.books[0].category, "Travel");
    assert_eq!(outcome.books[1].category, "Mystery");
    assert_eq!(outcome.failed_categories(), 0);
}

#[tokio::test]
async fn test_failed_page_keeps_partial_results_and_continues() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(&server, "/index.html", two_categories(), 1).await;
    mount_page(
        &server,
        TRAVEL_PATH,
        listing_page(&[("Kept Book", "£10.00", "One")], Some("page-2.html")),
        1,
    )
    .await;
    mount_status(&server, "/catalogue/category/books/travel_2/page-2.html", 500).await;
    mount_page(
        &server,
        MYSTERY_PATH,
        listing_page(&[("Mystery Book", "£20.00", "Two")], None),
        1,
    )
    .await;

    let config = test_config(&server.uri(), dir.path());
    let outcome = Coordinator::new(&config).unwrap().run().await.unwrap();

    let titles: Vec<&str> = outcome.books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Kept Book", "Mystery Book"]);

    let travel = &outcome.categories[0];
    assert!(travel.failed());
    assert_eq!(travel.pages_visited, 1);
    assert_eq!(travel.books_kept, 1);
    assert!(travel.error.as_deref().unwrap().contains("500"));
    assert!(!outcome.categories[1].failed());
}

#[tokio::test]
async fn test_failed_page_discards_category_when_configured() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(&server, "/index.html", two_categories(), 1).await;
    mount_page(
        &server,
        TRAVEL_PATH,
        listing_page(&[("Dropped Book", "£10.00", "One")], Some("page-2.html")),
        1,
    )
    .await;
    mount_status(&server, "/catalogue/category/books/travel_2/page-2.html", 404).await;
    mount_page(
        &server,
        MYSTERY_PATH,
        listing_page(&[("Mystery Book", "£20.00", "Two")], None),
        1,
    )
    .await;

    let mut config = test_config(&server.uri(), dir.path());
    config.crawl.on_category_error = CategoryErrorPolicy::DiscardCategory;
    let outcome = Coordinator::new(&config).unwrap().run().await.unwrap();

    assert_eq!(outcome.books.len(), 1);
    assert_eq!(outcome.books[0].title, "Mystery Book");
    assert_eq!(outcome.categories[0].books_kept, 0);
    assert!(outcome.categories[0].failed());
}

#[tokio::test]
async fn test_landing_page_failure_aborts_crawl() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_status(&server, "/index.html", 503).await;

    let config = test_config(&server.uri(), dir.path());
    let result = Coordinator::new(&config).unwrap().run().await;

    assert!(matches!(result, Err(FolioError::Fetch(_))));
}

#[tokio::test]
async fn test_pagination_cycle_stops_category() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &server,
        "/index.html",
        landing_page(&[("Travel", "catalogue/category/books/travel_2/index.html")]),
        1,
    )
    .await;
    mount_page(
        &server,
        TRAVEL_PATH,
        listing_page(&[("Loop A", "£1.00", "One")], Some("page-2.html")),
        1,
    )
    .await;
    mount_page(
        &server,
        "/catalogue/category/books/travel_2/page-2.html",
        listing_page(&[("Loop B", "£2.00", "Two")], Some("index.html")),
        1,
    )
    .await;

    let config = test_config(&server.uri(), dir.path());
    let outcome = Coordinator::new(&config).unwrap().run().await.unwrap();

    assert_eq!(outcome.books.len(), 2);
    assert_eq!(outcome.categories[0].pages_visited, 2);
}

#[tokio::test]
async fn test_max_categories_and_pages_limits() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(&server, "/index.html", two_categories(), 1).await;
    mount_page(
        &server,
        TRAVEL_PATH,
        listing_page(&[("First Page", "£1.00", "One")], Some("page-2.html")),
        1,
    )
    .await;
    mount_page(
        &server,
        "/catalogue/category/books/travel_2/page-2.html",
        listing_page(&[("Second Page", "£2.00", "Two")], None),
        0,
    )
    .await;
    mount_page(&server, MYSTERY_PATH, listing_page(&[], None), 0).await;

    let mut config = test_config(&server.uri(), dir.path());
    config.crawl.max_categories = Some(1);
    config.crawl.max_pages_per_category = Some(1);
    let outcome = Coordinator::new(&config).unwrap().run().await.unwrap();

    assert_eq!(outcome.categories.len(), 1);
    assert_eq!(outcome.books.len(), 1);
    assert_eq!(outcome.books[0].title, "First Page");
}

#[tokio::test]
async fn test_author_placeholder_applied() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &server,
        "/index.html",
        landing_page(&[("Travel", "catalogue/category/books/travel_2/index.html")]),
        1,
    )
    .await;
    mount_page(
        &server,
        TRAVEL_PATH,
        listing_page(&[("A Book", "£1.00", "One")], None),
        1,
    )
    .await;

    let mut config = test_config(&server.uri(), dir.path());
    config.site.author_placeholder = Some("Toscrape Author".to_string());
    let outcome = Coordinator::new(&config).unwrap().run().await.unwrap();

    assert_eq!(outcome.books[0].author.as_deref(), Some("Toscrape Author"));
}

#[tokio::test]
async fn test_page_delay_spaces_listing_requests() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &server,
        "/index.html",
        landing_page(&[("Travel", "catalogue/category/books/travel_2/index.html")]),
        1,
    )
    .await;
    mount_page(
        &server,
        TRAVEL_PATH,
        listing_page(&[("P1 Book", "£1.00", "One")], Some("page-2.html")),
        1,
    )
    .await;
    mount_page(
        &server,
        "/catalogue/category/books/travel_2/page-2.html",
        listing_page(&[("P2 Book", "£2.00", "Two")], Some("page-3.html")),
        1,
    )
    .await;
    mount_page(
        &server,
        "/catalogue/category/books/travel_2/page-3.html",
        listing_page(&[("P3 Book", "£3.00", "Three")], None),
        1,
    )
    .await;

    let mut config = test_config(&server.uri(), dir.path());
    config.crawl.page_delay_ms = 150;

    let started = std::time::Instant::now();
    let outcome = Coordinator::new(&config).unwrap().run().await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(outcome.pages_visited(), 3);
    // Two pauses: before page 2 and before page 3
    assert!(
        elapsed >= std::time::Duration::from_millis(300),
        "crawl took only {:?}",
        elapsed
    );
}
