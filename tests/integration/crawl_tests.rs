//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! full page loop end-to-end: fetch fallback, extraction and pagination.

use listing_trawler::config::{Config, FetcherConfig, RelayEntry};
use listing_trawler::crawler::{Coordinator, MAX_PAGES};
use listing_trawler::output::{to_csv, UNKNOWN_CURRENCY};
use listing_trawler::{CrawlState, TrawlError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with a single relay served by `server`
fn create_test_config(server: &MockServer) -> Config {
    Config {
        fetcher: FetcherConfig {
            user_agent: "TestTrawler/1.0".to_string(),
            timeout_secs: Some(5),
        },
        relays: vec![RelayEntry::new(
            "mock-relay",
            &format!("{}/relay?url={{url}}", server.uri()),
        )],
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_listing_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(query_param("page", page))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

async fn mount_failing_relay(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/relay"))
        .respond_with(ResponseTemplate::new(502))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_follows_pagination_in_order() {
    let mock_server = MockServer::start().await;

    mount_listing_page(
        &mock_server,
        "1",
        r#"
        <a href="/p/1">Men's T-Shirt 19.99 USD</a>
        <a href="/">Home</a>
        <a href="/p/2">Summer Dress €45,50</a>
        <a href="/listing?page=2" aria-label="Next page">»</a>
        "#,
    )
    .await;
    mount_listing_page(
        &mock_server,
        "2",
        r#"
        <a href="/p/3">Wool Scarf 15.00 GBP</a>
        <a href="/help">Customer service</a>
        "#,
    )
    .await;

    let config = create_test_config(&mock_server);
    let mut coordinator = Coordinator::new(&config).unwrap();
    let start = format!("{}/listing?page=1", mock_server.uri());

    let result = coordinator.crawl(&start).await.unwrap();

    assert_eq!(coordinator.state(), CrawlState::Succeeded);
    assert_eq!(coordinator.pages_fetched(), 2);
    assert_eq!(result.total, 3);
    assert_eq!(result.total, result.items.len());

    let names: Vec<&str> = result.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Men's T-Shirt", "Summer Dress", "Wool Scarf"]);

    assert_eq!(result.items[0].price, 19.99);
    assert_eq!(result.items[0].currency, "USD");
    assert_eq!(result.items[1].price, 45.5);
    assert_eq!(result.items[1].currency, "€");
    assert_eq!(result.items[2].url, format!("{}/p/3", mock_server.uri()));
}

#[tokio::test]
async fn test_relative_links_resolve_against_each_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shop/men/"))
        .respond_with(html_page(
            r#"<a href="shirt">Linen Shirt 30 USD</a><a href="../women/">Next</a>"#,
        ))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/shop/women/"))
        .respond_with(html_page(r#"<a href="dress">Maxi Dress 55 USD</a>"#))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let mut coordinator = Coordinator::new(&config).unwrap();

    let result = coordinator
        .crawl(&format!("{}/shop/men/", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(result.total, 2);
    assert_eq!(
        result.items[0].url,
        format!("{}/shop/men/shirt", mock_server.uri())
    );
    assert_eq!(
        result.items[1].url,
        format!("{}/shop/women/dress", mock_server.uri())
    );
}

#[tokio::test]
async fn test_cyclic_pagination_stops_at_page_ceiling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(query_param("page", "1"))
        .respond_with(html_page(
            r#"<a href="/p/1">Canvas Tote 12 EUR</a><a href="/listing?page=2">next</a>"#,
        ))
        .expect(3)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(query_param("page", "2"))
        .respond_with(html_page(
            r#"<a href="/p/2">Leather Wallet 40 EUR</a><a href="/listing?page=1">next</a>"#,
        ))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let mut coordinator = Coordinator::new(&config).unwrap();

    let result = coordinator
        .crawl(&format!("{}/listing?page=1", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(coordinator.pages_fetched(), MAX_PAGES);
    // Items are not deduplicated across revisited pages
    assert_eq!(result.total, 5);
    let names: Vec<&str> = result.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Canvas Tote",
            "Leather Wallet",
            "Canvas Tote",
            "Leather Wallet",
            "Canvas Tote"
        ]
    );
}

#[tokio::test]
async fn test_unavailable_page_keeps_earlier_items() {
    let mock_server = MockServer::start().await;

    mount_listing_page(
        &mock_server,
        "1",
        r#"<a href="/p/1">Running Shoes 79.99 USD</a><a href="/listing?page=2">Next</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/relay"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let mut coordinator = Coordinator::new(&config).unwrap();

    let result = coordinator
        .crawl(&format!("{}/listing?page=1", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(coordinator.state(), CrawlState::Succeeded);
    assert_eq!(coordinator.pages_fetched(), 2);
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].name, "Running Shoes");
}

#[tokio::test]
async fn test_unreachable_first_page_is_empty_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_failing_relay(&mock_server).await;

    let config = create_test_config(&mock_server);
    let mut coordinator = Coordinator::new(&config).unwrap();

    let result = coordinator
        .crawl(&format!("{}/listing", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(coordinator.state(), CrawlState::Succeeded);
    assert!(result.is_empty());
    assert_eq!(result.total, 0);
}

#[tokio::test]
async fn test_relay_fallback_resolves_against_target_url() {
    let mock_server = MockServer::start().await;
    let target = format!("{}/blocked/list", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/blocked/list"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/relay"))
        .and(query_param("url", target.as_str()))
        .respond_with(html_page(r#"<a href="item-9">Straw Hat 22.50 USD</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let mut coordinator = Coordinator::new(&config).unwrap();

    let result = coordinator.crawl(&target).await.unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].name, "Straw Hat");
    assert_eq!(result.items[0].price, 22.5);
    assert_eq!(
        result.items[0].url,
        format!("{}/blocked/item-9", mock_server.uri())
    );
}

#[tokio::test]
async fn test_empty_body_falls_back_to_relay() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listing"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/relay"))
        .respond_with(html_page(r#"<a href="/p/1">Desk Lamp 18 CHF</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let result = listing_trawler::crawl(&config, &format!("{}/listing", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].currency, "CHF");
}

#[tokio::test]
async fn test_page_without_next_link_is_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/only"))
        .respond_with(html_page(
            r#"<a href="/p/1">Ceramic Mug 9</a><a href="/about">About this shop</a>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let mut coordinator = Coordinator::new(&config).unwrap();

    let result = coordinator
        .crawl(&format!("{}/only", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(coordinator.pages_fetched(), 1);
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].currency, UNKNOWN_CURRENCY);
}

#[tokio::test]
async fn test_page_with_no_priced_links_is_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(html_page(
            r#"<a href="/a">Read our story</a><a href="/b">Contact us today</a>"#,
        ))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let mut coordinator = Coordinator::new(&config).unwrap();

    let result = coordinator
        .crawl(&format!("{}/blog", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(coordinator.state(), CrawlState::Succeeded);
    assert_eq!(result.total, 0);
}

#[tokio::test]
async fn test_unresolvable_link_does_not_abort_crawl() {
    let mock_server = MockServer::start().await;

    mount_listing_page(
        &mock_server,
        "1",
        r#"
        <a href="/p/1">Men's T-Shirt 19.99 USD</a>
        <a href="http://">Visit our partner</a>
        <a href="/listing?page=2">Next</a>
        "#,
    )
    .await;
    mount_listing_page(&mock_server, "2", r#"<a href="/p/2">Wool Scarf 15.00 GBP</a>"#).await;

    let config = create_test_config(&mock_server);
    let mut coordinator = Coordinator::new(&config).unwrap();

    let result = coordinator
        .crawl(&format!("{}/listing?page=1", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(coordinator.state(), CrawlState::Succeeded);
    assert_eq!(coordinator.pages_fetched(), 2);
    let names: Vec<&str> = result.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Men's T-Shirt", "Wool Scarf"]);
}

#[tokio::test]
async fn test_unparseable_start_url_aborts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_page(""))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let mut coordinator = Coordinator::new(&config).unwrap();

    let result = coordinator.crawl("http://[not-an-address/listing").await;

    assert!(matches!(result, Err(TrawlError::UrlError(_))));
    assert_eq!(coordinator.state(), CrawlState::Failed);
    assert_eq!(coordinator.pages_fetched(), 0);
}

#[tokio::test]
async fn test_broken_relay_template_aborts_without_partial_result() {
    let mock_server = MockServer::start().await;

    mount_listing_page(
        &mock_server,
        "1",
        r#"<a href="/p/1">Good Item 10 USD</a><a href="/listing?page=2">Next</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/listing"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    // Built directly, so the template never went through config validation
    let config = Config {
        relays: vec![RelayEntry::new("broken", "not a url {url}")],
        ..create_test_config(&mock_server)
    };
    let mut coordinator = Coordinator::new(&config).unwrap();

    let result = coordinator
        .crawl(&format!("{}/listing?page=1", mock_server.uri()))
        .await;

    assert!(matches!(result, Err(TrawlError::UrlError(_))));
    assert_eq!(coordinator.state(), CrawlState::Failed);
    assert_eq!(coordinator.pages_fetched(), 2);
}

#[tokio::test]
async fn test_empty_start_url_never_fetches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html_page(""))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let mut coordinator = Coordinator::new(&config).unwrap();

    let result = coordinator.crawl("").await;

    assert!(matches!(result, Err(TrawlError::Validation(ref m)) if m == "Enter a valid URL"));
    assert_eq!(coordinator.state(), CrawlState::Failed);
}

#[tokio::test]
async fn test_csv_export_of_crawl_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/listing"))
        .respond_with(html_page(r#"<a href="/p/1">The "Classic" Tee 25 USD</a>"#))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server);
    let result = listing_trawler::crawl(&config, &format!("{}/listing", mock_server.uri()))
        .await
        .unwrap();

    let csv = to_csv(&result);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "name,price,currency,url");
    assert_eq!(
        lines[1],
        format!(
            r#""The ""Classic"" Tee","25","USD","{}/p/1""#,
            mock_server.uri()
        )
    );
}
