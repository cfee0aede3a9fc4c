//! Wiremock-backed tests for `ScraperClient`.
//!
//! The mock server stands in for `api.scraperapi.com`; each mounted mock
//! matches the proxied target via the `url` query parameter.

use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::ScraperClient;
use crate::error::ScrapeError;

fn test_client(base_url: &str) -> ScraperClient {
    ScraperClient::with_base_url("test-key", 30, "fitcomp-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_rendered_returns_html_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("url", "https://www.example.com/p/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let html = client
        .fetch_rendered("https://www.example.com/p/1")
        .await
        .expect("fetch should succeed");

    assert_eq!(html, "<html>ok</html>");
}

#[tokio::test]
async fn fetch_rendered_maps_non_2xx_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_rendered("https://www.example.com/p/1").await;

    assert!(
        matches!(
            result,
            Err(ScrapeError::UnexpectedStatus { status: 403, .. })
        ),
        "expected UnexpectedStatus(403), got: {result:?}"
    );
}

#[tokio::test]
async fn search_offers_skips_failing_targets_and_keeps_the_rest() {
    let server = MockServer::start().await;

    // Amazon renders a price; Cdiscount is blocked; Decathlon has no price.
    Mock::given(method("GET"))
        .and(query_param("url", "https://www.amazon.fr/s?k=whey"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<span class="a-price">29,90 €</span>"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param(
            "url",
            "https://www.cdiscount.com/search/10/whey.html",
        ))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("url", "https://www.decathlon.fr/search?Ntt=whey"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>aucun prix</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let offers = client.search_offers("whey").await;

    assert_eq!(offers.len(), 1, "only the priced target should survive");
    let offer = &offers[0];
    assert_eq!(offer.seller, "Amazon");
    assert_eq!(offer.price, Some(29.90));
    assert_eq!(offer.url, "https://www.amazon.fr/s?k=whey");
    assert_eq!(offer.logo.as_deref(), Some("https://logo.clearbit.com/amazon.fr"));
    assert_eq!(offer.source, "ScraperAPI");
}

#[tokio::test]
async fn search_offers_with_blank_query_is_empty() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri());
    assert!(client.search_offers("   ").await.is_empty());
}

#[tokio::test]
async fn product_snapshot_builds_offer_from_page_metadata() {
    let server = MockServer::start().await;

    let html = r#"
        <html><head>
          <meta property="og:title" content="Whey Isolate Vanille 1kg">
          <meta property="og:image" content="https://cdn.example.com/whey.jpg">
        </head><body><div class="price">34,99 €</div></body></html>
    "#;
    Mock::given(method("GET"))
        .and(query_param("url", "https://www.myprotein.fr/p/whey-isolate"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let snapshot = client
        .product_snapshot("https://www.myprotein.fr/p/whey-isolate", None)
        .await
        .expect("snapshot should succeed");

    assert_eq!(snapshot.title.as_deref(), Some("Whey Isolate Vanille 1kg"));
    assert_eq!(
        snapshot.image.as_deref(),
        Some("https://cdn.example.com/whey.jpg")
    );
    let offer = snapshot.offer.expect("priced page should yield an offer");
    assert_eq!(offer.seller, "myprotein.fr");
    assert_eq!(offer.price, Some(34.99));
}

#[tokio::test]
async fn product_snapshot_prefers_brand_as_seller() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("prix : 12,50 €"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let snapshot = client
        .product_snapshot("https://www.example.com/p/1", Some("MyProtein"))
        .await
        .expect("snapshot should succeed");

    assert_eq!(
        snapshot.offer.expect("offer").seller,
        "MyProtein"
    );
}

#[tokio::test]
async fn product_snapshot_without_price_yields_no_offer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<meta property="og:title" content="Page produit">"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let snapshot = client
        .product_snapshot("https://www.example.com/p/2", None)
        .await
        .expect("snapshot should succeed");

    assert!(snapshot.offer.is_none());
    assert_eq!(snapshot.title.as_deref(), Some("Page produit"));
}
