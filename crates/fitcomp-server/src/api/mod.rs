mod compare;
mod image_proxy;
mod search;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use fitcomp_aggregator::{Aggregator, ProviderStatus};

use crate::middleware::{request_id, RequestId};

/// Shared state: the provider aggregator plus a dedicated HTTP client for
/// the image proxy (proxied hosts are arbitrary, so it gets its own client
/// instead of borrowing a provider's).
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub proxy_client: reqwest::Client,
}

impl AppState {
    /// Builds state from an aggregator, constructing the proxy client with
    /// the given timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the client cannot be
    /// constructed.
    pub fn new(
        aggregator: Aggregator,
        proxy_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, reqwest::Error> {
        let proxy_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(proxy_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            aggregator: Arc::new(aggregator),
            proxy_client,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "upstream_unavailable" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    providers: ProviderStatus,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/compare", get(compare::get_comparison))
        .route("/api/search", get(search::search_products))
        .route("/api/image-proxy", get(image_proxy::proxy_image))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

/// Liveness plus provider enablement. There is no database to probe; the
/// interesting operational question is which providers this deployment can
/// actually reach for offers.
async fn health(
    State(state): State<AppState>,
    Extension(_req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(HealthData {
        status: "ok",
        providers: state.aggregator.provider_status(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use fitcomp_catalogue::CatalogueClient;
    use fitcomp_serp::SerpClient;

    const UA: &str = "fitcomp-test/0.1";

    fn empty_state() -> AppState {
        AppState::new(Aggregator::new(None, None, None), 10, UA).expect("state")
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json parse")
        };
        (status, json)
    }

    #[tokio::test]
    async fn health_reports_provider_enablement() {
        let app = build_app(empty_state());
        let (status, json) = get_json(app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["providers"]["serp"], false);
        assert_eq!(json["providers"]["scraper"], false);
        assert_eq!(json["providers"]["catalogue"], false);
    }

    #[tokio::test]
    async fn compare_without_query_is_bad_request() {
        let app = build_app(empty_state());
        let (status, json) = get_json(app, "/api/compare").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "bad_request");
        assert!(
            json["error"]["message"]
                .as_str()
                .expect("message")
                .contains('q'),
            "message should name the missing parameter: {json}"
        );
    }

    #[tokio::test]
    async fn compare_with_blank_query_is_bad_request() {
        let app = build_app(empty_state());
        let (status, _) = get_json(app, "/api/compare?q=%20%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn compare_without_providers_returns_empty_payload() {
        let app = build_app(empty_state());
        let (status, json) = get_json(app, "/api/compare?q=whey%20protein").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], "whey protein");
        assert_eq!(json["offers"].as_array().map(Vec::len), Some(0));
        assert!(json["price"]["min"].is_null());
        assert!(json["price"]["max"].is_null());
        assert!(json["price"]["avg"].is_null());
        assert_eq!(json["history"].as_array().map(Vec::len), Some(0));
        assert_eq!(json["image"], "/placeholder.png");
    }

    #[tokio::test]
    async fn compare_returns_sorted_offers_from_serp() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("engine", "google_shopping"))
            .and(query_param("q", "whey"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "shopping_results": [
                    {
                        "title": "Whey A",
                        "source": "VendorA",
                        "extracted_price": 30.0,
                        "product_link": "https://a.example/p"
                    },
                    {
                        "title": "Whey B",
                        "source": "VendorB",
                        "extracted_price": 20.0,
                        "product_link": "https://b.example/p"
                    },
                    {
                        "title": "Whey C",
                        "source": "VendorC",
                        "price": "sur demande",
                        "link": "https://c.example/p"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let serp = SerpClient::with_base_url("k", 20, UA, &server.uri()).expect("serp client");
        let state =
            AppState::new(Aggregator::new(Some(serp), None, None), 10, UA).expect("state");
        let app = build_app(state);

        let (status, json) = get_json(app, "/api/compare?q=whey").await;
        assert_eq!(status, StatusCode::OK);

        let offers = json["offers"].as_array().expect("offers array");
        assert_eq!(offers.len(), 3);
        assert_eq!(offers[0]["seller"], "VendorB");
        assert_eq!(offers[1]["seller"], "VendorA");
        assert_eq!(offers[2]["seller"], "VendorC");
        assert!(offers[2]["price"].is_null());

        assert_eq!(json["price"]["min"], 20.0);
        assert_eq!(json["price"]["max"], 30.0);
        assert_eq!(json["price"]["avg"], 25.0);
        assert_eq!(json["history"].as_array().map(Vec::len), Some(7));
    }

    #[tokio::test]
    async fn search_with_blank_query_is_empty_ok() {
        let app = build_app(empty_state());
        let (status, json) = get_json(app, "/api/search?q=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["products"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn search_with_non_numeric_limit_is_not_rejected() {
        let app = build_app(empty_state());
        let (status, json) = get_json(app, "/api/search?q=whey&limit=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["products"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn search_applies_limit() {
        let server = MockServer::start().await;
        let rows: Vec<serde_json::Value> = (0..10)
            .map(|i| {
                serde_json::json!({
                    "id": format!("c-{i}"),
                    "name": format!("Creatine {i}"),
                    "price": 8.0 + f64::from(i)
                })
            })
            .collect();
        Mock::given(method("GET"))
            .and(path("/produits/decathlon"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(rows)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let catalogue = CatalogueClient::new(&server.uri(), 10, UA).expect("catalogue client");
        let state =
            AppState::new(Aggregator::new(None, None, Some(catalogue)), 10, UA).expect("state");
        let app = build_app(state);

        let (status, json) = get_json(app, "/api/search?q=creatine&limit=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["products"].as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn search_total_failure_is_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let catalogue = CatalogueClient::new(&server.uri(), 10, UA).expect("catalogue client");
        let state =
            AppState::new(Aggregator::new(None, None, Some(catalogue)), 10, UA).expect("state");
        let app = build_app(state);

        let (status, json) = get_json(app, "/api/search?q=whey").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"], "upstream_unavailable");
    }

    #[tokio::test]
    async fn image_proxy_rejects_missing_and_invalid_urls() {
        let app = build_app(empty_state());
        let (status, _) = get_json(app.clone(), "/api/image-proxy").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) =
            get_json(app.clone(), "/api/image-proxy?url=ftp%3A%2F%2Fexample.com%2Fa.png").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "bad_request");

        let (status, _) = get_json(app, "/api/image-proxy?url=%3A%3A%3A").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn image_proxy_streams_upstream_body_and_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/img/logo.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(vec![0x89, 0x50, 0x4E, 0x47])
                    .insert_header("content-type", "image/png"),
            )
            .mount(&server)
            .await;

        let app = build_app(empty_state());
        let target = format!("{}/img/logo.png", server.uri());
        let encoded: String = target
            .bytes()
            .flat_map(|b| format!("%{b:02X}").into_bytes())
            .map(char::from)
            .collect();
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/image-proxy?url={encoded}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("image/png")
        );
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("public, max-age=900, stale-while-revalidate=86400")
        );
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        assert_eq!(bytes.as_ref(), &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[tokio::test]
    async fn image_proxy_maps_upstream_failure_to_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let app = build_app(empty_state());
        let target = format!("{}/missing.png", server.uri());
        let (status, json) = get_json(
            app,
            &format!(
                "/api/image-proxy?url={}",
                target.replace(':', "%3A").replace('/', "%2F")
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"], "upstream_unavailable");
    }

    #[tokio::test]
    async fn responses_echo_request_id_header() {
        let app = build_app(empty_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(
            response
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok()),
            Some("req-42")
        );
    }
}
