//! HTTP client for the SerpAPI Google Shopping endpoint.
//!
//! Wraps `reqwest` with SerpAPI-specific error handling, API key management,
//! and typed response deserialization. SerpAPI signals quota and engine
//! errors in-band (HTTP 200 with a top-level `"error"` field); those are
//! surfaced as [`SerpError::ApiError`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::SerpError;
use crate::types::ShoppingSearchResponse;

const DEFAULT_BASE_URL: &str = "https://serpapi.com/search.json";

/// Client for SerpAPI Google Shopping searches.
///
/// Manages the HTTP client, API key, and base URL. Use [`SerpClient::new`]
/// for production or [`SerpClient::with_base_url`] to point at a mock
/// server in tests.
pub struct SerpClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SerpClient {
    /// Creates a new client pointed at the production SerpAPI endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SerpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SerpError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SerpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SerpError::ApiError`] if `base_url` is
    /// not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SerpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| SerpError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Runs a Google Shopping search and returns the parsed shopping rows.
    ///
    /// `count` is passed through as the `num` parameter; SerpAPI treats it
    /// as an upper bound, not a guarantee.
    ///
    /// # Errors
    ///
    /// - [`SerpError::ApiError`] if SerpAPI reports an in-band error.
    /// - [`SerpError::Http`] on network failure or non-2xx HTTP status.
    /// - [`SerpError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn shopping_search(
        &self,
        query: &str,
        count: u32,
    ) -> Result<ShoppingSearchResponse, SerpError> {
        let url = self.build_url(query, count);
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        serde_json::from_value(body).map_err(|e| SerpError::Deserialize {
            context: format!("shopping_search(query={query})"),
            source: e,
        })
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters via [`Url::query_pairs_mut`].
    ///
    /// Locale is pinned to the French storefront (`gl=fr`, `hl=fr`) — all
    /// prices flow through the pipeline as EUR.
    fn build_url(&self, query: &str, count: u32) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("engine", "google_shopping");
            pairs.append_pair("q", query);
            pairs.append_pair("hl", "fr");
            pairs.append_pair("gl", "fr");
            pairs.append_pair("num", &count.to_string());
            pairs.append_pair("api_key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SerpError::Http`] on network failure or a non-2xx status.
    /// Returns [`SerpError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, SerpError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SerpError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Checks the top-level `"error"` field and returns an error if present.
    fn check_api_error(body: &serde_json::Value) -> Result<(), SerpError> {
        if let Some(message) = body.get("error").and_then(serde_json::Value::as_str) {
            return Err(SerpError::ApiError(message.to_string()));
        }
        Ok(())
    }
}
