//! HTTP client for the internal product-catalogue backend.
//!
//! The backend exposes one thin search route per vendor scraper
//! (`/produits/decathlon`, `/produits/amazon`, `/produits/myprotein`) and
//! returns loosely-shaped JSON; see [`crate::record`] for the tolerance
//! rules.

use std::time::Duration;

use reqwest::{Client, Url};

use fitcomp_core::CatalogueProduct;

use crate::error::CatalogueError;
use crate::record::{filter_by_query, normalize_record, records_from_payload};

/// Vendors the internal backend scrapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    Decathlon,
    Amazon,
    MyProtein,
}

impl Vendor {
    pub const ALL: [Vendor; 3] = [Vendor::Decathlon, Vendor::Amazon, Vendor::MyProtein];

    /// Path segment on the backend.
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            Vendor::Decathlon => "decathlon",
            Vendor::Amazon => "amazon",
            Vendor::MyProtein => "myprotein",
        }
    }

    /// Display label stamped on normalized products.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Vendor::Decathlon => "Decathlon",
            Vendor::Amazon => "Amazon",
            Vendor::MyProtein => "MyProtein",
        }
    }
}

/// Client for the internal catalogue backend.
pub struct CatalogueClient {
    client: Client,
    base_url: Url,
}

impl CatalogueClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::InvalidBaseUrl`] if `base_url` cannot be
    /// parsed, or [`CatalogueError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogueError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends the vendor segment instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|e| CatalogueError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, base_url })
    }

    /// Searches one vendor's catalogue and returns normalized products,
    /// filtered by the query and capped at the per-vendor limit.
    ///
    /// # Errors
    ///
    /// - [`CatalogueError::Http`] on network failure or non-2xx status.
    /// - [`CatalogueError::Deserialize`] if the body is not valid JSON.
    pub async fn search(
        &self,
        vendor: Vendor,
        query: &str,
    ) -> Result<Vec<CatalogueProduct>, CatalogueError> {
        let url = self.build_url(vendor, query)?;

        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let payload: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| CatalogueError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        let products = records_from_payload(&payload)
            .iter()
            .filter_map(|record| normalize_record(record, vendor.label()))
            .collect();

        Ok(filter_by_query(products, query))
    }

    fn build_url(&self, vendor: Vendor, query: &str) -> Result<Url, CatalogueError> {
        let mut url = self
            .base_url
            .join(&format!("produits/{}", vendor.path_segment()))
            .map_err(|e| CatalogueError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().append_pair("q", query);
        Ok(url)
    }
}
