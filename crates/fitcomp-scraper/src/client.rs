//! HTTP client for the ScraperAPI rendering proxy.
//!
//! ScraperAPI fetches an arbitrary target URL through its proxy fleet and
//! returns the rendered HTML. This client wraps that single call and builds
//! [`Offer`]s from the fixed merchant sweep plus one-off product snapshots
//! for the compare pipeline.

use std::time::Duration;

use reqwest::{Client, Url};

use fitcomp_core::{hostname_of, Offer};

use crate::error::ScrapeError;
use crate::extract;
use crate::targets::search_targets;

const DEFAULT_BASE_URL: &str = "https://api.scraperapi.com/";
const SOURCE_LABEL: &str = "ScraperAPI";

/// Price, title, and image captured from one rendered product page.
///
/// All fields are optional: a page with no extractable price still
/// contributes its title/image to the compare payload.
#[derive(Debug, Default)]
pub struct ProductSnapshot {
    pub offer: Option<Offer>,
    pub title: Option<String>,
    pub image: Option<String>,
}

/// Client for ScraperAPI proxy fetches.
///
/// Use [`ScraperClient::new`] for production or
/// [`ScraperClient::with_base_url`] to point at a mock server in tests.
pub struct ScraperClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl ScraperClient {
    /// Creates a new client pointed at the production ScraperAPI endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScrapeError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScrapeError::InvalidTargetUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| ScrapeError::InvalidTargetUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches the rendered HTML of `target_url` through the proxy.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::UnexpectedStatus`] on any non-2xx response.
    /// - [`ScrapeError::Http`] on network failure.
    pub async fn fetch_rendered(&self, target_url: &str) -> Result<String, ScrapeError> {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.api_key);
            pairs.append_pair("url", target_url);
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: target_url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// Sweeps the fixed merchant search pages for `query` and returns one
    /// offer per page that yielded a price.
    ///
    /// Each target is isolated: a proxy failure, bot wall, or price-less
    /// page logs a warning and is skipped. The sweep itself never fails.
    pub async fn search_offers(&self, query: &str) -> Vec<Offer> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let mut offers = Vec::new();
        for target in search_targets() {
            let target_url = target.search_url(trimmed);
            let html = match self.fetch_rendered(&target_url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(merchant = target.label, error = %e, "merchant sweep fetch failed");
                    continue;
                }
            };

            let Some(price) = extract::price_from_html(&html) else {
                tracing::warn!(merchant = target.label, "merchant sweep found no price");
                continue;
            };

            let logo = target.logo_url();
            offers.push(Offer {
                seller: target.label.to_string(),
                title: Some(format!("{} · {trimmed}", target.label)),
                price: Some(price),
                old_price: None,
                url: target_url,
                image: Some(logo.clone()),
                rating: None,
                logo: Some(logo),
                source: SOURCE_LABEL.to_string(),
            });
        }

        offers
    }

    /// Fetches one product page and captures its price, title, and image.
    ///
    /// The seller label is the supplied brand when present, otherwise the
    /// page hostname stripped of `www.`. An offer is only produced when
    /// both a price and a seller could be resolved; title and image are
    /// returned regardless so the compare payload can still be decorated.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the proxy fetch itself fails; extraction
    /// misses degrade to `None` fields instead.
    pub async fn product_snapshot(
        &self,
        product_url: &str,
        brand: Option<&str>,
    ) -> Result<ProductSnapshot, ScrapeError> {
        let html = self.fetch_rendered(product_url).await?;

        let price = extract::price_from_html(&html);
        let title = extract::title_from_html(&html);
        let image = extract::image_from_html(&html);

        let seller = brand
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(ToOwned::to_owned)
            .or_else(|| hostname_of(product_url));

        let offer = match (price, seller) {
            (Some(price), Some(seller)) => {
                let logo = fitcomp_core::merchant_logo_url(&seller, Some(product_url));
                Some(Offer {
                    seller,
                    title: title.clone(),
                    price: Some(price),
                    old_price: None,
                    url: product_url.to_owned(),
                    image: image.clone(),
                    rating: None,
                    logo: Some(logo),
                    source: SOURCE_LABEL.to_string(),
                })
            }
            _ => None,
        };

        Ok(ProductSnapshot {
            offer,
            title,
            image,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
