//! The compare pipeline: fan out to every enabled provider for one query,
//! merge the normalized offers, and derive the summary payload.

use serde::Serialize;

use fitcomp_core::{HistoryPoint, Offer, PriceSummary};
use fitcomp_scraper::ProductSnapshot;
use fitcomp_serp::{fallback_image, offer_from_result};

use crate::merge::{dedupe_offers, sort_offers};
use crate::summary::{summarize, synthetic_history};

use super::Aggregator;

/// Shopping rows requested per compare query; SerpAPI treats it as a cap.
const SERP_RESULT_COUNT: u32 = 20;

const PLACEHOLDER_IMAGE: &str = "/placeholder.png";

/// One compare query.
#[derive(Debug, Default, Clone)]
pub struct CompareRequest {
    pub query: String,
    /// Caller-supplied product image, preferred over anything scraped.
    pub image: Option<String>,
    pub brand: Option<String>,
    /// Direct merchant product page to snapshot alongside the search sweep.
    pub product_url: Option<String>,
}

/// The compare payload: echoed query identity, display metadata, price
/// statistics, the ranked offer list, and the synthetic history.
#[derive(Debug, Serialize)]
pub struct Comparison {
    pub id: String,
    pub name: String,
    pub image: String,
    pub brand: Option<String>,
    pub rating: Option<f64>,
    pub price: PriceSummary,
    pub offers: Vec<Offer>,
    pub history: Vec<HistoryPoint>,
}

impl Aggregator {
    /// Aggregates offers for one query across every enabled provider.
    ///
    /// The three upstream calls (shopping search, merchant sweep, product
    /// snapshot) run concurrently; each has its own error boundary, so the
    /// pipeline is infallible — with zero providers, or all of them
    /// failing, the result is the empty-offers payload, never an error.
    pub async fn compare(&self, request: &CompareRequest) -> Comparison {
        let query = request.query.trim();

        let serp_task = async {
            let Some(client) = self.serp() else {
                return (Vec::new(), None);
            };
            match client.shopping_search(query, SERP_RESULT_COUNT).await {
                Ok(response) => {
                    let image = fallback_image(&response.shopping_results);
                    let offers = response
                        .shopping_results
                        .iter()
                        .filter_map(offer_from_result)
                        .collect();
                    (offers, image)
                }
                Err(e) => {
                    tracing::warn!(error = %e, query, "serp provider failed");
                    (Vec::new(), None)
                }
            }
        };

        let sweep_task = async {
            match self.scraper() {
                Some(client) => client.search_offers(query).await,
                None => Vec::new(),
            }
        };

        let snapshot_task = async {
            let (Some(client), Some(url)) = (self.scraper(), request.product_url.as_deref())
            else {
                return ProductSnapshot::default();
            };
            match client.product_snapshot(url, request.brand.as_deref()).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::warn!(error = %e, url, "scraper snapshot failed");
                    ProductSnapshot::default()
                }
            }
        };

        let ((serp_offers, serp_image), sweep_offers, snapshot) =
            tokio::join!(serp_task, sweep_task, snapshot_task);

        let mut combined = serp_offers;
        combined.extend(sweep_offers);
        combined.extend(snapshot.offer);

        let mut offers = dedupe_offers(combined);
        sort_offers(&mut offers);

        let price = summarize(&offers);
        let history = synthetic_history(&price);

        let rating = offers
            .iter()
            .find_map(|o| o.rating.filter(|r| r.is_finite()));

        let name = non_empty(snapshot.title).unwrap_or_else(|| query.to_string());
        let image = non_empty(request.image.clone())
            .or_else(|| non_empty(snapshot.image))
            .or_else(|| non_empty(serp_image))
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        Comparison {
            id: query.to_string(),
            name,
            image,
            brand: request.brand.clone(),
            rating,
            price,
            offers,
            history,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
