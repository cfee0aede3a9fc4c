//! SerpAPI Google Shopping response types.
//!
//! Only the fields the normalizer reads are modeled; everything is optional
//! because SerpAPI omits fields freely depending on the merchant. Prices
//! come in two flavors per row: `extracted_price` (a float SerpAPI already
//! parsed) and `price` (the raw display string, e.g. `"12,50 €"`). The
//! extracted value wins when present.

use serde::Deserialize;

/// Top-level envelope for `engine=google_shopping` searches.
///
/// The deserializer ignores the large majority of the payload
/// (`search_metadata`, pagination, ads); only the shopping rows matter here.
#[derive(Debug, Deserialize)]
pub struct ShoppingSearchResponse {
    #[serde(default)]
    pub shopping_results: Vec<ShoppingResult>,
}

/// One row of `shopping_results`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShoppingResult {
    pub title: Option<String>,
    /// Merchant display name, e.g. `"Decathlon"`.
    pub source: Option<String>,
    /// Alternate merchant field used by some result variants.
    pub store: Option<String>,
    pub merchant: Option<String>,
    /// Raw display price string.
    pub price: Option<String>,
    /// Pre-parsed numeric price.
    pub extracted_price: Option<f64>,
    pub previous_price: Option<String>,
    pub extracted_previous_price: Option<f64>,
    /// Direct merchant link.
    pub product_link: Option<String>,
    /// Google redirect link; used when no direct link exists.
    pub link: Option<String>,
    /// SerpAPI product-detail link, last-resort URL.
    pub serpapi_product_link: Option<String>,
    pub thumbnail: Option<String>,
    pub rating: Option<f64>,
}
