//! Normalized domain shapes shared across provider crates and the server.
//!
//! All entities are request-scoped: built fresh per query, serialized into
//! the response, and discarded. Nothing here is persisted.

use chrono::NaiveDate;
use serde::Serialize;

/// One merchant's listing for a search query, normalized from whichever
/// provider produced it.
///
/// `seller` and `url` are always present — records that cannot produce a
/// usable URL are discarded during normalization, and sellers fall back to
/// a placeholder rather than going missing. `price` stays `None` when the
/// provider's display string could not be parsed; such offers are listed
/// but excluded from price statistics.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Offer {
    pub seller: String,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub old_price: Option<f64>,
    pub url: String,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub logo: Option<String>,
    pub source: String,
}

/// Min/max/average over the priced offers of one query.
///
/// All three fields are `None` when no offer carries a finite price.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PriceSummary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

impl PriceSummary {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: None,
            max: None,
            avg: None,
        }
    }
}

/// One synthetic price-history sample.
///
/// Generated per request from the current average with random jitter; a
/// display placeholder only, never backed by stored data.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// One normalized product row returned by the search endpoint.
///
/// Unlike [`Offer`], a catalogue product may lack a URL — listings from the
/// internal backend are browsable by id even when no merchant link exists.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogueProduct {
    pub id: String,
    pub name: String,
    pub price: Option<f64>,
    pub old_price: Option<f64>,
    pub image: Option<String>,
    pub brand: Option<String>,
    pub vendor: String,
    pub url: Option<String>,
    pub rating: Option<f64>,
    pub description: Option<String>,
}
