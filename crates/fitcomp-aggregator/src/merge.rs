//! Deduplication and ordering of normalized offers and search products.
//!
//! A missing price compares as positive infinity everywhere: cheaper wins
//! dedup collisions, and priced offers always sort before unpriced ones.

use std::collections::HashMap;

use fitcomp_core::{CatalogueProduct, Offer};

fn price_or_inf(price: Option<f64>) -> f64 {
    price.filter(|p| p.is_finite()).unwrap_or(f64::INFINITY)
}

fn rating_or_min(rating: Option<f64>) -> f64 {
    rating.filter(|r| r.is_finite()).unwrap_or(-1.0)
}

/// Collapses offers sharing a `(seller, url)` key, keeping the cheaper one.
///
/// The key is the seller lowercased and trimmed, joined with the listing
/// URL — the same merchant appearing through two providers with the same
/// link is one offer; different links stay distinct. First-seen order is
/// preserved for the survivors.
#[must_use]
pub fn dedupe_offers(offers: Vec<Offer>) -> Vec<Offer> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<Offer> = Vec::with_capacity(offers.len());

    for offer in offers {
        let key = format!("{}::{}", offer.seller.trim().to_lowercase(), offer.url);
        match index.get(&key) {
            None => {
                index.insert(key, kept.len());
                kept.push(offer);
            }
            Some(&slot) => {
                if price_or_inf(offer.price) < price_or_inf(kept[slot].price) {
                    kept[slot] = offer;
                }
            }
        }
    }

    kept
}

/// Sorts offers ascending by price (unpriced last), breaking ties by rating
/// descending, then seller name case-insensitively.
pub fn sort_offers(offers: &mut [Offer]) {
    offers.sort_by(|a, b| {
        price_or_inf(a.price)
            .total_cmp(&price_or_inf(b.price))
            .then_with(|| rating_or_min(b.rating).total_cmp(&rating_or_min(a.rating)))
            .then_with(|| {
                a.seller
                    .to_lowercase()
                    .cmp(&b.seller.to_lowercase())
            })
    });
}

/// Merges search products from all sources into one ranked list.
///
/// Keyed by lowercased id; a collision keeps the cheaper record but
/// backfills a missing description from the duplicate. Final order is
/// ascending price (unpriced last) → rating descending → name.
#[must_use]
pub fn merge_products(products: Vec<CatalogueProduct>) -> Vec<CatalogueProduct> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<CatalogueProduct> = Vec::with_capacity(products.len());

    for product in products {
        let key = product.id.to_lowercase();
        match index.get(&key) {
            None => {
                index.insert(key, kept.len());
                kept.push(product);
            }
            Some(&slot) => {
                let existing = &mut kept[slot];
                if price_or_inf(product.price) < price_or_inf(existing.price) {
                    let description = existing
                        .description
                        .take()
                        .or_else(|| product.description.clone());
                    *existing = product;
                    if existing.description.is_none() {
                        existing.description = description;
                    }
                } else if existing.description.is_none() && product.description.is_some() {
                    existing.description = product.description;
                }
            }
        }
    }

    kept.sort_by(|a, b| {
        price_or_inf(a.price)
            .total_cmp(&price_or_inf(b.price))
            .then_with(|| rating_or_min(b.rating).total_cmp(&rating_or_min(a.rating)))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    kept
}
