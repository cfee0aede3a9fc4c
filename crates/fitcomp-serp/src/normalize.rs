//! Normalization from raw SerpAPI shopping rows to [`fitcomp_core::Offer`]
//! and [`fitcomp_core::CatalogueProduct`].
//!
//! Normalization must never fail: malformed rows degrade to `None` (for the
//! offer as a whole, when no usable URL exists) or to null fields, and the
//! caller filters the rejects.

use fitcomp_core::{merchant_logo_url, parse_price, CatalogueProduct, Offer};

use crate::types::ShoppingResult;

const SOURCE_LABEL: &str = "SerpAPI";
const UNKNOWN_MERCHANT: &str = "Unknown merchant";
const GENERIC_PRODUCT_NAME: &str = "Produit";

/// Maps one shopping row to an [`Offer`].
///
/// Seller fallback chain: `source` → `store` → `merchant` → a placeholder.
/// URL fallback chain: `product_link` → `link` → `serpapi_product_link`;
/// a row without any of these is unusable and yields `None`.
#[must_use]
pub fn offer_from_result(result: &ShoppingResult) -> Option<Offer> {
    let url = pick(&[
        result.product_link.as_deref(),
        result.link.as_deref(),
        result.serpapi_product_link.as_deref(),
    ])?;

    let seller = pick(&[
        result.source.as_deref(),
        result.store.as_deref(),
        result.merchant.as_deref(),
    ])
    .unwrap_or_else(|| UNKNOWN_MERCHANT.to_string());

    let price = result
        .extracted_price
        .filter(|p| p.is_finite())
        .or_else(|| result.price.as_deref().and_then(parse_price));
    let old_price = result
        .extracted_previous_price
        .filter(|p| p.is_finite())
        .or_else(|| result.previous_price.as_deref().and_then(parse_price));

    let logo = merchant_logo_url(&seller, Some(&url));

    Some(Offer {
        seller,
        title: pick(&[result.title.as_deref()]),
        price,
        old_price,
        url,
        image: pick(&[result.thumbnail.as_deref()]),
        rating: result.rating.filter(|r| r.is_finite()),
        logo: Some(logo),
        source: SOURCE_LABEL.to_string(),
    })
}

/// Maps one shopping row to a search-result [`CatalogueProduct`].
///
/// Unlike [`offer_from_result`], a row without a link is still listed —
/// search results are browsable without a merchant URL. Rows are keyed by
/// the provider product id when present, else by position within the page.
#[must_use]
pub fn product_from_result(result: &ShoppingResult, index: usize) -> CatalogueProduct {
    let name =
        pick(&[result.title.as_deref()]).unwrap_or_else(|| GENERIC_PRODUCT_NAME.to_string());
    let vendor = pick(&[
        result.source.as_deref(),
        result.store.as_deref(),
        result.merchant.as_deref(),
    ])
    .unwrap_or_else(|| SOURCE_LABEL.to_string());

    CatalogueProduct {
        id: format!("serp-{index}"),
        name,
        price: result
            .extracted_price
            .filter(|p| p.is_finite())
            .or_else(|| result.price.as_deref().and_then(parse_price)),
        old_price: result
            .extracted_previous_price
            .filter(|p| p.is_finite())
            .or_else(|| result.previous_price.as_deref().and_then(parse_price)),
        image: pick(&[result.thumbnail.as_deref()]),
        brand: None,
        vendor,
        url: pick(&[result.product_link.as_deref(), result.link.as_deref()]),
        rating: result.rating.filter(|r| r.is_finite()),
        description: None,
    }
}

/// First non-empty thumbnail across the result page, used as the compare
/// payload's product image when nothing better is available.
#[must_use]
pub fn fallback_image(results: &[ShoppingResult]) -> Option<String> {
    results
        .iter()
        .find_map(|r| pick(&[r.thumbnail.as_deref()]))
}

/// Returns the first candidate that trims to a non-empty string.
fn pick(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}
