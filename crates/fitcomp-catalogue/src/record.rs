//! Untyped-record normalization for the internal catalogue backend.
//!
//! The backend's vendor scrapers emit whatever field names the source site
//! used (`name`/`title`/`nom`, `price`/`prix`/`current_price`, …), so the
//! payload is read as `serde_json::Value` and each field is resolved
//! through a fallback chain. Normalization always yields a structurally
//! valid [`CatalogueProduct`] for object inputs; it never errors.

use fitcomp_core::{parse_price_value, CatalogueProduct};
use serde_json::Value;

const GENERIC_PRODUCT_NAME: &str = "Produit";
const PER_VENDOR_CAP: usize = 24;

const ID_KEYS: &[&str] = &["id", "product_id", "productId", "sku", "slug"];
const NAME_KEYS: &[&str] = &["name", "title", "nom"];
const BRAND_KEYS: &[&str] = &["brand", "vendorBrand", "marque"];
const IMAGE_KEYS: &[&str] = &["image", "image_url", "imageUrl", "thumbnail"];
const DESCRIPTION_KEYS: &[&str] = &["description", "short_description", "subtitle", "resume"];
const RATING_KEYS: &[&str] = &["rating", "note", "averageRating", "avis"];
const URL_KEYS: &[&str] = &["url", "link", "permalink", "productUrl"];
const PRICE_KEYS: &[&str] = &[
    "price",
    "current_price",
    "currentPrice",
    "prix",
    "bestPrice",
    "amount",
];
const OLD_PRICE_KEYS: &[&str] = &[
    "old_price",
    "previous_price",
    "referencePrice",
    "price_before",
    "priceBefore",
    "originalPrice",
];

/// Unwraps the list of records from a tolerant set of payload shapes:
/// a bare array, or an object carrying `results`, `items`, or `data`.
/// Anything else contributes zero records.
#[must_use]
pub fn records_from_payload(payload: &Value) -> &[Value] {
    if let Some(items) = payload.as_array() {
        return items;
    }
    for key in ["results", "items", "data"] {
        if let Some(items) = payload.get(key).and_then(Value::as_array) {
            return items;
        }
    }
    &[]
}

/// Normalizes one raw vendor record into a [`CatalogueProduct`].
///
/// Returns `None` only for non-object inputs. Missing fields degrade to
/// `None`/placeholder values; the id is synthesized from `vendor:name`
/// (lowercased) when no id-like key exists.
#[must_use]
pub fn normalize_record(record: &Value, vendor: &str) -> Option<CatalogueProduct> {
    let map = record.as_object()?;

    let name = pick_string(map, NAME_KEYS).unwrap_or_else(|| GENERIC_PRODUCT_NAME.to_string());

    let id = pick_id(map).unwrap_or_else(|| format!("{vendor}:{name}").to_lowercase());

    let image = pick_string(map, IMAGE_KEYS).or_else(|| first_image_entry(map.get("images")));

    Some(CatalogueProduct {
        id,
        name,
        price: pick_price(map, PRICE_KEYS),
        old_price: pick_price(map, OLD_PRICE_KEYS),
        image,
        brand: pick_string(map, BRAND_KEYS),
        vendor: vendor.to_string(),
        url: pick_string(map, URL_KEYS),
        rating: pick_rating(map),
        description: pick_string(map, DESCRIPTION_KEYS),
    })
}

/// Keeps the records whose name/brand/description haystack contains the
/// query (case-insensitive), capped at the per-vendor limit.
///
/// An empty query keeps everything — the backend already scoped the list.
#[must_use]
pub fn filter_by_query(products: Vec<CatalogueProduct>, query: &str) -> Vec<CatalogueProduct> {
    let needle = query.trim().to_lowercase();
    let mut kept: Vec<CatalogueProduct> = if needle.is_empty() {
        products
    } else {
        products
            .into_iter()
            .filter(|p| {
                let haystack = format!(
                    "{} {} {}",
                    p.name,
                    p.brand.as_deref().unwrap_or(""),
                    p.description.as_deref().unwrap_or("")
                )
                .to_lowercase();
                haystack.contains(&needle)
            })
            .collect()
    };
    kept.truncate(PER_VENDOR_CAP);
    kept
}

fn pick_string(map: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        map.get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
    })
}

/// Ids may be strings or numbers; both render to a string key.
fn pick_id(map: &serde_json::Map<String, Value>) -> Option<String> {
    ID_KEYS.iter().find_map(|key| match map.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn pick_price(map: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(|v| parse_price_value(v)))
}

fn pick_rating(map: &serde_json::Map<String, Value>) -> Option<f64> {
    RATING_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(|v| parse_price_value(v)))
}

/// First non-empty string inside an `images` array, if any.
fn first_image_entry(images: Option<&Value>) -> Option<String> {
    images?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}
