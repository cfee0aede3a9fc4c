//! Lenient price parsing and merchant-icon derivation.
//!
//! Upstream providers disagree on how prices arrive: SerpAPI sends both a
//! pre-extracted float and a display string (`"12,50 €"`), the internal
//! catalogue sends whichever the vendor scraper captured, and ScraperAPI
//! pages only yield display strings. Everything funnels through
//! [`parse_price`], which degrades to `None` instead of erroring.

/// Parses a display price string into a finite `f64`.
///
/// Strips every character outside `[0-9,.-]`, converts the comma decimal
/// separator to a period, and parses. Returns `None` for empty or
/// non-numeric remainders and for non-finite results. Never panics.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a price from an untyped JSON value: pre-parsed finite numbers are
/// preferred, strings go through [`parse_price`], anything else is `None`.
#[must_use]
pub fn parse_price_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => parse_price(s),
        _ => None,
    }
}

/// Rounds to 2 decimal places, half away from zero (`(x * 100).round() / 100`).
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Best-effort merchant icon URL from a seller name or listing URL.
///
/// Prefers the hostname of the listing URL (stripped of `www.`); otherwise
/// builds a domain token from the seller name with whitespace removed and
/// `.com` appended; falls back to a generic `shop` token. Decorative only —
/// a wrong icon is acceptable, a panic is not.
#[must_use]
pub fn merchant_logo_url(seller: &str, url: Option<&str>) -> String {
    if let Some(host) = url.and_then(hostname_of) {
        return format!("https://logo.clearbit.com/{host}");
    }

    let token: String = seller
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    if token.is_empty() {
        "https://logo.clearbit.com/shop.com".to_string()
    } else if token.contains('.') {
        format!("https://logo.clearbit.com/{token}")
    } else {
        format!("https://logo.clearbit.com/{token}.com")
    }
}

/// Extracts a lowercased hostname from a URL string, dropping a leading
/// `www.` prefix. Returns `None` when the input has no parseable authority.
#[must_use]
pub fn hostname_of(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host = rest
        .split(['/', '?', '#'])
        .next()?
        .split('@')
        .next_back()?
        .split(':')
        .next()?
        .to_lowercase();
    if host.is_empty() {
        return None;
    }
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}
