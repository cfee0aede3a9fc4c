//! Fixed merchant search targets swept by the scraping provider.
//!
//! Each target is a merchant search page whose rendered HTML reliably
//! carries at least one euro price near the top of the result list. The
//! sweep is best-effort: a target that blocks the proxy or changes layout
//! simply contributes nothing.

/// One merchant search page the scraper sweeps for a query.
#[derive(Debug, Clone, Copy)]
pub struct SearchTarget {
    /// Merchant display name used as the offer's seller.
    pub label: &'static str,
    /// Hostname the clearbit icon is derived from.
    pub hostname: &'static str,
    /// Search URL template; `{query}` is replaced with the encoded query.
    url_template: &'static str,
}

impl SearchTarget {
    /// Builds the merchant search URL for `query`.
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        self.url_template
            .replace("{query}", &urlencode(query))
    }

    /// Icon URL for this merchant.
    #[must_use]
    pub fn logo_url(&self) -> String {
        format!("https://logo.clearbit.com/{}", self.hostname)
    }
}

const TARGETS: &[SearchTarget] = &[
    SearchTarget {
        label: "Amazon",
        hostname: "amazon.fr",
        url_template: "https://www.amazon.fr/s?k={query}",
    },
    SearchTarget {
        label: "Cdiscount",
        hostname: "cdiscount.com",
        url_template: "https://www.cdiscount.com/search/10/{query}.html",
    },
    SearchTarget {
        label: "Decathlon",
        hostname: "decathlon.fr",
        url_template: "https://www.decathlon.fr/search?Ntt={query}",
    },
];

/// The full sweep table.
#[must_use]
pub fn search_targets() -> &'static [SearchTarget] {
    TARGETS
}

/// Minimal percent-encoding for a query embedded in a path or query string.
///
/// Unreserved characters pass through; spaces become `%20`; everything else
/// is percent-encoded byte-wise.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            }
        }
    }
    out
}
