//! Best-effort extraction of prices and page metadata from rendered HTML.
//!
//! Merchant pages are adversarial input: layouts change, bot walls serve
//! partial documents, encodings drift. Every function here returns an
//! `Option` and never panics; a page that yields nothing extractable is
//! simply skipped by the caller.

use std::sync::LazyLock;

use regex::Regex;

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,4}(?:[.,]\d{2}))\s?€").expect("valid price regex"));
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid meta regex"));
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>([^<]+)</title>").expect("valid title regex"));

/// Extracts the first euro-denominated price from an HTML document.
///
/// Matches `NNN,NN €` / `NNN.NN €` (two decimals, optional space before the
/// sign) and converts the comma separator. The first match wins — on
/// merchant search pages that is the top result's price.
#[must_use]
pub fn price_from_html(html: &str) -> Option<f64> {
    let captures = PRICE_RE.captures(html)?;
    let raw = captures.get(1)?.as_str().replace(',', ".");
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extracts the content of `<meta {key_attr}="{key_value}" content="…">`.
#[must_use]
pub fn meta_content(html: &str, key_attr: &str, key_value: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let key = extract_attr(tag, key_attr)?;
        if key.eq_ignore_ascii_case(key_value) {
            extract_attr(tag, "content")
        } else {
            None
        }
    })
}

/// Page title fallback chain: `og:title` → `<meta name="title">` → `<title>`.
#[must_use]
pub fn title_from_html(html: &str) -> Option<String> {
    meta_content(html, "property", "og:title")
        .or_else(|| meta_content(html, "name", "title"))
        .or_else(|| {
            TITLE_RE
                .captures(html)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
        .filter(|s| !s.is_empty())
}

/// Product image fallback chain: `og:image` → `twitter:image`.
#[must_use]
pub fn image_from_html(html: &str) -> Option<String> {
    meta_content(html, "property", "og:image")
        .or_else(|| meta_content(html, "name", "twitter:image"))
        .filter(|s| !s.is_empty())
}

fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    let pattern = format!(r#"(?is)\b{}\s*=\s*["']([^"']+)["']"#, regex::escape(attr));
    let re = Regex::new(&pattern).expect("valid attr regex");
    re.captures(tag)
        .and_then(|c| c.get(1).map(|m| m.as_str().trim().to_string()))
}
