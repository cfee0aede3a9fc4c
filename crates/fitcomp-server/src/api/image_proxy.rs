//! Streaming proxy for third-party product images.
//!
//! Merchants and CDNs rarely send permissive CORS headers, so the front end
//! loads thumbnails through this route instead. Only http(s) targets are
//! accepted; the upstream body streams through without buffering.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
    Extension,
};
use percent_encoding::percent_decode_str;
use reqwest::Url;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const DEFAULT_CACHE_CONTROL: &str = "public, max-age=900, stale-while-revalidate=86400";
const ACCEPT_IMAGES: &str = "image/avif,image/webp,image/apng,image/*,*/*;q=0.8";

#[derive(Debug, Deserialize)]
pub(super) struct ProxyParams {
    pub url: Option<String>,
}

/// `GET /api/image-proxy?url=`
///
/// 400 for a missing, unparsable, or non-http(s) target; 502 when the
/// upstream fails; otherwise the upstream body with passthrough
/// `Content-Type` and a passthrough-or-default `Cache-Control`.
pub(super) async fn proxy_image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<ProxyParams>,
) -> Result<Response, ApiError> {
    let raw = params
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "bad_request", "missing url parameter"))?;

    let target = parse_target_url(raw)
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "bad_request", "invalid image URL"))?;

    let upstream = state
        .proxy_client
        .get(target)
        .header(header::ACCEPT, ACCEPT_IMAGES)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, url = raw, "image proxy fetch failed");
            ApiError::new(
                req_id.0.clone(),
                "upstream_unavailable",
                "unable to fetch remote image",
            )
        })?;

    let status = upstream.status();
    if !status.is_success() {
        return Err(ApiError::new(
            req_id.0.clone(),
            "upstream_unavailable",
            format!("upstream image request failed ({})", status.as_u16()),
        ));
    }

    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let cache_control = upstream.headers().get(header::CACHE_CONTROL).cloned();

    let mut builder = Response::builder().status(StatusCode::OK);
    if let Some(value) = content_type {
        builder = builder.header(header::CONTENT_TYPE, value);
    }
    builder = builder.header(
        header::CACHE_CONTROL,
        cache_control
            .unwrap_or_else(|| header::HeaderValue::from_static(DEFAULT_CACHE_CONTROL)),
    );

    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| {
            tracing::error!(error = %e, "image proxy response build failed");
            ApiError::new(req_id.0, "internal_error", "image proxy failed")
        })
}

/// Parses the target, retrying once on a percent-decoded copy for callers
/// that double-encoded the parameter. Only http(s) schemes are allowed —
/// everything else (ftp, file, data) is rejected as invalid.
fn parse_target_url(raw: &str) -> Option<Url> {
    let candidate = Url::parse(raw).ok().or_else(|| {
        let decoded = percent_decode_str(raw).decode_utf8().ok()?;
        Url::parse(&decoded).ok()
    })?;

    match candidate.scheme() {
        "http" | "https" => Some(candidate),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_target_accepts_http_and_https() {
        assert!(parse_target_url("https://cdn.example.com/a.png").is_some());
        assert!(parse_target_url("http://cdn.example.com/a.png").is_some());
    }

    #[test]
    fn parse_target_rejects_other_schemes() {
        assert!(parse_target_url("ftp://example.com/a.png").is_none());
        assert!(parse_target_url("file:///etc/passwd").is_none());
        assert!(parse_target_url("data:image/png;base64,AAAA").is_none());
    }

    #[test]
    fn parse_target_rejects_garbage() {
        assert!(parse_target_url(":::").is_none());
        assert!(parse_target_url("not a url").is_none());
    }

    #[test]
    fn parse_target_retries_double_encoded_value() {
        assert!(parse_target_url("https%3A%2F%2Fcdn.example.com%2Fa.png").is_some());
    }
}
