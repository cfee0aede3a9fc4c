use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use fitcomp_core::CatalogueProduct;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const DEFAULT_LIMIT: usize = 24;
const MAX_LIMIT: usize = 60;

#[derive(Debug, Deserialize)]
pub(super) struct SearchParams {
    pub q: Option<String>,
    /// Kept as a raw string: a malformed limit falls back to the default
    /// instead of rejecting the whole request.
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SearchResponse {
    pub products: Vec<CatalogueProduct>,
}

/// Clamps the raw limit parameter into `[1, 60]`, defaulting to 24 for
/// absent, non-numeric, or non-positive values.
pub(super) fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .map_or(DEFAULT_LIMIT, |v| {
            usize::try_from(v).map_or(MAX_LIMIT, |v| v.min(MAX_LIMIT))
        })
}

/// `GET /api/search?q=&limit=`
///
/// Blank queries return an empty success; a total upstream failure maps to
/// 502. Responses are never cached — every request is a fresh aggregation.
pub(super) async fn search_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = parse_limit(params.limit.as_deref());
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();

    if query.is_empty() {
        return Ok((
            [(header::CACHE_CONTROL, "no-store")],
            Json(SearchResponse {
                products: Vec::new(),
            }),
        ));
    }

    let products = state
        .aggregator
        .search_products(query, limit)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, query, "search aggregation failed");
            ApiError::new(req_id.0.clone(), "upstream_unavailable", e.to_string())
        })?;

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(SearchResponse { products }),
    ))
}
