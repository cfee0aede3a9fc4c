use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use fitcomp_aggregator::{CompareRequest, Comparison};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CompareParams {
    pub q: Option<String>,
    pub img: Option<String>,
    pub brand: Option<String>,
    pub url: Option<String>,
}

/// `GET /api/compare?q=&img=&brand=&url=`
///
/// Aggregates offers across every enabled provider. Provider failures
/// degrade to fewer offers; the only error this handler produces itself is
/// the missing-query validation failure.
pub(super) async fn get_comparison(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<CompareParams>,
) -> Result<Json<Comparison>, ApiError> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "bad_request", "missing q parameter"))?;

    let request = CompareRequest {
        query: query.to_string(),
        image: clean(params.img),
        brand: clean(params.brand),
        product_url: clean(params.url),
    };

    Ok(Json(state.aggregator.compare(&request).await))
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
