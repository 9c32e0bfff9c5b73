use axum::{
    extract::{Query, State},
    Extension, Json,
};
use haven_discovery::FetchOutcome;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{
    map_discovery_error, normalize_radius, parse_center, ApiError, ApiResponse, AppState,
    ResponseMeta,
};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub q: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<f64>,
}

/// Free-text resource search around a coordinate.
pub(super) async fn search_resources(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<FetchOutcome>>, ApiError> {
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            ApiError::new(req_id.0.clone(), "validation_error", "q is required")
        })?;
    let center = parse_center(&req_id.0, query.lat, query.lon)?;
    let radius = normalize_radius(query.radius);

    let outcome = state
        .engine
        .search_free_text(q, center, radius)
        .await
        .map_err(|e| map_discovery_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: outcome,
        meta: ResponseMeta::new(req_id.0),
    }))
}
