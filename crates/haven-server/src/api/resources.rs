use std::str::FromStr;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use haven_core::ResourceCategory;
use haven_discovery::FetchOutcome;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{
    map_discovery_error, normalize_radius, parse_center, ApiError, ApiResponse, AppState,
    ResponseMeta,
};

#[derive(Debug, Deserialize)]
pub(super) struct ResourceQuery {
    pub category: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub radius: Option<f64>,
}

/// Fetch resources for one category (or the whole catalog with
/// `category=all`, the default) around a coordinate.
pub(super) async fn list_resources(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<ApiResponse<FetchOutcome>>, ApiError> {
    let category = match query.category.as_deref() {
        None => ResourceCategory::All,
        Some(raw) => ResourceCategory::from_str(raw)
            .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e))?,
    };
    let center = parse_center(&req_id.0, query.lat, query.lon)?;
    let radius = normalize_radius(query.radius);

    let outcome = state
        .engine
        .fetch_by_category(category, center, radius)
        .await
        .map_err(|e| map_discovery_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: outcome,
        meta: ResponseMeta::new(req_id.0),
    }))
}
