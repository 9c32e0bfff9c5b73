use std::str::FromStr;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use haven_core::ResourceCategory;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct CacheQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct CacheCleared {
    cleared: String,
}

/// Drops cached results, either for one category or across the board.
pub(super) async fn clear_cache(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<CacheQuery>,
) -> Result<Json<ApiResponse<CacheCleared>>, ApiError> {
    let cleared = match query.category.as_deref() {
        None => {
            state.engine.clear_all();
            "all".to_owned()
        }
        Some(raw) => {
            let category = ResourceCategory::from_str(raw)
                .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e))?;
            state.engine.clear_category(category);
            category.slug().to_owned()
        }
    };
    tracing::info!(scope = %cleared, "cache invalidated");

    Ok(Json(ApiResponse {
        data: CacheCleared { cleared },
        meta: ResponseMeta::new(req_id.0),
    }))
}
