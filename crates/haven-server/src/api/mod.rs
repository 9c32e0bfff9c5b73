mod cache;
mod categories;
mod resources;
mod search;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use haven_core::Coordinate;
use haven_discovery::{DiscoveryEngine, DiscoveryError, SystemClock};
use haven_geo::NominatimClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{request_id, RequestId};

pub type Engine = DiscoveryEngine<NominatimClient, SystemClock>;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Default and bounds for the `radius` query parameter, in meters.
pub(super) fn normalize_radius(radius: Option<f64>) -> f64 {
    radius.unwrap_or(5_000.0).clamp(100.0, 50_000.0)
}

/// Builds the search center from optional `lat`/`lon` query parameters.
/// Out-of-range values are a validation error; absence is `None`, which the
/// engine rejects before any provider call.
pub(super) fn parse_center(
    request_id: &str,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<Option<Coordinate>, ApiError> {
    match (lat, lon) {
        (None, None) => Ok(None),
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(ApiError::new(
                    request_id,
                    "validation_error",
                    "lat must be in [-90, 90] and lon in [-180, 180]",
                ));
            }
            Ok(Some(Coordinate::new(lat, lon)))
        }
        _ => Err(ApiError::new(
            request_id,
            "validation_error",
            "lat and lon must be provided together",
        )),
    }
}

pub(super) fn map_discovery_error(request_id: String, error: &DiscoveryError) -> ApiError {
    match error {
        DiscoveryError::NoLocation => ApiError::new(
            request_id,
            "validation_error",
            "lat and lon are required for this operation",
        ),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/categories", get(categories::list_categories))
        .route("/api/v1/resources", get(resources::list_resources))
        .route("/api/v1/search", get(search::search_resources))
        .route("/api/v1/cache", delete(cache::clear_cache))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData { status: "ok" },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}
