use axum::{Extension, Json};
use haven_core::ResourceCategory;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct CategoryItem {
    slug: &'static str,
    label: &'static str,
    icon: &'static str,
    color: &'static str,
}

/// The full category catalog, in display (priority) order.
pub(super) async fn list_categories(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<CategoryItem>>> {
    let data = ResourceCategory::catalog()
        .map(|category| CategoryItem {
            slug: category.slug(),
            label: category.label(),
            icon: category.icon(),
            color: category.color(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
