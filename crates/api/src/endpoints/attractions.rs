//! Attraction endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use travelcloud_common::AppResult;
use travelcloud_db::entities::attraction;

use crate::{
    middleware::AppState,
    response::{ApiResponse, Paged, Pagination},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAttractionsRequest {
    pub category: Option<String>,
    #[serde(flatten)]
    pub page: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractionDetailRequest {
    pub id: String,
}

/// List attractions, optionally by category.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListAttractionsRequest>,
) -> AppResult<ApiResponse<Paged<attraction::Model>>> {
    let (attractions, total) = state
        .attraction_service
        .list(req.category.as_deref(), req.page.limit(), req.page.offset())
        .await?;

    Ok(ApiResponse::ok(Paged {
        list: attractions,
        total,
    }))
}

/// Attraction detail.
async fn detail(
    State(state): State<AppState>,
    Json(req): Json<AttractionDetailRequest>,
) -> AppResult<ApiResponse<attraction::Model>> {
    let attraction = state.attraction_service.detail(&req.id).await?;
    Ok(ApiResponse::ok(attraction))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/detail", post(detail))
}
