//! Travel guide endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use travelcloud_common::AppResult;
use travelcloud_core::{GuideDetail, NewGuide};
use travelcloud_db::entities::travel_guide;

use crate::{
    extractors::MaybeIdentity,
    middleware::AppState,
    response::{ApiResponse, Paged, Pagination},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGuidesRequest {
    #[serde(flatten)]
    pub page: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideDetailRequest {
    pub id: String,
}

/// Guide creation request. There is no editorial backend, any caller
/// may publish.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuideRequest {
    pub title: String,
    pub cover_image: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

/// List guides, newest first.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListGuidesRequest>,
) -> AppResult<ApiResponse<Paged<travel_guide::Model>>> {
    let (guides, total) = state
        .guide_service
        .list(req.page.limit(), req.page.offset())
        .await?;

    Ok(ApiResponse::ok(Paged {
        list: guides,
        total,
    }))
}

/// Guide detail with the caller's favorite state.
async fn detail(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Json(req): Json<GuideDetailRequest>,
) -> AppResult<ApiResponse<GuideDetail>> {
    let guide = state
        .guide_service
        .detail(&req.id, identity.0.as_deref())
        .await?;

    Ok(ApiResponse::ok(guide))
}

/// Publish a guide.
async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateGuideRequest>,
) -> AppResult<ApiResponse<travel_guide::Model>> {
    let guide = state
        .guide_service
        .create(NewGuide {
            title: req.title,
            cover_image: req.cover_image,
            description: req.description,
            content: req.content,
            author: req.author,
        })
        .await?;

    Ok(ApiResponse::ok(guide))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/detail", post(detail))
        .route("/create", post(create))
}
