//! Favorite endpoints. Targets are polymorphic over guides and
//! attractions.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use travelcloud_common::{AppError, AppResult};
use travelcloud_core::{FavoriteEntry, FavoriteTarget};
use travelcloud_db::entities::favorite::{self, FavoriteKind};

use crate::{
    extractors::Identity,
    middleware::AppState,
    response::{ApiResponse, Paged, Pagination},
};

/// Favorite add/remove request. `kind` is "guide" or "attraction".
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub item_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFavoritesRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub page: Pagination,
}

/// Add a favorite. Duplicates are rejected by the unique index.
async fn add(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<FavoriteRequest>,
) -> AppResult<ApiResponse<favorite::Model>> {
    let target = FavoriteTarget::parse(&req.kind, &req.item_id)?;
    let favorite = state.favorite_service.add(&openid, &target).await?;
    Ok(ApiResponse::ok(favorite))
}

/// Remove a favorite. Removing one that is not there succeeds.
async fn remove(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<FavoriteRequest>,
) -> AppResult<ApiResponse<()>> {
    let target = FavoriteTarget::parse(&req.kind, &req.item_id)?;
    state.favorite_service.remove(&openid, &target).await?;
    Ok(ApiResponse::ok(()))
}

/// List the caller's favorites with their targets resolved.
async fn list(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<ListFavoritesRequest>,
) -> AppResult<ApiResponse<Paged<FavoriteEntry>>> {
    let kind = match req.kind.as_deref() {
        Some(raw) => Some(
            FavoriteKind::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("unknown favorite type: {raw}")))?,
        ),
        None => None,
    };

    let (favorites, total) = state
        .favorite_service
        .list(&openid, kind, req.page.limit(), req.page.offset())
        .await?;

    Ok(ApiResponse::ok(Paged {
        list: favorites,
        total,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add))
        .route("/remove", post(remove))
        .route("/list", post(list))
}
