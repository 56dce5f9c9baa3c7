//! User follow endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use travelcloud_common::AppResult;
use travelcloud_core::FollowEntry;

use crate::{
    extractors::{Identity, MaybeIdentity},
    middleware::AppState,
    response::{ApiResponse, Paged, Pagination},
};

/// Follow/unfollow request naming the other user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub target_openid: String,
}

/// Follower/following listing request. Without an explicit `openid`
/// the caller's own list is returned.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFollowsRequest {
    pub openid: Option<String>,
    #[serde(flatten)]
    pub page: Pagination,
}

/// Follow another user.
async fn follow(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<FollowRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .social_service
        .follow(&openid, &req.target_openid)
        .await?;

    Ok(ApiResponse::ok(()))
}

/// Unfollow. Without an existing edge this is NotFound.
async fn unfollow(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<FollowRequest>,
) -> AppResult<ApiResponse<()>> {
    state
        .social_service
        .unfollow(&openid, &req.target_openid)
        .await?;

    Ok(ApiResponse::ok(()))
}

/// Users the subject follows.
async fn following(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Json(req): Json<ListFollowsRequest>,
) -> AppResult<ApiResponse<Paged<FollowEntry>>> {
    let subject = match req.openid {
        Some(openid) => openid,
        None => identity.resolve(None)?,
    };

    let (entries, total) = state
        .social_service
        .following(&subject, req.page.limit(), req.page.offset())
        .await?;

    Ok(ApiResponse::ok(Paged {
        list: entries,
        total,
    }))
}

/// Users following the subject, annotated with follow-back state.
async fn followers(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Json(req): Json<ListFollowsRequest>,
) -> AppResult<ApiResponse<Paged<FollowEntry>>> {
    let subject = match req.openid {
        Some(openid) => openid,
        None => identity.resolve(None)?,
    };

    let (entries, total) = state
        .social_service
        .followers(&subject, req.page.limit(), req.page.offset())
        .await?;

    Ok(ApiResponse::ok(Paged {
        list: entries,
        total,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(follow))
        .route("/delete", post(unfollow))
        .route("/following", post(following))
        .route("/followers", post(followers))
}
