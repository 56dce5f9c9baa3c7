//! News feed endpoints: listing, likes and two-level comments.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use travelcloud_common::AppResult;
use travelcloud_core::{CommentThread, NewsEntry};
use travelcloud_db::entities::news_comment;

use crate::{
    extractors::{Identity, MaybeIdentity},
    middleware::AppState,
    response::{ApiResponse, Paged, Pagination},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNewsRequest {
    pub category: Option<String>,
    #[serde(flatten)]
    pub page: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsDetailRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub news_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsRequest {
    pub news_id: String,
    #[serde(flatten)]
    pub page: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentRequest {
    pub news_id: String,
    pub content: String,
    pub parent_id: Option<String>,
}

/// List news, newest first, with the caller's like state.
async fn list(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Json(req): Json<ListNewsRequest>,
) -> AppResult<ApiResponse<Paged<NewsEntry>>> {
    let (posts, total) = state
        .news_service
        .list(
            req.category.as_deref(),
            identity.0.as_deref(),
            req.page.limit(),
            req.page.offset(),
        )
        .await?;

    Ok(ApiResponse::ok(Paged { list: posts, total }))
}

/// News detail. Bumps the view counter.
async fn detail(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Json(req): Json<NewsDetailRequest>,
) -> AppResult<ApiResponse<NewsEntry>> {
    let post = state
        .news_service
        .detail(&req.id, identity.0.as_deref())
        .await?;

    Ok(ApiResponse::ok(post))
}

/// Like a post. Liking twice is a conflict.
async fn like(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<LikeRequest>,
) -> AppResult<ApiResponse<()>> {
    state.news_service.like(&req.news_id, &openid).await?;
    Ok(ApiResponse::ok(()))
}

/// Take a like back. The counter never goes below zero.
async fn unlike(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<LikeRequest>,
) -> AppResult<ApiResponse<()>> {
    state.news_service.unlike(&req.news_id, &openid).await?;
    Ok(ApiResponse::ok(()))
}

/// Comment threads of a post.
async fn comments(
    State(state): State<AppState>,
    Json(req): Json<ListCommentsRequest>,
) -> AppResult<ApiResponse<Paged<CommentThread>>> {
    let (threads, total) = state
        .news_service
        .comments(&req.news_id, req.page.limit(), req.page.offset())
        .await?;

    Ok(ApiResponse::ok(Paged {
        list: threads,
        total,
    }))
}

/// Post a comment or a reply.
async fn comment(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<PostCommentRequest>,
) -> AppResult<ApiResponse<news_comment::Model>> {
    let comment = state
        .news_service
        .comment(&req.news_id, &openid, &req.content, req.parent_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(comment))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/detail", post(detail))
        .route("/like", post(like))
        .route("/unlike", post(unlike))
        .route("/comments", post(comments))
        .route("/comment", post(comment))
}
