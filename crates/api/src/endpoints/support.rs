//! Feedback and about-info endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use travelcloud_common::AppResult;
use travelcloud_core::NewFeedback;
use travelcloud_db::entities::{about_info, feedback};
use validator::Validate;

use crate::{
    extractors::Identity,
    middleware::AppState,
    response::{ApiResponse, Paged, Pagination},
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    /// Category such as "bug" or "suggestion".
    #[serde(rename = "type")]
    pub kind: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    pub contact: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFeedbackRequest {
    #[serde(flatten)]
    pub page: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutRequest {
    /// Section key such as "about" or "privacy".
    #[serde(rename = "type")]
    pub kind: String,
}

/// Submit feedback.
async fn submit_feedback(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> AppResult<ApiResponse<feedback::Model>> {
    req.validate()?;

    let feedback = state
        .support_service
        .submit_feedback(
            &openid,
            NewFeedback {
                kind: req.kind,
                content: req.content,
                contact: req.contact,
                images: req.images,
            },
        )
        .await?;

    Ok(ApiResponse::ok(feedback))
}

/// List the caller's own feedback.
async fn list_feedback(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<ListFeedbackRequest>,
) -> AppResult<ApiResponse<Paged<feedback::Model>>> {
    let (entries, total) = state
        .support_service
        .my_feedback(&openid, req.page.limit(), req.page.offset())
        .await?;

    Ok(ApiResponse::ok(Paged {
        list: entries,
        total,
    }))
}

/// Fetch an about-info section by key.
async fn about_info(
    State(state): State<AppState>,
    Json(req): Json<AboutRequest>,
) -> AppResult<ApiResponse<about_info::Model>> {
    let info = state.support_service.about(&req.kind).await?;
    Ok(ApiResponse::ok(info))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/feedback/submit", post(submit_feedback))
        .route("/feedback/list", post(list_feedback))
        .route("/about/info", post(about_info))
}
