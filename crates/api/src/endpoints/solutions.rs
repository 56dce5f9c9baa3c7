//! Solution template endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use travelcloud_common::AppResult;
use travelcloud_core::ApplyOutcome;
use travelcloud_db::entities::solution;

use crate::{
    extractors::Identity,
    middleware::AppState,
    response::{ApiResponse, Paged, Pagination},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSolutionsRequest {
    /// Trip length in days.
    pub duration: Option<i32>,
    /// 1 easy through 3 hard.
    pub difficulty: Option<i32>,
    #[serde(flatten)]
    pub page: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionDetailRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub solution_id: String,
    /// First travel day. When present a plan is spawned from the
    /// template.
    pub travel_date: Option<chrono::NaiveDate>,
    pub notes: Option<String>,
}

/// List solutions, most viewed first.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListSolutionsRequest>,
) -> AppResult<ApiResponse<Paged<solution::Model>>> {
    let (solutions, total) = state
        .solution_service
        .list(
            req.duration,
            req.difficulty,
            req.page.limit(),
            req.page.offset(),
        )
        .await?;

    Ok(ApiResponse::ok(Paged {
        list: solutions,
        total,
    }))
}

/// Solution detail. Bumps the view counter.
async fn detail(
    State(state): State<AppState>,
    Json(req): Json<SolutionDetailRequest>,
) -> AppResult<ApiResponse<solution::Model>> {
    let solution = state.solution_service.detail(&req.id).await?;
    Ok(ApiResponse::ok(solution))
}

/// Apply a solution, optionally spawning a plan from it.
async fn apply(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<ApplyRequest>,
) -> AppResult<ApiResponse<ApplyOutcome>> {
    let outcome = state
        .solution_service
        .apply(&openid, &req.solution_id, req.travel_date, req.notes)
        .await?;

    Ok(ApiResponse::ok(outcome))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/detail", post(detail))
        .route("/apply", post(apply))
}
