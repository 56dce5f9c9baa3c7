//! Travel plan endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use travelcloud_common::AppResult;
use travelcloud_core::{NewPlan, NewPlanItem, PlanDetail};
use travelcloud_db::entities::{travel_plan, travel_plan_item};

use crate::{
    extractors::Identity,
    middleware::AppState,
    response::{ApiResponse, Paged, Pagination},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItemRequest {
    pub day: i32,
    pub attraction_id: Option<String>,
    pub time_period: Option<String>,
    pub note: Option<String>,
}

impl From<PlanItemRequest> for NewPlanItem {
    fn from(req: PlanItemRequest) -> Self {
        Self {
            day: req.day,
            attraction_id: req.attraction_id,
            time_period: req.time_period,
            note: req.note,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    pub title: String,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<PlanItemRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlanItemRequest {
    pub plan_id: String,
    #[serde(flatten)]
    pub item: PlanItemRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPlansRequest {
    #[serde(flatten)]
    pub page: Pagination,
}

/// Create a plan with its initial itinerary.
async fn create(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<CreatePlanRequest>,
) -> AppResult<ApiResponse<travel_plan::Model>> {
    let plan = state
        .plan_service
        .create(
            &openid,
            NewPlan {
                title: req.title,
                start_date: req.start_date,
                end_date: req.end_date,
                description: req.description,
                items: req.items.into_iter().map(Into::into).collect(),
            },
        )
        .await?;

    Ok(ApiResponse::ok(plan))
}

/// Append one item to a plan.
async fn add_item(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<AddPlanItemRequest>,
) -> AppResult<ApiResponse<travel_plan_item::Model>> {
    let item = state
        .plan_service
        .add_item(&req.plan_id, &openid, req.item.into())
        .await?;

    Ok(ApiResponse::ok(item))
}

/// List the caller's plans.
async fn list(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<ListPlansRequest>,
) -> AppResult<ApiResponse<Paged<travel_plan::Model>>> {
    let (plans, total) = state
        .plan_service
        .list(&openid, req.page.limit(), req.page.offset())
        .await?;

    Ok(ApiResponse::ok(Paged { list: plans, total }))
}

/// Plan detail with its day-ordered itinerary.
async fn detail(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<PlanRequest>,
) -> AppResult<ApiResponse<PlanDetail>> {
    let plan = state.plan_service.detail(&req.id, Some(&openid)).await?;
    Ok(ApiResponse::ok(plan))
}

/// Delete a plan and its items.
async fn delete(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<PlanRequest>,
) -> AppResult<ApiResponse<()>> {
    state.plan_service.delete(&req.id, &openid).await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/items/add", post(add_item))
        .route("/list", post(list))
        .route("/detail", post(detail))
        .route("/delete", post(delete))
}
