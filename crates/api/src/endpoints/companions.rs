//! Travel companion endpoints: discovery, reservations and reviews.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use travelcloud_common::{AppError, AppResult};
use travelcloud_core::{CompanionDetail, CompanionEntry, NewReservation, ReservationEntry};
use travelcloud_db::entities::{
    companion_reservation::{self, ReservationStatus},
    companion_review, companion_tag,
};
use travelcloud_db::repositories::CompanionFilter;

use crate::{
    extractors::Identity,
    middleware::AppState,
    response::{ApiResponse, Paged, Pagination},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCompanionsRequest {
    pub location: Option<String>,
    pub tag_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(flatten)]
    pub page: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionDetailRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    pub companion_id: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    #[serde(default = "default_traveler_count")]
    pub traveler_count: i32,
    pub special_needs: Option<String>,
}

const fn default_traveler_count() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersRequest {
    /// Numeric lifecycle status to filter by.
    pub status: Option<i32>,
    #[serde(flatten)]
    pub page: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub reservation_id: String,
    pub status: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub reservation_id: String,
    pub rating: f64,
    pub content: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// List active companions, best rated first.
async fn list(
    State(state): State<AppState>,
    Json(req): Json<ListCompanionsRequest>,
) -> AppResult<ApiResponse<Paged<CompanionEntry>>> {
    let filter = CompanionFilter {
        location: req.location,
        tag_id: req.tag_id,
        min_price: req.min_price,
        max_price: req.max_price,
    };

    let (companions, total) = state
        .companion_service
        .list(filter, req.page.limit(), req.page.offset())
        .await?;

    Ok(ApiResponse::ok(Paged {
        list: companions,
        total,
    }))
}

/// Companion detail with tags and recent reviews.
async fn detail(
    State(state): State<AppState>,
    Json(req): Json<CompanionDetailRequest>,
) -> AppResult<ApiResponse<CompanionDetail>> {
    let companion = state.companion_service.detail(&req.id).await?;
    Ok(ApiResponse::ok(companion))
}

/// All companion tags.
async fn tags(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<companion_tag::Model>>> {
    let tags = state.companion_service.tags().await?;
    Ok(ApiResponse::ok(tags))
}

/// Book a companion. The reservation starts out Pending.
async fn reserve(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<ReserveRequest>,
) -> AppResult<ApiResponse<companion_reservation::Model>> {
    let reservation = state
        .companion_service
        .reserve(
            &openid,
            NewReservation {
                companion_id: req.companion_id,
                start_date: req.start_date,
                end_date: req.end_date,
                traveler_count: req.traveler_count,
                special_needs: req.special_needs,
            },
        )
        .await?;

    Ok(ApiResponse::ok(reservation))
}

/// The caller's reservations, newest first.
async fn orders(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<ListOrdersRequest>,
) -> AppResult<ApiResponse<Paged<ReservationEntry>>> {
    let status = req.status.map(parse_reservation_status).transpose()?;

    let (reservations, total) = state
        .companion_service
        .reservations(&openid, status, req.page.limit(), req.page.offset())
        .await?;

    Ok(ApiResponse::ok(Paged {
        list: reservations,
        total,
    }))
}

/// Move a reservation along its lifecycle.
async fn update_status(
    Identity(_openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<UpdateStatusRequest>,
) -> AppResult<ApiResponse<companion_reservation::Model>> {
    let next = parse_reservation_status(req.status)?;
    let reservation = state
        .companion_service
        .update_status(&req.reservation_id, next)
        .await?;

    Ok(ApiResponse::ok(reservation))
}

/// Review a completed reservation.
async fn review(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<ApiResponse<companion_review::Model>> {
    let review = state
        .companion_service
        .review(
            &openid,
            &req.reservation_id,
            req.rating,
            req.content,
            req.images,
        )
        .await?;

    Ok(ApiResponse::ok(review))
}

/// Map the wire-level numeric status onto the lifecycle enum.
fn parse_reservation_status(value: i32) -> AppResult<ReservationStatus> {
    match value {
        0 => Ok(ReservationStatus::Pending),
        1 => Ok(ReservationStatus::Confirmed),
        2 => Ok(ReservationStatus::Completed),
        3 => Ok(ReservationStatus::Cancelled),
        other => Err(AppError::Validation(format!(
            "unknown reservation status: {other}"
        ))),
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/detail", post(detail))
        .route("/tags", post(tags))
        .route("/reserve", post(reserve))
        .route("/orders", post(orders))
        .route("/status", post(update_status))
        .route("/review", post(review))
}
