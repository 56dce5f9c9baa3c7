//! User login and profile endpoints.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use travelcloud_common::AppResult;
use travelcloud_core::UserProfilePatch;
use travelcloud_db::entities::user;

use crate::{
    extractors::{Identity, MaybeIdentity},
    middleware::AppState,
    response::ApiResponse,
};

/// Login request. `openid` is only honored when the gateway header is
/// absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub openid: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub gender: Option<i32>,
    pub phone: Option<String>,
}

/// Profile update request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub gender: Option<i32>,
    pub phone: Option<String>,
}

/// Log in, creating the user on first sight.
async fn login(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<user::Model>> {
    let openid = identity.resolve(req.openid)?;
    let patch = UserProfilePatch {
        nickname: req.nickname,
        avatar: req.avatar,
        gender: req.gender,
        phone: req.phone,
    };

    let user = state.user_service.login(&openid, patch).await?;
    Ok(ApiResponse::ok(user))
}

/// Update the caller's profile.
async fn update(
    Identity(openid): Identity,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<ApiResponse<user::Model>> {
    let patch = UserProfilePatch {
        nickname: req.nickname,
        avatar: req.avatar,
        gender: req.gender,
        phone: req.phone,
    };

    let user = state.user_service.update_profile(&openid, patch).await?;
    Ok(ApiResponse::ok(user))
}

/// Fetch the caller's profile.
async fn info(
    Identity(openid): Identity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<user::Model>> {
    let user = state.user_service.get_profile(&openid).await?;
    Ok(ApiResponse::ok(user))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/update", post(update))
        .route("/info", post(info))
}
