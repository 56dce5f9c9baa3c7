//! Cross-entity search endpoint.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use travelcloud_common::AppResult;
use travelcloud_core::{SearchResults, SearchScope};

use crate::{
    middleware::AppState,
    response::{ApiResponse, Pagination},
};

/// Search request. `scope` defaults to searching everything.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub keyword: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(flatten)]
    pub page: Pagination,
}

fn default_scope() -> String {
    "all".to_string()
}

/// Keyword search across attractions, news, companions and solutions.
async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> AppResult<ApiResponse<SearchResults>> {
    let scope = SearchScope::parse(&req.scope)?;
    let results = state
        .search_service
        .search(&req.keyword, scope, req.page.limit(), req.page.offset())
        .await?;

    Ok(ApiResponse::ok(results))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/search", post(search))
}
