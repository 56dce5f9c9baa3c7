//! API endpoints.

mod attractions;
mod companions;
mod favorites;
mod guides;
mod news;
mod plans;
mod search;
mod social;
mod solutions;
mod support;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/user", users::router())
        .nest("/guides", guides::router())
        .nest("/attractions", attractions::router())
        .nest("/favorites", favorites::router())
        .nest("/plans", plans::router())
        .nest("/companions", companions::router())
        .nest("/news", news::router())
        .nest("/follow", social::router())
        .nest("/solutions", solutions::router())
        .merge(search::router())
        .merge(support::router())
}
