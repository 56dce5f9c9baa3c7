//! API middleware.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use travelcloud_core::{
    AttractionService, CompanionService, FavoriteService, NewsService, SearchService,
    SocialService, SolutionService, SupportService, TravelGuideService, TravelPlanService,
    UserService,
};

use crate::extractors::Identity;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub guide_service: TravelGuideService,
    pub attraction_service: AttractionService,
    pub favorite_service: FavoriteService,
    pub plan_service: TravelPlanService,
    pub companion_service: CompanionService,
    pub news_service: NewsService,
    pub social_service: SocialService,
    pub solution_service: SolutionService,
    pub search_service: SearchService,
    pub support_service: SupportService,
}

/// Identity resolution middleware. The hosting gateway authenticates
/// the caller and injects their openid as the `x-wx-openid` header;
/// an empty header is treated as anonymous.
pub async fn identity_middleware(mut req: Request<Body>, next: Next) -> Response {
    let openid = req
        .headers()
        .get("x-wx-openid")
        .and_then(|header| header.to_str().ok())
        .filter(|openid| !openid.is_empty())
        .map(str::to_string);
    if let Some(openid) = openid {
        req.extensions_mut().insert(Identity(openid));
    }

    next.run(req).await
}
