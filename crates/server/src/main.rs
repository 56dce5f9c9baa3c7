//! travelcloud server entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, middleware};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use travelcloud_api::{AppState, router as api_router};
use travelcloud_common::Config;
use travelcloud_core::{
    AttractionService, CompanionService, FavoriteService, NewsService, SearchService,
    SocialService, SolutionService, SupportService, TravelGuideService, TravelPlanService,
    UserService,
};
use travelcloud_db::repositories::{
    AboutInfoRepository, AttractionRepository, CompanionRepository, FavoriteRepository,
    FeedbackRepository, NewsRepository, SolutionRepository, TravelGuideRepository,
    TravelPlanRepository, UserFollowRepository, UserRepository,
};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travelcloud=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting travelcloud server...");

    let config = Config::load()?;

    let db = travelcloud_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    travelcloud_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let guide_repo = TravelGuideRepository::new(Arc::clone(&db));
    let attraction_repo = AttractionRepository::new(Arc::clone(&db));
    let favorite_repo = FavoriteRepository::new(Arc::clone(&db));
    let plan_repo = TravelPlanRepository::new(Arc::clone(&db));
    let companion_repo = CompanionRepository::new(Arc::clone(&db));
    let news_repo = NewsRepository::new(Arc::clone(&db));
    let follow_repo = UserFollowRepository::new(Arc::clone(&db));
    let solution_repo = SolutionRepository::new(Arc::clone(&db));
    let feedback_repo = FeedbackRepository::new(Arc::clone(&db));
    let about_repo = AboutInfoRepository::new(Arc::clone(&db));

    // Initialize services
    let state = AppState {
        user_service: UserService::new(user_repo.clone()),
        guide_service: TravelGuideService::new(guide_repo.clone(), favorite_repo.clone()),
        attraction_service: AttractionService::new(attraction_repo.clone()),
        favorite_service: FavoriteService::new(
            favorite_repo,
            guide_repo,
            attraction_repo.clone(),
        ),
        plan_service: TravelPlanService::new(plan_repo.clone(), attraction_repo.clone()),
        companion_service: CompanionService::new(companion_repo.clone()),
        news_service: NewsService::new(news_repo.clone()),
        social_service: SocialService::new(follow_repo, user_repo),
        solution_service: SolutionService::new(solution_repo.clone(), plan_repo),
        search_service: SearchService::new(
            attraction_repo,
            news_repo,
            companion_repo,
            solution_repo,
        ),
        support_service: SupportService::new(feedback_repo, about_repo),
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn(
            travelcloud_api::middleware::identity_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
