use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::controllers::{
    analysis::AnalysisController, events::EventsController, health, profile::ProfileController,
    reviews::ReviewsController, session::SessionController,
};
use crate::domain::analysis::AnalysisService;
use crate::domain::extraction::ReviewExtractor;
use crate::domain::profile::ProfileService;
use crate::domain::session::JwtManager;
use crate::infrastructure::auth::{request_id_middleware, session_middleware};
use crate::infrastructure::config::Config;
use crate::infrastructure::events::EventBus;
use crate::infrastructure::repositories::{ProfileStore, SummaryHistoryStore};

/// Wire services and controllers over the given stores and build the router
pub fn build_app(
    config: &Config,
    profile_store: Arc<dyn ProfileStore>,
    summary_store: Arc<dyn SummaryHistoryStore>,
) -> Router {
    let events = EventBus::new(config.event_channel_capacity);
    let jwt = Arc::new(JwtManager::new(
        config.jwt_secret.clone(),
        config.jwt_expiration_hours,
    ));

    // Services
    let profile_service = Arc::new(ProfileService::new(
        profile_store.clone(),
        config.quota_limits(),
        events.clone(),
        config.profile_cache_enabled,
    ));
    let analysis_service = Arc::new(AnalysisService::new(
        profile_service.clone(),
        summary_store,
        Arc::new(ReviewExtractor::new()),
        events.clone(),
        config.history_limits(),
    ));

    // Controllers
    let session_controller = Arc::new(SessionController::new(profile_service.clone()));
    let profile_controller = Arc::new(ProfileController::new(profile_service));
    let reviews_controller = Arc::new(ReviewsController::new(analysis_service.clone()));
    let analysis_controller = Arc::new(AnalysisController::new(analysis_service));
    let events_controller = Arc::new(EventsController::new(events));

    let session_routes = Router::new()
        .route(
            "/api/session",
            post(SessionController::sign_in).delete(SessionController::sign_out),
        )
        .with_state(session_controller);

    let profile_routes = Router::new()
        .route("/api/me", get(ProfileController::get_me))
        .route("/api/me/upgrade", post(ProfileController::upgrade))
        .route(
            "/api/me/preferences",
            put(ProfileController::update_preferences),
        )
        .with_state(profile_controller);

    let review_routes = Router::new()
        .route("/api/reviews/extract", post(ReviewsController::extract))
        .route("/api/reviews/check", post(ReviewsController::check))
        .route("/api/reviews/process", post(ReviewsController::process))
        .route("/api/pages/product", get(ReviewsController::product_page))
        .with_state(reviews_controller);

    let analysis_routes = Router::new()
        .route("/api/analyze", post(AnalysisController::analyze))
        .route("/api/summaries", get(AnalysisController::history))
        .with_state(analysis_controller);

    let event_routes = Router::new()
        .route("/api/events/track", post(EventsController::track))
        .route("/api/events/stream", get(EventsController::stream))
        .with_state(events_controller);

    // Every /api route sees a SessionContext, anonymous or signed in
    let api_routes = Router::new()
        .merge(session_routes)
        .merge(profile_routes)
        .merge(review_routes)
        .merge(analysis_routes)
        .merge(event_routes)
        .layer(middleware::from_fn_with_state(jwt, session_middleware));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(profile_store)
        .merge(api_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bind the configured address and serve until shutdown
pub async fn start_http_server(
    config: &Config,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
