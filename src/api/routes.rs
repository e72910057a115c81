//! API Route Configuration

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers::{self, AppState};
use super::middleware::logging_middleware;

/// Create the router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let assets = ServeDir::new(&state.config.static_dir);
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        // Pages & Health
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        // GTM generation
        .route("/generate-gtm-template", post(handlers::generate_gtm_template))
        .route("/simulate-consent", post(handlers::simulate_consent))
        // Privacy policy files
        .route("/upload-policy", post(handlers::upload_policy))
        .route("/download-template", get(handlers::download_template))
        // Analytics
        .route("/consent-analytics", get(handlers::consent_analytics))
        .nest_service("/static", assets)
        .with_state(state)
        // Middleware (order matters - bottom runs first)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}
