//! Router configuration for the web server.

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

use crate::storage::MAX_IMAGE_BYTES;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Web interface
        .route("/", get(handlers::home_page))
        .route(
            "/analyze",
            get(handlers::analyze_form).post(handlers::analyze_submit),
        )
        .route("/history", get(handlers::history_page))
        .route("/results/:id", get(handlers::results_page))
        .route("/detail/:id", get(handlers::detail_page))
        .route("/download/:id", get(handlers::download_report))
        // API
        .route(
            "/api/analyze",
            get(handlers::api_analyze_info).post(handlers::api_analyze),
        )
        .route("/api/classifications", get(handlers::api_list))
        .route("/api/classifications/:id", get(handlers::api_detail))
        .route("/api/download/:id", get(handlers::download_report))
        .route("/health", get(handlers::health))
        // Media and static assets
        .route("/media/*path", get(handlers::serve_media))
        .route("/static/style.css", get(handlers::serve_css))
        // Leave headroom above the 10 MB image cap so multipart framing does
        // not trip the transport limit before validation runs.
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 1024 * 1024))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
