//! Route definitions for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use super::handlers;
use super::state::AppState;

/// Create the main router with all endpoints.
///
/// The documentation tree itself is mounted under `/docs` so that result
/// anchors resolve to real pages.
pub fn create_router(state: AppState) -> Router {
    let docs = ServeDir::new(state.docs_root.clone());

    Router::new()
        // Search UI
        .route("/", get(handlers::index_page))
        // API endpoints
        .route("/api/search", post(handlers::search))
        .route("/api/entries", get(handlers::list_entries))
        .route("/api/entries/{key}", get(handlers::get_entry))
        .route("/api/stats", get(handlers::stats))
        .route("/api/reload", post(handlers::reload))
        // Health and metrics
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics_handler))
        // The generated documentation pages the anchors point into
        .nest_service("/docs", docs)
        // Embedded static assets fallback
        .fallback(get(handlers::static_file))
        .with_state(state)
}
