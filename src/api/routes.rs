//! API route definitions

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

const MAX_BODY_BYTES: usize = 256 * 1024;

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Chat endpoints
        .route("/query", post(handlers::query))
        .route("/chat", post(handlers::chat))
        .route("/suggestions", post(handlers::suggestions))
        // Audit analytics
        .route("/analytics", get(handlers::analytics))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// Full application router with the API nested under `/api`
pub fn create_router(state: AppState) -> Router {
    Router::new().nest("/api", api_routes(state))
}
