/// API request handlers
use std::sync::Arc;

use axum::Json;

use crate::api::types::ApiResponse;
use crate::api::types::HealthResponse;
use crate::audit::AuditLogger;
use crate::config::AppConfig;
use crate::llm::ChatModel;
use crate::rag::RagService;

pub mod analytics;
pub mod chat;
pub mod query;
pub mod suggestions;

pub use analytics::*;
pub use chat::*;
pub use query::*;
pub use suggestions::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub rag: Arc<RagService>,
    pub llm: Arc<dyn ChatModel>,
    pub audit: AuditLogger,
    pub config: Arc<AppConfig>,
}

/// Health check handler
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
