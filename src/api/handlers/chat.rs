/// Retrieval-free chat handler
use axum::extract::State;
use axum::Json;
use tracing::error;
use tracing::info;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::types::ChatRequest;
use crate::api::types::ChatResponse;
use crate::llm::prompts::RECRUITER_CHAT_SYSTEM_PROMPT;
use crate::llm::ChatMessage;
use crate::llm::CompletionParams;

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = req.message.unwrap_or_default();
    info!("POST /api/chat: {}", message);

    let mut messages = Vec::with_capacity(req.history.len() + 2);
    messages.push(ChatMessage::system(RECRUITER_CHAT_SYSTEM_PROMPT));
    messages.extend(
        req.history
            .into_iter()
            .map(|m| ChatMessage::new(m.role, m.content)),
    );
    messages.push(ChatMessage::user(message));

    let params = CompletionParams {
        max_tokens: state.config.llm.max_tokens,
        temperature: state.config.llm.temperature,
    };

    match state.llm.complete(&messages, params).await {
        Ok(completion) => Ok(Json(ChatResponse {
            reply: completion.content,
        })),
        Err(e) => {
            error!("Error processing chat request: {}", e);
            Err(ApiError::internal("Failed to fetch from OpenAI"))
        }
    }
}
