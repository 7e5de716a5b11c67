/// Suggested follow-up questions
use axum::Json;

use crate::api::types::SuggestionsRequest;
use crate::api::types::SuggestionsResponse;
use crate::suggestions;

/// POST /api/suggestions
pub async fn suggestions(Json(req): Json<SuggestionsRequest>) -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        questions: suggestions::contextual(req.last_reply.as_deref(), &req.asked),
    })
}
