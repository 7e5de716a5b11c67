/// RAG chat handler
use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::ConnectInfo;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::Json;
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::types::ChatReply;
use crate::api::types::QueryRequest;
use crate::audit::QuestionRecord;
use crate::models::SessionMetadata;

fn header_str(headers: &HeaderMap, name: impl header::AsHeaderName) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Client address: first `X-Forwarded-For` hop, else the peer address
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(ToString::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_default()
}

fn session_metadata(headers: &HeaderMap, peer: Option<SocketAddr>) -> SessionMetadata {
    SessionMetadata {
        user_agent: header_str(headers, header::USER_AGENT),
        ip_address: client_ip(headers, peer),
        referrer: header_str(headers, header::REFERER),
    }
}

/// POST /api/query
pub async fn query(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(req): Json<QueryRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let message = req.message.as_deref().map(str::trim).unwrap_or_default();
    if message.is_empty() {
        return Err(ApiError::bad_request("Message is required"));
    }
    info!("POST /api/query: {}", message);

    let started = Instant::now();
    let answer = state.rag.answer_or_fallback(message, &req.history).await;
    let response_time_ms = started.elapsed().as_millis() as u64;

    let (session_id, new_session) = match req.session_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => (id, None),
        None => {
            let peer = connect_info.map(|ConnectInfo(addr)| addr);
            (
                Uuid::new_v4().to_string(),
                Some(session_metadata(&headers, peer)),
            )
        }
    };

    state.audit.record_turn(
        session_id.clone(),
        new_session,
        QuestionRecord {
            question: message.to_string(),
            response: answer.reply.clone(),
            confidence: answer.top_confidence(),
            sources: answer.sources.clone(),
            response_time_ms,
            tokens_used: answer.tokens_used,
            question_number: None,
        },
    );

    Ok(Json(ChatReply {
        reply: answer.reply,
        sources: answer.sources,
        confidence: answer.confidence,
        session_id,
        attachments: answer.attachments,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let peer: SocketAddr = "127.0.0.1:5000".parse().unwrap();
        assert_eq!(client_ip(&headers, Some(peer)), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_falls_back_to_peer() {
        let peer: SocketAddr = "192.0.2.10:443".parse().unwrap();
        assert_eq!(client_ip(&HeaderMap::new(), Some(peer)), "192.0.2.10");
        assert_eq!(client_ip(&HeaderMap::new(), None), "");
    }

    #[test]
    fn test_session_metadata_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        headers.insert(header::REFERER, HeaderValue::from_static("https://olga.dev/"));

        let metadata = session_metadata(&headers, None);
        assert_eq!(metadata.user_agent, "Mozilla/5.0");
        assert_eq!(metadata.referrer, "https://olga.dev/");
        assert_eq!(metadata.ip_address, "");
    }
}
