//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::audit::Analytics;
use crate::audit::SessionStats;
use crate::models::Attachments;
use crate::models::HistoryMessage;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /api/query
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryMessage>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Reply to a chat turn
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    pub sources: Vec<String>,
    pub confidence: Vec<u8>,
    pub session_id: String,
    #[serde(flatten)]
    pub attachments: Attachments,
}

/// POST /api/chat
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// GET /api/analytics query parameters
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub session_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum AnalyticsResponse {
    Session(SessionStats),
    Overall(Analytics),
}

/// POST /api/suggestions
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    #[serde(default)]
    pub last_reply: Option<String>,
    #[serde(default)]
    pub asked: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub questions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageAttachment;
    use crate::models::Role;

    #[test]
    fn test_query_request_accepts_legacy_history() {
        let req: QueryRequest = serde_json::from_str(
            r#"{"message": "hi", "sessionId": "abc",
                "history": [{"fromUser": true, "content": "q"}, {"content": "a"}]}"#,
        )
        .unwrap();

        assert_eq!(req.session_id.as_deref(), Some("abc"));
        assert_eq!(req.history[0].role, Role::User);
        assert_eq!(req.history[1].role, Role::Assistant);
    }

    #[test]
    fn test_chat_reply_flattens_attachments() {
        let reply = ChatReply {
            reply: "Hello".to_string(),
            sources: vec!["cv.md".to_string()],
            confidence: vec![85],
            session_id: "s1".to_string(),
            attachments: Attachments {
                image: Some(ImageAttachment {
                    src: "/olga.jpg".to_string(),
                    alt: "Olga".to_string(),
                    caption: None,
                }),
                ..Attachments::default()
            },
        };

        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["sessionId"], "s1");
        assert_eq!(json["image"]["src"], "/olga.jpg");
        assert!(json.get("carousel").is_none());
        assert!(json.get("timeline").is_none());
    }

    #[test]
    fn test_analytics_response_is_tagged() {
        let response = AnalyticsResponse::Overall(crate::audit::analytics::analytics(&[]));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "overall");
        assert_eq!(json["data"]["totalSessions"], 0);
    }
}
