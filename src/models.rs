use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Metadata stored alongside every knowledge chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
    pub source: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
}

/// A piece of a knowledge-base document with its embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: Uuid,
    pub content: String,
    pub source: String,
    pub chunk_index: usize,
    pub embedding: Vec<f32>,
    pub metadata: ChunkMetadata,
    pub created_at: DateTime<Utc>,
}

impl DocumentChunk {
    /// Build a freshly indexed chunk
    #[must_use]
    pub fn new(
        content: String,
        source: String,
        chunk_index: usize,
        total_chunks: usize,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            metadata: ChunkMetadata {
                source: source.clone(),
                chunk_index,
                total_chunks,
            },
            content,
            source,
            chunk_index,
            embedding,
            created_at: Utc::now(),
        }
    }
}

/// One earlier turn of the conversation, as sent by the chat client
///
/// Accepts either `role` or the legacy `fromUser` flag on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireHistoryMessage")]
pub struct HistoryMessage {
    pub role: Role,
    pub content: String,
}

impl HistoryMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireHistoryMessage {
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    from_user: Option<bool>,
    #[serde(default)]
    content: String,
}

impl From<WireHistoryMessage> for HistoryMessage {
    fn from(wire: WireHistoryMessage) -> Self {
        let role = match (wire.role, wire.from_user) {
            (Some(role), _) => role,
            (None, Some(true)) => Role::User,
            (None, _) => Role::Assistant,
        };
        Self {
            role,
            content: wire.content,
        }
    }
}

/// Single image attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Career milestone shown in a timeline attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub year: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Rich media returned next to a reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attachments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageAttachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carousel: Option<Vec<ImageAttachment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Vec<TimelineEntry>>,
}

impl Attachments {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.image.is_none() && self.carousel.is_none() && self.timeline.is_none()
    }
}

/// Keyword rule that attaches media to replies about a topic
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaRule {
    pub keywords: Vec<String>,
    pub image: Option<ImageAttachment>,
    pub carousel: Option<Vec<ImageAttachment>>,
    pub timeline: Option<Vec<TimelineEntry>>,
}

/// Request metadata captured when an audit session starts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetadata {
    pub user_agent: String,
    pub ip_address: String,
    pub referrer: String,
}

/// One audited question/answer pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionLog {
    pub id: String,
    pub question: String,
    pub response: String,
    pub confidence: Option<u8>,
    pub sources: Vec<String>,
    pub response_time_ms: u64,
    pub tokens_used: u32,
    pub follow_up_to: Option<String>,
    pub question_number: u32,
    pub timestamp: DateTime<Utc>,
    pub word_count: u32,
    pub character_count: u32,
}

/// Audit record for one browser chat session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSession {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub question_count: u32,
    pub total_tokens: u64,
    #[serde(flatten)]
    pub metadata: SessionMetadata,
    pub last_question: Option<String>,
    pub last_response_time_ms: Option<u64>,
    pub questions: Vec<QuestionLog>,
}

impl AuditSession {
    /// Start an empty session
    #[must_use]
    pub fn new(session_id: String, metadata: SessionMetadata) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            created_at: now,
            updated_at: now,
            question_count: 0,
            total_tokens: 0,
            metadata,
            last_question: None,
            last_response_time_ms: None,
            questions: Vec::new(),
        }
    }

    /// Append a question and roll the running aggregates forward
    pub fn push_question(&mut self, log: QuestionLog) {
        self.question_count += 1;
        self.total_tokens += u64::from(log.tokens_used);
        self.updated_at = log.timestamp.max(self.updated_at);
        self.last_question = Some(log.question.clone());
        self.last_response_time_ms = Some(log.response_time_ms);
        self.questions.push(log);
    }
}
