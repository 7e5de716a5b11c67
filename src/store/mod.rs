//! Storage seams for the knowledge base and the audit trail

pub mod memory;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
pub use memory::MemoryStore;

use crate::audit::AnalyticsFilter;
use crate::errors::Result;
use crate::models::AuditSession;
use crate::models::DocumentChunk;
use crate::models::QuestionLog;
use crate::models::SessionMetadata;

/// Session to be opened in the audit store
#[derive(Debug, Clone)]
pub struct NewSession {
    pub session_id: String,
    pub metadata: SessionMetadata,
}

/// Embedded document chunks
#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Every stored chunk, in insertion order
    async fn all_chunks(&self) -> Result<Vec<DocumentChunk>>;

    /// Drop the current knowledge base and store `chunks` instead
    async fn replace_all(&self, chunks: Vec<DocumentChunk>) -> Result<usize>;

    async fn count(&self) -> Result<usize>;
}

/// Per-session question/answer audit records
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Open a session. Re-creating an existing session keeps its history.
    async fn create_session(&self, session: NewSession) -> Result<String>;

    async fn get_session(&self, session_id: &str) -> Result<Option<AuditSession>>;

    /// Append a question and update the session aggregates
    ///
    /// Returns `false` when the session does not exist.
    async fn append_question(&self, session_id: &str, log: QuestionLog) -> Result<bool>;

    /// Sessions whose `created_at` falls inside the filter, oldest first
    async fn list_sessions(&self, filter: &AnalyticsFilter) -> Result<Vec<AuditSession>>;

    /// Delete sessions created before `cutoff`, returning how many were removed
    async fn delete_sessions_before(&self, cutoff: DateTime<Utc>) -> Result<usize>;
}
