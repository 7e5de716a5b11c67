//! In-process store used by tests and the `memory` storage backend

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::RwLock;

use super::AuditStore;
use super::KnowledgeStore;
use super::NewSession;
use crate::audit::AnalyticsFilter;
use crate::errors::Result;
use crate::models::AuditSession;
use crate::models::DocumentChunk;
use crate::models::QuestionLog;

#[derive(Default)]
pub struct MemoryStore {
    chunks: RwLock<Vec<DocumentChunk>>,
    sessions: DashMap<String, AuditSession>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with knowledge chunks
    #[must_use]
    pub fn with_chunks(chunks: Vec<DocumentChunk>) -> Self {
        Self {
            chunks: RwLock::new(chunks),
            sessions: DashMap::new(),
        }
    }
}

#[async_trait]
impl KnowledgeStore for MemoryStore {
    async fn all_chunks(&self) -> Result<Vec<DocumentChunk>> {
        Ok(self.chunks.read().await.clone())
    }

    async fn replace_all(&self, chunks: Vec<DocumentChunk>) -> Result<usize> {
        let count = chunks.len();
        *self.chunks.write().await = chunks;
        Ok(count)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.chunks.read().await.len())
    }
}

#[async_trait]
impl AuditStore for MemoryStore {
    async fn create_session(&self, session: NewSession) -> Result<String> {
        let session_id = session.session_id.clone();
        self.sessions
            .entry(session.session_id.clone())
            .or_insert_with(|| AuditSession::new(session.session_id, session.metadata));
        Ok(session_id)
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<AuditSession>> {
        Ok(self.sessions.get(session_id).map(|s| s.value().clone()))
    }

    async fn append_question(&self, session_id: &str, log: QuestionLog) -> Result<bool> {
        match self.sessions.get_mut(session_id) {
            Some(mut session) => {
                session.push_question(log);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_sessions(&self, filter: &AnalyticsFilter) -> Result<Vec<AuditSession>> {
        let mut sessions: Vec<AuditSession> = self
            .sessions
            .iter()
            .filter(|entry| filter.contains(entry.created_at))
            .map(|entry| entry.value().clone())
            .collect();
        sessions.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.session_id.cmp(&b.session_id))
        });
        Ok(sessions)
    }

    async fn delete_sessions_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.created_at >= cutoff);
        Ok(before - self.sessions.len())
    }
}
