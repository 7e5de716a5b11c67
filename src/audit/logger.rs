//! Audit logging of chat sessions

use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;
use uuid::Uuid;

use super::analytics;
use super::Analytics;
use super::AnalyticsFilter;
use super::SessionStats;
use crate::config::AuditConfig;
use crate::errors::OlgaGptError;
use crate::errors::Result;
use crate::models::QuestionLog;
use crate::models::SessionMetadata;
use crate::store::AuditStore;
use crate::store::NewSession;

/// One answered question, as reported by the request handler
#[derive(Debug, Clone, Default)]
pub struct QuestionRecord {
    pub question: String,
    pub response: String,
    pub confidence: Option<u8>,
    pub sources: Vec<String>,
    pub response_time_ms: u64,
    pub tokens_used: u32,
    /// Defaults to the session's previous count + 1
    pub question_number: Option<u32>,
}

/// Records sessions and questions into an [`AuditStore`]
#[derive(Clone)]
pub struct AuditLogger {
    store: Arc<dyn AuditStore>,
    enabled: bool,
}

impl AuditLogger {
    #[must_use]
    pub fn new(store: Arc<dyn AuditStore>, enabled: bool) -> Self {
        Self { store, enabled }
    }

    #[must_use]
    pub fn from_config(store: Arc<dyn AuditStore>, config: &AuditConfig) -> Self {
        Self::new(store, config.enabled)
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Open a new audit session
    pub async fn create_session(&self, session_id: &str, metadata: SessionMetadata) -> Result<String> {
        let id = self
            .store
            .create_session(NewSession {
                session_id: session_id.to_string(),
                metadata,
            })
            .await?;
        info!("Created audit session: {}", id);
        Ok(id)
    }

    /// Log a question and its response
    ///
    /// Never fails: storage errors are logged and dropped.
    pub async fn log_question(&self, session_id: &str, record: QuestionRecord) {
        if let Err(e) = self.try_log_question(session_id, record).await {
            error!("Error logging question for session {}: {}", session_id, e);
        }
    }

    async fn try_log_question(&self, session_id: &str, record: QuestionRecord) -> Result<()> {
        let session = match self.store.get_session(session_id).await? {
            Some(session) => session,
            None => {
                warn!("Session not found for logging, creating it: {}", session_id);
                self.create_session(session_id, SessionMetadata::default())
                    .await?;
                self.store.get_session(session_id).await?.ok_or_else(|| {
                    OlgaGptError::NotFound(format!("audit session {session_id}"))
                })?
            }
        };

        let question_number = record
            .question_number
            .unwrap_or(session.question_count + 1);
        let log = QuestionLog {
            id: Uuid::new_v4().to_string(),
            follow_up_to: session.questions.last().map(|q| q.id.clone()),
            question_number,
            timestamp: Utc::now(),
            word_count: record.response.split_whitespace().count() as u32,
            character_count: record.response.chars().count() as u32,
            question: record.question,
            response: record.response,
            confidence: record.confidence,
            sources: record.sources,
            response_time_ms: record.response_time_ms,
            tokens_used: record.tokens_used,
        };

        if self.store.append_question(session_id, log).await? {
            debug!("Logged question {} for session: {}", question_number, session_id);
        } else {
            warn!("Session disappeared before logging: {}", session_id);
        }
        Ok(())
    }

    /// Fire-and-forget audit of one chat turn
    ///
    /// Opens the session first when `new_session` carries its metadata.
    /// Returns `None` when auditing is disabled.
    pub fn record_turn(
        &self,
        session_id: String,
        new_session: Option<SessionMetadata>,
        record: QuestionRecord,
    ) -> Option<JoinHandle<()>> {
        if !self.enabled {
            return None;
        }

        let logger = self.clone();
        Some(tokio::spawn(async move {
            if let Some(metadata) = new_session {
                if let Err(e) = logger.create_session(&session_id, metadata).await {
                    error!("Error creating audit session {}: {}", session_id, e);
                }
            }
            logger.log_question(&session_id, record).await;
        }))
    }

    pub async fn session_stats(&self, session_id: &str) -> Result<Option<SessionStats>> {
        Ok(self
            .store
            .get_session(session_id)
            .await?
            .as_ref()
            .map(analytics::session_stats))
    }

    pub async fn analytics(&self, filter: &AnalyticsFilter) -> Result<Analytics> {
        let sessions = self.store.list_sessions(filter).await?;
        Ok(analytics::analytics(&sessions))
    }

    /// Delete sessions created more than `days_old` days ago
    pub async fn cleanup_old_logs(&self, days_old: i64) -> Result<usize> {
        let cutoff = Utc::now() - Duration::days(days_old);
        let removed = self.store.delete_sessions_before(cutoff).await?;
        info!("Cleaned up {} old audit sessions", removed);
        Ok(removed)
    }
}
