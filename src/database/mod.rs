//! PostgreSQL storage backend

use sqlx::PgPool;

use crate::Result;

mod audit;
mod knowledge;
mod schema;

/// Database connection pool wrapper
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new database instance from configuration
    pub async fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        let pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.min_connections())
            .acquire_timeout(std::time::Duration::from_secs(config.connection_timeout()));

        let pool = pool_options.connect(config.database_url()).await?;

        tracing::info!(
            "Database pool configured: max_connections={}, min_connections={}",
            config.max_connections(),
            config.min_connections()
        );

        Ok(Self::new(pool))
    }

    /// Get a reference to the database pool for raw queries
    #[must_use]
    pub const fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::audit::AnalyticsFilter;
    use crate::config::AppConfig;
    use crate::models::DocumentChunk;
    use crate::models::QuestionLog;
    use crate::models::SessionMetadata;
    use crate::store::AuditStore;
    use crate::store::KnowledgeStore;
    use crate::store::NewSession;

    async fn connect() -> Database {
        let config = AppConfig::load().expect("Failed to load config");
        let db = Database::from_config(&config)
            .await
            .expect("Failed to connect to database");
        db.init_schema().await.expect("Failed to init schema");
        db
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL with pgvector"]
    async fn test_knowledge_roundtrip() {
        let db = connect().await;
        let chunks = vec![
            DocumentChunk::new("Led R&D.".into(), "cv.md".into(), 0, 2, vec![0.1, 0.2, 0.3]),
            DocumentChunk::new("Built teams.".into(), "cv.md".into(), 1, 2, vec![0.3, 0.2, 0.1]),
        ];

        assert_eq!(db.replace_all(chunks).await.unwrap(), 2);
        assert_eq!(KnowledgeStore::count(&db).await.unwrap(), 2);

        let stored = db.all_chunks().await.unwrap();
        assert_eq!(stored[0].content, "Led R&D.");
        assert_eq!(stored[1].metadata.total_chunks, 2);
        assert_eq!(stored[1].embedding, vec![0.3, 0.2, 0.1]);
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL with pgvector"]
    async fn test_audit_roundtrip() {
        let db = connect().await;
        let session_id = uuid::Uuid::new_v4().to_string();
        db.create_session(NewSession {
            session_id: session_id.clone(),
            metadata: SessionMetadata {
                user_agent: "it".to_string(),
                ip_address: "127.0.0.1".to_string(),
                referrer: String::new(),
            },
        })
        .await
        .unwrap();

        let log = QuestionLog {
            id: uuid::Uuid::new_v4().to_string(),
            question: "What do you value?".to_string(),
            response: "Ownership.".to_string(),
            confidence: Some(77),
            sources: vec!["values.md".to_string()],
            response_time_ms: 900,
            tokens_used: 150,
            follow_up_to: None,
            question_number: 1,
            timestamp: Utc::now(),
            word_count: 1,
            character_count: 10,
        };
        let orphan = QuestionLog {
            id: uuid::Uuid::new_v4().to_string(),
            ..log.clone()
        };
        assert!(db.append_question(&session_id, log).await.unwrap());
        assert!(!db.append_question("missing", orphan).await.unwrap());

        let session = db.get_session(&session_id).await.unwrap().unwrap();
        assert_eq!(session.question_count, 1);
        assert_eq!(session.total_tokens, 150);
        assert_eq!(session.questions[0].sources, vec!["values.md"]);
        assert_eq!(session.metadata.user_agent, "it");

        let listed = db.list_sessions(&AnalyticsFilter::default()).await.unwrap();
        assert!(listed.iter().any(|s| s.session_id == session_id));
    }
}
