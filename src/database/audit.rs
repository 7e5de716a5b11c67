use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::Database;
use crate::audit::AnalyticsFilter;
use crate::models::AuditSession;
use crate::models::QuestionLog;
use crate::models::SessionMetadata;
use crate::store::AuditStore;
use crate::store::NewSession;
use crate::Result;

const SESSION_COLUMNS: &str = "session_id, created_at, updated_at, question_count, total_tokens, \
     user_agent, ip_address, referrer, last_question, last_response_time_ms";

const QUESTION_COLUMNS: &str = "id, session_id, question, response, confidence, sources, \
     response_time_ms, tokens_used, follow_up_to, question_number, timestamp, word_count, \
     character_count";

fn session_from_row(row: &PgRow) -> Result<AuditSession> {
    Ok(AuditSession {
        session_id: row.try_get("session_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        question_count: row.try_get::<i32, _>("question_count")? as u32,
        total_tokens: row.try_get::<i64, _>("total_tokens")? as u64,
        metadata: SessionMetadata {
            user_agent: row.try_get("user_agent")?,
            ip_address: row.try_get("ip_address")?,
            referrer: row.try_get("referrer")?,
        },
        last_question: row.try_get("last_question")?,
        last_response_time_ms: row
            .try_get::<Option<i64>, _>("last_response_time_ms")?
            .map(|ms| ms as u64),
        questions: Vec::new(),
    })
}

fn question_from_row(row: &PgRow) -> Result<QuestionLog> {
    Ok(QuestionLog {
        id: row.try_get("id")?,
        question: row.try_get("question")?,
        response: row.try_get("response")?,
        confidence: row
            .try_get::<Option<i16>, _>("confidence")?
            .map(|c| c.clamp(0, 100) as u8),
        sources: row.try_get("sources")?,
        response_time_ms: row.try_get::<i64, _>("response_time_ms")? as u64,
        tokens_used: row.try_get::<i32, _>("tokens_used")? as u32,
        follow_up_to: row.try_get("follow_up_to")?,
        question_number: row.try_get::<i32, _>("question_number")? as u32,
        timestamp: row.try_get("timestamp")?,
        word_count: row.try_get::<i32, _>("word_count")? as u32,
        character_count: row.try_get::<i32, _>("character_count")? as u32,
    })
}

impl Database {
    /// Questions for the given sessions, grouped by session id
    async fn questions_for(&self, session_ids: &[String]) -> Result<HashMap<String, Vec<QuestionLog>>> {
        let rows = sqlx::query(&format!(
            "SELECT {QUESTION_COLUMNS} FROM audit_questions \
             WHERE session_id = ANY($1) ORDER BY session_id, question_number, timestamp"
        ))
        .bind(session_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<String, Vec<QuestionLog>> = HashMap::new();
        for row in &rows {
            let session_id: String = row.try_get("session_id")?;
            grouped
                .entry(session_id)
                .or_default()
                .push(question_from_row(row)?);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl AuditStore for Database {
    async fn create_session(&self, session: NewSession) -> Result<String> {
        sqlx::query(
            r"
            INSERT INTO audit_sessions (session_id, user_agent, ip_address, referrer)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (session_id) DO NOTHING
            ",
        )
        .bind(&session.session_id)
        .bind(&session.metadata.user_agent)
        .bind(&session.metadata.ip_address)
        .bind(&session.metadata.referrer)
        .execute(&self.pool)
        .await?;

        Ok(session.session_id)
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<AuditSession>> {
        let row = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM audit_sessions WHERE session_id = $1"
        ))
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut session = session_from_row(&row)?;
        session.questions = self
            .questions_for(&[session_id.to_string()])
            .await?
            .remove(session_id)
            .unwrap_or_default();
        Ok(Some(session))
    }

    async fn append_question(&self, session_id: &str, log: QuestionLog) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r"
            UPDATE audit_sessions
            SET question_count = question_count + 1,
                total_tokens = total_tokens + $2,
                updated_at = GREATEST(updated_at, $3),
                last_question = $4,
                last_response_time_ms = $5
            WHERE session_id = $1
            ",
        )
        .bind(session_id)
        .bind(i64::from(log.tokens_used))
        .bind(log.timestamp)
        .bind(&log.question)
        .bind(log.response_time_ms as i64)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(&format!(
            "INSERT INTO audit_questions ({QUESTION_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"
        ))
        .bind(&log.id)
        .bind(session_id)
        .bind(&log.question)
        .bind(&log.response)
        .bind(log.confidence.map(i16::from))
        .bind(&log.sources)
        .bind(log.response_time_ms as i64)
        .bind(log.tokens_used as i32)
        .bind(&log.follow_up_to)
        .bind(log.question_number as i32)
        .bind(log.timestamp)
        .bind(log.word_count as i32)
        .bind(log.character_count as i32)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn list_sessions(&self, filter: &AnalyticsFilter) -> Result<Vec<AuditSession>> {
        let rows = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM audit_sessions \
             WHERE ($1::timestamptz IS NULL OR created_at >= $1) \
             AND ($2::timestamptz IS NULL OR created_at <= $2) \
             ORDER BY created_at, session_id"
        ))
        .bind(filter.start_date)
        .bind(filter.end_date)
        .fetch_all(&self.pool)
        .await?;

        let mut sessions = rows
            .iter()
            .map(session_from_row)
            .collect::<Result<Vec<_>>>()?;
        let ids: Vec<String> = sessions.iter().map(|s| s.session_id.clone()).collect();
        let mut questions = self.questions_for(&ids).await?;
        for session in &mut sessions {
            session.questions = questions.remove(&session.session_id).unwrap_or_default();
        }

        Ok(sessions)
    }

    async fn delete_sessions_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let result = sqlx::query("DELETE FROM audit_sessions WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() as usize)
    }
}
