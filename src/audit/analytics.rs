//! Aggregations over audited sessions

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::models::AuditSession;
use crate::models::QuestionLog;

const TOP_N: usize = 10;

/// Inclusive `created_at` bounds for analytics queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl AnalyticsFilter {
    #[must_use]
    pub fn contains(&self, created_at: DateTime<Utc>) -> bool {
        self.start_date.map_or(true, |start| created_at >= start)
            && self.end_date.map_or(true, |end| created_at <= end)
    }
}

/// Statistics for a single session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub session_id: String,
    pub question_count: usize,
    pub total_tokens: u64,
    /// Milliseconds
    pub average_response_time: f64,
    pub average_confidence: f64,
    pub total_words: u64,
    pub total_characters: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCount {
    pub source: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCount {
    pub question: String,
    pub count: usize,
}

/// Statistics across every session matching a filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_sessions: usize,
    pub total_questions: usize,
    pub average_questions_per_session: f64,
    pub average_response_time: f64,
    pub average_confidence: f64,
    pub total_tokens: u64,
    pub most_common_sources: Vec<SourceCount>,
    pub top_questions: Vec<QuestionCount>,
    /// Mean minutes between session creation and last update
    pub session_duration: f64,
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn average_response_time<'a>(questions: impl Iterator<Item = &'a QuestionLog>) -> f64 {
    let (sum, count) = questions.fold((0.0, 0), |(sum, count), q| {
        (sum + q.response_time_ms as f64, count + 1)
    });
    mean(sum, count)
}

fn average_confidence<'a>(questions: impl Iterator<Item = &'a QuestionLog>) -> f64 {
    let (sum, count) = questions.fold((0.0, 0), |(sum, count), q| {
        (sum + f64::from(q.confidence.unwrap_or(0)), count + 1)
    });
    mean(sum, count)
}

/// Count descending, ties by key ascending, at most `TOP_N`
fn rank(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(key_a, count_a), (key_b, count_b)| {
        count_b.cmp(count_a).then_with(|| key_a.cmp(key_b))
    });
    ranked.truncate(TOP_N);
    ranked
}

#[must_use]
pub fn session_stats(session: &AuditSession) -> SessionStats {
    let questions = &session.questions;
    SessionStats {
        session_id: session.session_id.clone(),
        question_count: questions.len(),
        total_tokens: session.total_tokens,
        average_response_time: average_response_time(questions.iter()),
        average_confidence: average_confidence(questions.iter()),
        total_words: questions.iter().map(|q| u64::from(q.word_count)).sum(),
        total_characters: questions.iter().map(|q| u64::from(q.character_count)).sum(),
        created_at: session.created_at,
        updated_at: session.updated_at,
    }
}

#[must_use]
pub fn most_common_sources<'a>(questions: impl Iterator<Item = &'a QuestionLog>) -> Vec<SourceCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for source in questions.flat_map(|q| q.sources.iter()) {
        *counts.entry(source.clone()).or_default() += 1;
    }
    rank(counts)
        .into_iter()
        .map(|(source, count)| SourceCount { source, count })
        .collect()
}

/// Most frequent questions, compared lowercased and trimmed
#[must_use]
pub fn top_questions<'a>(questions: impl Iterator<Item = &'a QuestionLog>) -> Vec<QuestionCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for question in questions {
        *counts
            .entry(question.question.trim().to_lowercase())
            .or_default() += 1;
    }
    rank(counts)
        .into_iter()
        .map(|(question, count)| QuestionCount { question, count })
        .collect()
}

#[must_use]
pub fn average_session_duration(sessions: &[AuditSession]) -> f64 {
    let total_minutes: f64 = sessions
        .iter()
        .map(|s| (s.updated_at - s.created_at).num_milliseconds() as f64 / 60_000.0)
        .sum();
    mean(total_minutes, sessions.len())
}

#[must_use]
pub fn analytics(sessions: &[AuditSession]) -> Analytics {
    let all_questions = || sessions.iter().flat_map(|s| s.questions.iter());
    let total_questions = all_questions().count();

    Analytics {
        total_sessions: sessions.len(),
        total_questions,
        average_questions_per_session: mean(total_questions as f64, sessions.len()),
        average_response_time: average_response_time(all_questions()),
        average_confidence: average_confidence(all_questions()),
        total_tokens: sessions.iter().map(|s| s.total_tokens).sum(),
        most_common_sources: most_common_sources(all_questions()),
        top_questions: top_questions(all_questions()),
        session_duration: average_session_duration(sessions),
    }
}
