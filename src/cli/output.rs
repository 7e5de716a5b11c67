//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the `olgagpt` CLI

use crate::audit::Analytics;
use crate::audit::SessionStats;
use crate::rag::RagAnswer;
use crate::AppConfig;

/// Safely truncate a string at character boundary (not byte boundary)
///
/// Returns the string with a "..." suffix if truncated, otherwise unchanged.
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Mask database URL for display (hide password)
#[must_use]
pub fn mask_database_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        if let Some(host) = parsed.host_str() {
            format!(
                "{}://{}@{}:{}{}",
                parsed.scheme(),
                parsed.username(),
                host,
                parsed.port().unwrap_or(5432),
                parsed.path()
            )
        } else {
            "***masked***".to_string()
        }
    } else {
        "***invalid***".to_string()
    }
}

/// Show only the last four characters of a secret
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.is_empty() {
        "(not set)".to_string()
    } else if chars.len() <= 8 {
        "****".to_string()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{tail}")
    }
}

/// Print configuration
pub fn print_config(config: &AppConfig) {
    println!("📋 OlgaGPT Configuration:");
    println!();

    println!("🌐 Server:");
    println!("  Address: {}:{}", config.server.host, config.server.port);
    println!("  CORS: {}", config.server.enable_cors);
    println!("  Request timeout: {}s", config.server.request_timeout_secs);
    println!();

    println!("🗄️  Storage:");
    println!("  Backend: {:?}", config.storage.backend);
    println!("  URL: {}", mask_database_url(config.database_url()));
    println!("  Max connections: {}", config.max_connections());
    println!("  Min connections: {}", config.min_connections());
    println!("  Connection timeout: {}s", config.connection_timeout());
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Directory: {}", config.logging.log_dir);
    println!();

    println!("🧠 Embeddings:");
    println!("  Provider: {}", config.embeddings.provider);
    println!("  Endpoint: {}", config.embeddings.endpoint);
    println!("  Model: {}", config.embeddings.model);
    println!("  Dimension: {}", config.embeddings.dimension);
    println!(
        "  Key: {}",
        mask_secret(config.embedding_api_key().unwrap_or_default())
    );
    println!();

    println!("🤖 LLM:");
    println!("  Endpoint: {}", config.llm.endpoint);
    println!("  Model: {}", config.llm.model);
    println!("  Max tokens: {}", config.llm.max_tokens);
    println!("  Temperature: {}", config.llm.temperature);
    println!("  Key: {}", mask_secret(&config.llm.api_key));
    println!();

    println!("🔎 RAG:");
    println!("  Top k: {}", config.rag.top_k);
    println!("  Max sources: {}", config.rag.max_sources);
    println!("  History window: {}", config.rag.history_window);
    println!("  Docs directory: {}", config.indexer.docs_dir);
    println!("  Media rules: {}", config.media.rules.len());
    println!();

    println!("📊 Audit:");
    println!("  Enabled: {}", config.audit.enabled);
    println!("  Retention: {} days", config.audit.retention_days);
}

pub fn print_answer(answer: &RagAnswer) {
    println!("{}", answer.reply);
    println!();
    if answer.sources.is_empty() {
        print_warning("No sources found; is the knowledge base indexed?");
        return;
    }

    println!("📚 Sources:");
    for ((source, confidence), distance) in answer
        .sources
        .iter()
        .zip(&answer.confidence)
        .zip(&answer.distances)
    {
        println!("  {source:<30} {confidence:>3}%  (distance {distance:.3})");
    }
    println!("🔢 Tokens used: {}", answer.tokens_used);
}

pub fn print_session_stats(stats: &SessionStats) {
    println!("📊 Session {}", stats.session_id);
    println!("  Questions: {}", stats.question_count);
    println!("  Total tokens: {}", stats.total_tokens);
    println!("  Avg response time: {:.0}ms", stats.average_response_time);
    println!("  Avg confidence: {:.1}%", stats.average_confidence);
    println!("  Total words: {}", stats.total_words);
    println!("  Total characters: {}", stats.total_characters);
    println!("  Created: {}", stats.created_at.format("%Y-%m-%d %H:%M"));
    println!("  Updated: {}", stats.updated_at.format("%Y-%m-%d %H:%M"));
}

pub fn print_analytics(analytics: &Analytics) {
    println!("📊 Audit Analytics");
    println!("  Sessions: {}", analytics.total_sessions);
    println!("  Questions: {}", analytics.total_questions);
    println!(
        "  Avg questions/session: {:.2}",
        analytics.average_questions_per_session
    );
    println!("  Avg response time: {:.0}ms", analytics.average_response_time);
    println!("  Avg confidence: {:.1}%", analytics.average_confidence);
    println!("  Total tokens: {}", analytics.total_tokens);
    println!("  Avg session duration: {:.1} min", analytics.session_duration);

    if !analytics.most_common_sources.is_empty() {
        println!();
        println!("📚 Most common sources:");
        for entry in &analytics.most_common_sources {
            println!("  {:>4}  {}", entry.count, entry.source);
        }
    }

    if !analytics.top_questions.is_empty() {
        println!();
        println!("❓ Top questions:");
        for entry in &analytics.top_questions {
            println!("  {:>4}  {}", entry.count, truncate_str(&entry.question, 70));
        }
    }
}

/// Print colored output functions
pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}
