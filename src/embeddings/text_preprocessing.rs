//! Text preprocessing utilities for embedding generation
//!
//! Provides utilities for cleaning, normalizing, and chunking text before embedding generation.

use tracing::debug;
use tracing::warn;

use crate::errors::OlgaGptError;

/// Longest text sent to the embeddings API in one input
const MAX_EMBEDDING_CHARS: usize = 8000;

/// Preprocess text for embedding generation
///
/// This function handles:
/// - Normalizing whitespace and newlines
/// - Removing control characters
/// - Truncating overly long input at a word boundary
pub fn preprocess_text_for_embedding(text: &str) -> Result<String, OlgaGptError> {
    let sanitized = sanitize_text(text);

    if sanitized.is_empty() {
        return Err(OlgaGptError::EmbeddingError(
            "Text contains only whitespace after preprocessing".to_string(),
        ));
    }

    if sanitized.chars().count() > MAX_EMBEDDING_CHARS {
        warn!(
            "Text too long ({} chars), truncating to {}",
            sanitized.chars().count(),
            MAX_EMBEDDING_CHARS
        );
        return Ok(truncate_at_word(&sanitized, MAX_EMBEDDING_CHARS));
    }

    debug!(
        "Preprocessed text: {} -> {} chars",
        text.len(),
        sanitized.len()
    );
    Ok(sanitized)
}

/// Collapse every whitespace run to a single space and trim
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Split text into sentence-packed chunks of at most `max_chars` characters
///
/// Sentences end at runs of `.`, `!` or `?` and are re-terminated with a
/// period. A single sentence longer than `max_chars` becomes its own chunk.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    let sentences = text
        .split(['.', '!', '?'])
        .map(clean_text)
        .filter(|s| !s.is_empty());

    for sentence in sentences {
        let sentence = format!("{sentence}.");
        let sentence_len = sentence.chars().count();
        let joined_len = if current.is_empty() {
            sentence_len
        } else {
            current_len + 1 + sentence_len
        };

        if joined_len <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&sentence);
            current_len = joined_len;
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current = sentence;
            current_len = sentence_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Strip control characters and normalize whitespace
fn sanitize_text(text: &str) -> String {
    let without_controls: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    clean_text(&without_controls)
}

/// Truncate to `max_chars`, backing off to the last space when possible
fn truncate_at_word(text: &str, max_chars: usize) -> String {
    let truncated: String = text.chars().take(max_chars).collect();
    match truncated.rfind(' ') {
        Some(pos) if pos > max_chars / 2 => truncated[..pos].to_string(),
        _ => truncated,
    }
}
