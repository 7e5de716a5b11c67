//! Context assembly from retrieved chunks

use super::RetrievedChunk;
use crate::models::HistoryMessage;

/// Assembler for creating the prompt context from retrieved chunks
pub struct ContextAssembler {
    excerpt_chars: usize,
}

impl ContextAssembler {
    #[must_use]
    pub const fn new(excerpt_chars: usize) -> Self {
        Self { excerpt_chars }
    }

    /// `[Source i]: excerpt...` blocks separated by a blank line
    #[must_use]
    pub fn assemble(&self, results: &[RetrievedChunk]) -> String {
        results
            .iter()
            .enumerate()
            .map(|(idx, result)| {
                format!(
                    "[Source {}]: {}...",
                    idx + 1,
                    excerpt(&result.chunk.content, self.excerpt_chars)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(500)
    }
}

/// First `max_chars` characters of `text`
fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// The last `n` messages of the conversation
#[must_use]
pub fn history_window(history: &[HistoryMessage], n: usize) -> &[HistoryMessage] {
    &history[history.len().saturating_sub(n)..]
}
