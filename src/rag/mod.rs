//! RAG (Retrieval-Augmented Generation) module
//!
//! Answers questions about Olga's career from the indexed knowledge base:
//! - Brute-force cosine retrieval over every stored chunk
//! - Per-source deduplication and confidence scoring
//! - Context assembly and a single chat completion
//! - Keyword-driven media attachments
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use olgagpt::config::AppConfig;
//! use olgagpt::embeddings::EmbeddingService;
//! use olgagpt::llm::LlmService;
//! use olgagpt::rag::RagService;
//! use olgagpt::store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = RagService::from_config(
//!         &config,
//!         Arc::new(MemoryStore::new()),
//!         Arc::new(EmbeddingService::new(&config)?),
//!         Arc::new(LlmService::new(&config)?),
//!     );
//!
//!     let answer = service.answer("How do you build teams?", &[]).await?;
//!     println!("{} ({:?})", answer.reply, answer.sources);
//!     Ok(())
//! }
//! ```

pub mod confidence;
pub mod context;
pub mod media;
pub mod pipeline;
pub mod retriever;
pub mod similarity;

pub use confidence::confidence_from_distance;
pub use context::history_window;
pub use context::ContextAssembler;
pub use media::select_attachments;
pub use pipeline::RagAnswer;
pub use pipeline::RagService;
pub use retriever::Retriever;

use crate::models::DocumentChunk;

/// A stored chunk scored against the query
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    pub chunk: DocumentChunk,
    pub similarity: f32,
    pub distance: f32,
}

impl RetrievedChunk {
    #[must_use]
    pub fn source(&self) -> &str {
        &self.chunk.metadata.source
    }
}
