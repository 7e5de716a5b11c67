//! Embeddings generation module
//!
//! This module provides functionality for generating text embeddings using:
//! - OpenAI (text-embedding-3-small, text-embedding-ada-002, etc.)
//! - Ollama (local models)
//!
//! The [`Embedder`] trait is the seam the RAG pipeline and the indexer depend
//! on; [`EmbeddingService`] is the production implementation.
//!
//! # Examples
//!
//! ```rust,no_run
//! use olgagpt::config::AppConfig;
//! use olgagpt::embeddings::{Embedder, EmbeddingService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = EmbeddingService::new(&config)?;
//!
//!     let embedding = service.embed("How do you build teams?").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod generator;
pub mod text_preprocessing;

use async_trait::async_trait;
pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;
pub use generator::EmbeddingService;
pub use text_preprocessing::chunk_text;
pub use text_preprocessing::clean_text;
pub use text_preprocessing::preprocess_text_for_embedding;

use crate::errors::Result;

/// Maximum number of inputs sent in one embeddings request
pub const MAX_BATCH_SIZE: usize = 100;

/// Anything that can turn text into vectors
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several texts, preserving input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Dimension of the produced vectors
    fn dimension(&self) -> usize;
}

/// Configuration for embedding generation
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub dimension: usize,
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl EmbeddingConfig {
    pub fn from_app_config(config: &crate::config::AppConfig) -> Self {
        let provider = if config.embeddings.provider == "ollama" {
            EmbeddingProvider::Ollama
        } else {
            EmbeddingProvider::OpenAI
        };

        Self {
            provider,
            model: config.embeddings.model.clone(),
            dimension: config.embeddings.dimension,
            endpoint: config.embeddings.endpoint.trim_end_matches('/').to_string(),
            api_key: config.embedding_api_key().map(str::to_string),
        }
    }
}
