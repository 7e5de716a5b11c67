//! Embedding generation service with preprocessing and batch splitting

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use tracing::warn;

use super::client::EmbeddingClient;
use super::client::EmbeddingProvider;
use super::preprocess_text_for_embedding;
use super::Embedder;
use super::EmbeddingConfig;
use super::MAX_BATCH_SIZE;
use crate::errors::Result;

/// Service for generating embeddings from the configured provider
pub struct EmbeddingService {
    client: Arc<EmbeddingClient>,
    config: EmbeddingConfig,
}

impl EmbeddingService {
    /// Create a new embedding service
    pub fn new(config: &crate::config::AppConfig) -> Result<Self> {
        Self::from_config(EmbeddingConfig::from_app_config(config))
    }

    /// Create from custom config
    pub fn from_config(config: EmbeddingConfig) -> Result<Self> {
        let client = EmbeddingClient::new(
            config.provider,
            config.model.clone(),
            config.endpoint.clone(),
            config.api_key.clone(),
        )?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    /// Generate embedding for a single text
    pub async fn generate(&self, text: &str) -> Result<Vec<f32>> {
        let processed_text = preprocess_text_for_embedding(text)?;
        self.client.generate(&processed_text).await
    }

    /// Generate embeddings for multiple texts in batch
    ///
    /// Texts that are empty after preprocessing get a zero vector at their
    /// original position.
    pub async fn generate_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut processed_texts = Vec::with_capacity(texts.len());
        let mut empty_positions = Vec::new();

        for (i, text) in texts.iter().enumerate() {
            match preprocess_text_for_embedding(text) {
                Ok(processed) => processed_texts.push(processed),
                Err(_) => empty_positions.push(i),
            }
        }

        if !empty_positions.is_empty() {
            warn!(
                "{} text(s) were empty after preprocessing, using zero vectors",
                empty_positions.len()
            );
        }

        let mut embeddings = Vec::with_capacity(texts.len());
        for chunk in processed_texts.chunks(MAX_BATCH_SIZE) {
            debug!("Embedding batch of {} text(s)", chunk.len());
            let chunk_embeddings = self
                .client
                .generate_batch(chunk.iter().map(String::as_str).collect())
                .await?;
            embeddings.extend(chunk_embeddings);
        }

        // Positions are ascending, so inserting in order restores the layout
        let zero_vector = vec![0.0; self.config.dimension];
        for pos in empty_positions {
            embeddings.insert(pos, zero_vector.clone());
        }

        Ok(embeddings)
    }

    /// Get the model name
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the provider
    #[must_use]
    pub const fn provider(&self) -> EmbeddingProvider {
        self.config.provider
    }
}

#[async_trait]
impl Embedder for EmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.generate(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.generate_batch(texts).await
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}
