//! One-shot question handler

use std::sync::Arc;

use crate::api::load_memory_knowledge;
use crate::api::open_stores;
use crate::cli::output::*;
use crate::config::StorageBackend;
use crate::embeddings::Embedder;
use crate::embeddings::EmbeddingService;
use crate::errors::OlgaGptError;
use crate::llm::ChatModel;
use crate::llm::LlmService;
use crate::rag::RagService;
use crate::AppConfig;
use crate::Result;

/// Answer a single question through the RAG pipeline, without auditing
pub async fn handle_ask_command(config: &AppConfig, question: String) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        return Err(OlgaGptError::InvalidRequest(
            "Question must not be empty".to_string(),
        ));
    }

    let (knowledge, _) = open_stores(config).await?;
    let embedder: Arc<dyn Embedder> = Arc::new(EmbeddingService::new(config)?);
    let llm: Arc<dyn ChatModel> = Arc::new(LlmService::new(config)?);

    if config.storage.backend == StorageBackend::Memory {
        load_memory_knowledge(config, knowledge.clone(), embedder.clone()).await?;
    }

    let rag = RagService::from_config(config, knowledge, embedder, llm);
    print_info(&format!("🤔 {question}"));
    println!();

    let answer = rag.answer(question, &[]).await?;
    print_answer(&answer);

    Ok(())
}
