//! Knowledge base indexing handler

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::open_stores;
use crate::cli::output::*;
use crate::config::StorageBackend;
use crate::embeddings::Embedder;
use crate::embeddings::EmbeddingService;
use crate::indexer::Indexer;
use crate::AppConfig;
use crate::Result;

/// Rebuild the knowledge base from the markdown documents in `docs_dir`
pub async fn handle_index_command(config: &AppConfig, docs_dir: Option<PathBuf>) -> Result<()> {
    let docs_dir = docs_dir.unwrap_or_else(|| PathBuf::from(&config.indexer.docs_dir));

    if config.storage.backend == StorageBackend::Memory {
        print_warning("storage.backend is 'memory'; the index is rebuilt on every serve and discarded here.");
    }

    print_info(&format!("📂 Indexing documents from {}", docs_dir.display()));
    let (knowledge, _) = open_stores(config).await?;
    let embedder: Arc<dyn Embedder> = Arc::new(EmbeddingService::new(config)?);

    let report = Indexer::new(knowledge, embedder, config)
        .run(&docs_dir)
        .await?;

    if report.files == 0 {
        print_warning("No markdown files found; the knowledge base is now empty");
    } else {
        print_success(&format!(
            "Indexed {} chunks from {} files",
            report.chunks, report.files
        ));
    }

    Ok(())
}
