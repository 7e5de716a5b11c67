//! Knowledge-base indexing: markdown files -> chunks -> embeddings -> store

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::embeddings::chunk_text;
use crate::embeddings::Embedder;
use crate::errors::OlgaGptError;
use crate::errors::Result;
use crate::models::DocumentChunk;
use crate::store::KnowledgeStore;

/// Outcome of an indexing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub files: usize,
    pub chunks: usize,
}

struct PendingChunk {
    content: String,
    source: String,
    chunk_index: usize,
    total_chunks: usize,
}

pub struct Indexer {
    store: Arc<dyn KnowledgeStore>,
    embedder: Arc<dyn Embedder>,
    max_chunk_chars: usize,
    batch_size: usize,
    batch_delay: Duration,
}

impl Indexer {
    #[must_use]
    pub fn new(store: Arc<dyn KnowledgeStore>, embedder: Arc<dyn Embedder>, config: &AppConfig) -> Self {
        Self {
            store,
            embedder,
            max_chunk_chars: config.indexer.max_chunk_chars,
            batch_size: config.embeddings.batch_size.max(1),
            batch_delay: Duration::from_millis(config.embeddings.batch_delay_ms),
        }
    }

    /// Rebuild the knowledge base from every `*.md` file in `docs_dir`
    ///
    /// # Errors
    /// - `Io` when the directory or a file cannot be read
    /// - Embedding errors for any batch (nothing is stored in that case)
    /// - Store write errors
    pub async fn run(&self, docs_dir: &Path) -> Result<IndexReport> {
        info!("Loading markdown files from {}", docs_dir.display());
        let files = markdown_files(docs_dir).await?;

        let mut pending = Vec::new();
        for path in &files {
            let content = tokio::fs::read_to_string(path).await?;
            let source = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            let pieces = chunk_text(&content, self.max_chunk_chars);
            let total_chunks = pieces.len();
            pending.extend(pieces.into_iter().enumerate().map(|(chunk_index, content)| {
                PendingChunk {
                    content,
                    source: source.clone(),
                    chunk_index,
                    total_chunks,
                }
            }));
        }
        info!("Loaded {} text chunks from {} files", pending.len(), files.len());

        if pending.is_empty() {
            warn!("No markdown content found in {}", docs_dir.display());
        }

        let embeddings = self.embed_all(&pending).await?;
        let chunks: Vec<DocumentChunk> = pending
            .into_iter()
            .zip(embeddings)
            .map(|(p, embedding)| {
                DocumentChunk::new(p.content, p.source, p.chunk_index, p.total_chunks, embedding)
            })
            .collect();

        let stored = self.store.replace_all(chunks).await?;
        info!("Indexed {} chunks from {} files", stored, files.len());

        Ok(IndexReport {
            files: files.len(),
            chunks: stored,
        })
    }

    async fn embed_all(&self, pending: &[PendingChunk]) -> Result<Vec<Vec<f32>>> {
        let texts: Vec<String> = pending.iter().map(|p| p.content.clone()).collect();
        let total_batches = texts.len().div_ceil(self.batch_size);
        let mut embeddings = Vec::with_capacity(texts.len());

        for (batch_idx, batch) in texts.chunks(self.batch_size).enumerate() {
            let vectors = self.embedder.embed_batch(batch).await?;
            if vectors.len() != batch.len() {
                return Err(OlgaGptError::EmbeddingError(format!(
                    "Expected {} embeddings, got {}",
                    batch.len(),
                    vectors.len()
                )));
            }
            embeddings.extend(vectors);
            info!("Processed batch {}/{}", batch_idx + 1, total_batches);

            if batch_idx + 1 < total_batches && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        Ok(embeddings)
    }
}

/// `*.md` files directly inside `dir`, sorted by file name
async fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_markdown = path.extension().is_some_and(|ext| ext == "md");
        if is_markdown && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use async_trait::async_trait;

    use super::*;
    use crate::store::MemoryStore;

    #[derive(Default)]
    struct CountingEmbedder {
        batches: AtomicUsize,
    }

    #[async_trait]
    impl Embedder for CountingEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.len() as f32, 1.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.batches.fetch_add(1, Ordering::SeqCst);
            Ok(texts.iter().map(|t| vec![t.len() as f32, 1.0]).collect())
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    fn config(batch_size: usize) -> AppConfig {
        let mut config = AppConfig::default();
        config.indexer.max_chunk_chars = 40;
        config.embeddings.batch_size = batch_size;
        config.embeddings.batch_delay_ms = 0;
        config
    }

    #[tokio::test]
    async fn test_run_indexes_markdown_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("b_leadership.md"),
            "I build teams. I coach managers. I hire for curiosity!",
        )
        .unwrap();
        std::fs::write(dir.path().join("a_cv.md"), "VP R&D since 2019.").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "Not indexed.").unwrap();

        let store = Arc::new(MemoryStore::new());
        let embedder = Arc::new(CountingEmbedder::default());
        let indexer = Indexer::new(store.clone(), embedder.clone(), &config(2));

        let report = indexer.run(dir.path()).await.unwrap();
        assert_eq!(report, IndexReport { files: 2, chunks: 3 });
        assert_eq!(embedder.batches.load(Ordering::SeqCst), 2);

        let chunks = store.all_chunks().await.unwrap();
        let sources: Vec<&str> = chunks.iter().map(|c| c.source.as_str()).collect();
        assert_eq!(sources, vec!["a_cv.md", "b_leadership.md", "b_leadership.md"]);
        assert_eq!(chunks[0].content, "VP R&D since 2019.");
        assert_eq!(chunks[2].metadata.chunk_index, 1);
        assert_eq!(chunks[2].metadata.total_chunks, 2);
        assert_eq!(chunks[2].content, "I hire for curiosity.");
    }

    #[tokio::test]
    async fn test_run_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cv.md"), "One sentence.").unwrap();

        let store = Arc::new(MemoryStore::with_chunks(vec![DocumentChunk::new(
            "stale".into(),
            "old.md".into(),
            0,
            1,
            vec![1.0, 1.0],
        )]));
        let indexer = Indexer::new(store.clone(), Arc::new(CountingEmbedder::default()), &config(10));

        indexer.run(dir.path()).await.unwrap();
        let chunks = store.all_chunks().await.unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].source, "cv.md");
    }

    #[tokio::test]
    async fn test_missing_directory_is_io_error() {
        let indexer = Indexer::new(
            Arc::new(MemoryStore::new()),
            Arc::new(CountingEmbedder::default()),
            &config(10),
        );
        let result = indexer.run(Path::new("/definitely/not/here")).await;
        assert!(matches!(result, Err(OlgaGptError::Io(_))));
    }
}
