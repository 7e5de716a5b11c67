//! Document retrieval over the knowledge store

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use tracing::warn;

use super::similarity::cosine_similarity;
use super::RetrievedChunk;
use crate::embeddings::Embedder;
use crate::errors::Result;
use crate::models::DocumentChunk;
use crate::store::KnowledgeStore;

/// Retriever for finding the chunks most relevant to a question
pub struct Retriever {
    store: Arc<dyn KnowledgeStore>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
    max_sources: usize,
}

impl Retriever {
    #[must_use]
    pub fn new(
        store: Arc<dyn KnowledgeStore>,
        embedder: Arc<dyn Embedder>,
        top_k: usize,
        max_sources: usize,
    ) -> Self {
        Self {
            store,
            embedder,
            top_k,
            max_sources,
        }
    }

    /// Embed the query and rank every stored chunk against it
    ///
    /// # Errors
    /// - Embedding errors for the query
    /// - Store read errors
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedChunk>> {
        let query_embedding = self.embedder.embed(query).await?;
        let chunks = self.store.all_chunks().await?;
        debug!("Scoring {} chunks", chunks.len());

        let results = rank_chunks(&query_embedding, chunks, self.top_k, self.max_sources);
        debug!("Retrieved {} sources", results.len());
        Ok(results)
    }
}

/// Full ranking: score, top-k, per-source dedup, cap
#[must_use]
pub fn rank_chunks(
    query: &[f32],
    chunks: Vec<DocumentChunk>,
    top_k: usize,
    max_sources: usize,
) -> Vec<RetrievedChunk> {
    let scored = score_chunks(query, chunks);
    let top = take_top_k(scored, top_k);
    dedup_by_source(top, max_sources)
}

/// Score chunks in store order, skipping those with a different dimension
#[must_use]
pub fn score_chunks(query: &[f32], chunks: Vec<DocumentChunk>) -> Vec<RetrievedChunk> {
    chunks
        .into_iter()
        .filter_map(|chunk| match cosine_similarity(query, &chunk.embedding) {
            Some(similarity) => Some(RetrievedChunk {
                chunk,
                similarity,
                distance: 1.0 - similarity,
            }),
            None => {
                warn!(
                    "Skipping chunk {} of {}: embedding dimension {} != {}",
                    chunk.chunk_index,
                    chunk.source,
                    chunk.embedding.len(),
                    query.len()
                );
                None
            }
        })
        .collect()
}

/// Highest similarity first; equal scores keep their input order
#[must_use]
pub fn take_top_k(mut scored: Vec<RetrievedChunk>, k: usize) -> Vec<RetrievedChunk> {
    scored.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    scored.truncate(k);
    scored
}

/// Keep the closest chunk per source, closest first, at most `max_sources`
#[must_use]
pub fn dedup_by_source(results: Vec<RetrievedChunk>, max_sources: usize) -> Vec<RetrievedChunk> {
    let mut best: Vec<RetrievedChunk> = Vec::new();
    let mut index_by_source: HashMap<String, usize> = HashMap::new();

    for result in results {
        match index_by_source.get(result.source()) {
            Some(&idx) => {
                if result.distance < best[idx].distance {
                    best[idx] = result;
                }
            }
            None => {
                index_by_source.insert(result.source().to_string(), best.len());
                best.push(result);
            }
        }
    }

    best.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    best.truncate(max_sources);
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(source: &str, index: usize, embedding: Vec<f32>) -> DocumentChunk {
        DocumentChunk::new(format!("{source}-{index}"), source.to_string(), index, 1, embedding)
    }

    fn retrieved(source: &str, index: usize, distance: f32) -> RetrievedChunk {
        RetrievedChunk {
            chunk: chunk(source, index, vec![1.0]),
            similarity: 1.0 - distance,
            distance,
        }
    }

    #[test]
    fn test_dedup_keeps_lowest_distance_per_source() {
        let results = vec![
            retrieved("a.md", 0, 0.4),
            retrieved("b.md", 0, 0.2),
            retrieved("a.md", 1, 0.1),
        ];

        let deduped = dedup_by_source(results, 3);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].chunk.content, "a.md-1");
        assert_eq!(deduped[1].chunk.content, "b.md-0");
    }

    #[test]
    fn test_dedup_caps_sources() {
        let results = vec![
            retrieved("a.md", 0, 0.5),
            retrieved("b.md", 0, 0.4),
            retrieved("c.md", 0, 0.3),
            retrieved("d.md", 0, 0.2),
            retrieved("e.md", 0, 0.1),
        ];

        let deduped = dedup_by_source(results, 3);
        let sources: Vec<&str> = deduped.iter().map(RetrievedChunk::source).collect();
        assert_eq!(sources, vec!["e.md", "d.md", "c.md"]);
    }

    #[test]
    fn test_dedup_first_seen_wins_ties() {
        let results = vec![retrieved("a.md", 0, 0.3), retrieved("a.md", 1, 0.3)];
        let deduped = dedup_by_source(results, 3);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].chunk.content, "a.md-0");
    }

    #[test]
    fn test_top_k_is_stable_for_equal_scores() {
        let scored = vec![
            retrieved("a.md", 0, 0.2),
            retrieved("b.md", 0, 0.2),
            retrieved("c.md", 0, 0.1),
            retrieved("d.md", 0, 0.2),
        ];

        let top = take_top_k(scored, 3);
        let sources: Vec<&str> = top.iter().map(RetrievedChunk::source).collect();
        assert_eq!(sources, vec!["c.md", "a.md", "b.md"]);
    }

    #[test]
    fn test_score_skips_dimension_mismatch() {
        let chunks = vec![chunk("a.md", 0, vec![1.0, 0.0]), chunk("b.md", 0, vec![1.0])];
        let scored = score_chunks(&[1.0, 0.0], chunks);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].source(), "a.md");
        assert!(scored[0].distance.abs() < 1e-6);
    }

    #[test]
    fn test_rank_chunks_end_to_end() {
        let chunks = vec![
            chunk("leadership.md", 0, vec![0.9, 0.1]),
            chunk("leadership.md", 1, vec![1.0, 0.0]),
            chunk("genai.md", 0, vec![0.6, 0.4]),
            chunk("hobbies.md", 0, vec![0.0, 1.0]),
        ];

        let ranked = rank_chunks(&[1.0, 0.0], chunks, 5, 3);
        let sources: Vec<&str> = ranked.iter().map(RetrievedChunk::source).collect();
        assert_eq!(sources, vec!["leadership.md", "genai.md", "hobbies.md"]);
        assert_eq!(ranked[0].chunk.chunk_index, 1);
    }

    #[test]
    fn test_rank_empty_store() {
        assert!(rank_chunks(&[1.0], Vec::new(), 5, 3).is_empty());
    }
}
