use async_trait::async_trait;
use pgvector::Vector;
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::Database;
use crate::models::ChunkMetadata;
use crate::models::DocumentChunk;
use crate::store::KnowledgeStore;
use crate::Result;

fn chunk_from_row(row: &PgRow) -> Result<DocumentChunk> {
    let source: String = row.try_get("source")?;
    let chunk_index = row.try_get::<i32, _>("chunk_index")? as usize;
    let embedding: Vector = row.try_get("embedding")?;

    Ok(DocumentChunk {
        id: row.try_get("id")?,
        content: row.try_get("content")?,
        metadata: ChunkMetadata {
            source: source.clone(),
            chunk_index,
            total_chunks: row.try_get::<i32, _>("total_chunks")? as usize,
        },
        source,
        chunk_index,
        embedding: embedding.to_vec(),
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl KnowledgeStore for Database {
    async fn all_chunks(&self) -> Result<Vec<DocumentChunk>> {
        let rows = sqlx::query(
            r"
            SELECT id, content, source, chunk_index, total_chunks, embedding, created_at
            FROM knowledge_chunks
            ORDER BY source, chunk_index
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(chunk_from_row).collect()
    }

    async fn replace_all(&self, chunks: Vec<DocumentChunk>) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM knowledge_chunks")
            .execute(&mut *tx)
            .await?;

        for chunk in &chunks {
            sqlx::query(
                r"
                INSERT INTO knowledge_chunks
                    (id, content, source, chunk_index, total_chunks, embedding, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(chunk.id)
            .bind(&chunk.content)
            .bind(&chunk.source)
            .bind(chunk.chunk_index as i32)
            .bind(chunk.metadata.total_chunks as i32)
            .bind(Vector::from(chunk.embedding.clone()))
            .bind(chunk.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::info!("Stored {} knowledge chunks", chunks.len());
        Ok(chunks.len())
    }

    async fn count(&self) -> Result<usize> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM knowledge_chunks")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }
}
