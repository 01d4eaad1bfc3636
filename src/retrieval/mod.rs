//! Query-time retrieval over a transcript's vector index.
//!
//! The [`Retriever`] owns the embedding client; the [`VectorIndex`] it
//! searches is passed in per call so each transcript session keeps its own.

use crate::chunking::Chunk;
use crate::embedding::Embedder;
use crate::error::{Result, TldwError};
use crate::index::{EmbeddedChunk, ScoredChunk, VectorIndex};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Separator placed between retrieved chunks when building synthesis context.
pub const CONTEXT_DELIMITER: &str = "\n\n";

/// Chunks retrieved for one query, most relevant first.
///
/// Scores are only comparable within a single result.
#[derive(Debug, Clone)]
pub struct RetrievalResult {
    pub query: String,
    pub chunks: Vec<ScoredChunk>,
}

impl RetrievalResult {
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk texts in ranked order.
    pub fn texts(&self) -> Vec<&str> {
        self.chunks.iter().map(|c| c.chunk.text.as_str()).collect()
    }

    /// Concatenate chunk texts, in ranked order, for the synthesizer.
    pub fn to_context(&self) -> String {
        self.texts().join(CONTEXT_DELIMITER)
    }
}

/// Embeds chunks and queries, and runs top-k searches.
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    min_score: Option<f32>,
}

impl Retriever {
    /// Create a new retriever.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            min_score: None,
        }
    }

    /// Drop results scoring below this similarity.
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Embed chunks in batches and build a vector index from them.
    ///
    /// Any embedding failure aborts the build; no partial index is returned.
    #[instrument(skip(self, chunks), fields(count = chunks.len()))]
    pub async fn build_index(&self, chunks: Vec<Chunk>) -> Result<VectorIndex> {
        if chunks.is_empty() {
            return Err(TldwError::EmptyIndex);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts).await?;

        if vectors.len() != chunks.len() {
            return Err(TldwError::EmbeddingService(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                vectors.len()
            )));
        }

        let entries: Vec<EmbeddedChunk> = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| EmbeddedChunk::new(chunk, vector))
            .collect();

        let index = VectorIndex::build(entries)?;
        info!("Indexed {} chunks", index.len());
        Ok(index)
    }

    /// Embed `query` and return the `k` most relevant chunks of `index`.
    #[instrument(skip(self, index), fields(query = %query))]
    pub async fn retrieve(&self, index: &VectorIndex, query: &str, k: usize) -> Result<RetrievalResult> {
        if k == 0 {
            return Err(TldwError::InvalidConfiguration(
                "k must be greater than zero".to_string(),
            ));
        }

        if self.embedder.dimensions() != index.dimensions() {
            return Err(TldwError::DimensionMismatch {
                expected: index.dimensions(),
                actual: self.embedder.dimensions(),
            });
        }

        let query_vector = self.embedder.embed(query).await?;

        let chunks = match self.min_score {
            Some(min_score) => index.search_with_threshold(&query_vector, k, min_score)?,
            None => index.search(&query_vector, k)?,
        };

        debug!("Retrieved {} of {} chunks", chunks.len(), index.len());

        Ok(RetrievalResult {
            query: query.to_string(),
            chunks,
        })
    }
}
