//! In-memory vector index over chunk embeddings.
//!
//! A transcript yields at most a few hundred chunks, so search is an exact
//! linear scan with cosine similarity followed by a partial sort.

use crate::chunking::Chunk;
use crate::error::{Result, TldwError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// A chunk together with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    pub chunk: Chunk,
    pub vector: Vec<f32>,
}

impl EmbeddedChunk {
    pub fn new(chunk: Chunk, vector: Vec<f32>) -> Self {
        Self { chunk, vector }
    }
}

/// A search hit with its similarity score (higher is better).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// Immutable nearest-neighbour index built from one transcript's chunks.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    entries: Vec<EmbeddedChunk>,
    norms: Vec<f32>,
    dimensions: usize,
}

impl VectorIndex {
    /// Build an index from already-embedded chunks.
    ///
    /// Fails with [`TldwError::EmptyIndex`] when given nothing, and with
    /// [`TldwError::DimensionMismatch`] when vector lengths disagree.
    pub fn build(entries: Vec<EmbeddedChunk>) -> Result<Self> {
        let dimensions = entries
            .first()
            .map(|e| e.vector.len())
            .ok_or(TldwError::EmptyIndex)?;

        if dimensions == 0 {
            return Err(TldwError::InvalidConfiguration(
                "embedding vectors must not be empty".to_string(),
            ));
        }

        if let Some(bad) = entries.iter().find(|e| e.vector.len() != dimensions) {
            return Err(TldwError::DimensionMismatch {
                expected: dimensions,
                actual: bad.vector.len(),
            });
        }

        let norms = entries.iter().map(|e| l2_norm(&e.vector)).collect();

        debug!("Built vector index with {} chunks of {} dimensions", entries.len(), dimensions);

        Ok(Self {
            entries,
            norms,
            dimensions,
        })
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a successfully built index.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Vector length every query must match.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Indexed chunks in build order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.entries.iter().map(|e| &e.chunk)
    }

    /// Return the `k` most similar chunks, best first.
    ///
    /// Equal scores are ordered by ascending chunk index. `k == 0` yields an
    /// empty result; `k` larger than the index yields every chunk.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        if query.len() != self.dimensions {
            return Err(TldwError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        if k == 0 {
            return Ok(Vec::new());
        }

        let query_norm = l2_norm(query);
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .zip(&self.norms)
            .enumerate()
            .map(|(pos, (entry, norm))| (pos, cosine_with_norms(query, query_norm, &entry.vector, *norm)))
            .collect();

        let by_relevance = |a: &(usize, f32), b: &(usize, f32)| {
            rank_key(b.1)
                .total_cmp(&rank_key(a.1))
                .then_with(|| self.entries[a.0].chunk.index.cmp(&self.entries[b.0].chunk.index))
        };

        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, by_relevance);
            scored.truncate(k);
        }
        scored.sort_by(by_relevance);

        Ok(scored
            .into_iter()
            .map(|(pos, score)| ScoredChunk {
                chunk: self.entries[pos].chunk.clone(),
                score,
            })
            .collect())
    }

    /// Like [`search`](Self::search), dropping hits scoring below `min_score`.
    pub fn search_with_threshold(&self, query: &[f32], k: usize, min_score: f32) -> Result<Vec<ScoredChunk>> {
        let mut results = self.search(query, k)?;
        results.retain(|r| r.score >= min_score);
        Ok(results)
    }
}

/// NaN scores rank below every real score; `-0.0` ranks equal to `0.0`.
fn rank_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score + 0.0
    }
}

fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine_with_norms(a: &[f32], norm_a: f32, b: &[f32], norm_b: f32) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot_product / (norm_a * norm_b)
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 for vectors of different length or zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    cosine_with_norms(a, l2_norm(a), b, l2_norm(b))
}
