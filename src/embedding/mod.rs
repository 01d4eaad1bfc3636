//! Embedding generation for semantic search and retrieval.

mod openai;

pub use openai::OpenAIEmbedder;

use crate::error::{Result, TldwError};
use async_trait::async_trait;

/// Trait for embedding generation.
///
/// Implementations return exactly one vector per input text, in input order,
/// all with [`dimensions`](Embedder::dimensions) elements.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embeddings for multiple texts.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;

    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| TldwError::EmbeddingService("Empty embedding response".to_string()))
    }
}

/// Check an embedding response against the request it answers.
///
/// A response with the wrong number of vectors is a service error; a vector of
/// the wrong length is a dimension mismatch.
pub fn check_embeddings(vectors: &[Vec<f32>], expected_count: usize, dimensions: usize) -> Result<()> {
    if vectors.len() != expected_count {
        return Err(TldwError::EmbeddingService(format!(
            "Expected {} embeddings, got {}",
            expected_count,
            vectors.len()
        )));
    }

    if let Some(bad) = vectors.iter().find(|v| v.len() != dimensions) {
        return Err(TldwError::DimensionMismatch {
            expected: dimensions,
            actual: bad.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_embeddings() {
        let vectors = vec![vec![0.1, 0.2], vec![0.3, 0.4]];
        assert!(check_embeddings(&vectors, 2, 2).is_ok());

        assert!(matches!(
            check_embeddings(&vectors, 3, 2),
            Err(TldwError::EmbeddingService(_))
        ));
        assert!(matches!(
            check_embeddings(&vectors, 2, 3),
            Err(TldwError::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }
}
