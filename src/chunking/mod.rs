//! Transcript chunking.
//!
//! Splits transcript text into fixed-size, overlapping character windows that
//! are small enough to embed and specific enough to retrieve.

use crate::error::{Result, TldwError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A contiguous span of transcript text.
///
/// Offsets count characters (not bytes) in the source text and are
/// half-open: `start_offset..end_offset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position among all chunks of the transcript.
    pub index: usize,
    /// Text content of this chunk.
    pub text: String,
    /// First character covered by this chunk.
    pub start_offset: usize,
    /// One past the last character covered by this chunk.
    pub end_offset: usize,
}

impl Chunk {
    /// Number of characters in this chunk.
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Configuration for chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Target chunk size in characters.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub overlap: usize,
}

impl ChunkingConfig {
    /// Create a validated chunking configuration.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        let config = Self { chunk_size, overlap };
        config.validate()?;
        Ok(config)
    }

    /// Check that `0 <= overlap < chunk_size`.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(TldwError::InvalidConfiguration(
                "chunk_size must be greater than zero".to_string(),
            ));
        }
        if self.overlap >= self.chunk_size {
            return Err(TldwError::InvalidConfiguration(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    /// Distance between the starts of consecutive chunks.
    fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 150,
        }
    }
}

/// Fixed-size character chunker with overlap.
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    /// Create a chunker, rejecting invalid configurations.
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Split text into ordered, overlapping chunks covering all of it.
    ///
    /// Every chunk except possibly the last is exactly `chunk_size` characters.
    /// Empty text yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        // Byte position of every char boundary, including the end of the text.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let total = boundaries.len() - 1;

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < total {
            let end = (start + self.config.chunk_size).min(total);

            chunks.push(Chunk {
                index: chunks.len(),
                text: text[boundaries[start]..boundaries[end]].to_string(),
                start_offset: start,
                end_offset: end,
            });

            if end == total {
                break;
            }
            start += self.config.step();
        }

        debug!(
            "Split {} chars into {} chunks (size {}, overlap {})",
            total,
            chunks.len(),
            self.config.chunk_size,
            self.config.overlap
        );

        chunks
    }
}
