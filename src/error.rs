//! Error types for tldw.

use thiserror::Error;

/// Library-level error type for tldw operations.
#[derive(Error, Debug)]
pub enum TldwError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Cannot build a vector index from zero chunks")]
    EmptyIndex,

    #[error("Synthesis failed: {0}")]
    Synthesis(String),

    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error("Transcript not available: {0}")]
    TranscriptNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for tldw operations.
pub type Result<T> = std::result::Result<T, TldwError>;
