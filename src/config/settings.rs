//! Configuration settings for tldw.

use crate::chunking::ChunkingConfig;
use crate::error::{Result, TldwError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcript: TranscriptSettings,
    pub chunking: ChunkingSettings,
    pub embedding: EmbeddingSettings,
    pub retrieval: RetrievalSettings,
    pub synthesis: SynthesisSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for temporary files (subtitle downloads).
    pub temp_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            temp_dir: "/tmp/tldw".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Transcript fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Caption language to request.
    pub language: String,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
        }
    }
}

/// Transcript chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Chunk size in characters.
    pub chunk_size: usize,
    /// Characters shared by consecutive chunks.
    pub overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        let config = ChunkingConfig::default();
        Self {
            chunk_size: config.chunk_size,
            overlap: config.overlap,
        }
    }
}

impl ChunkingSettings {
    /// Validated chunker configuration.
    pub fn config(&self) -> Result<ChunkingConfig> {
        ChunkingConfig::new(self.chunk_size, self.overlap)
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
    /// Texts per embeddings request.
    pub batch_size: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
            batch_size: 100,
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Number of chunks handed to the synthesizer.
    pub k: usize,
    /// Minimum similarity score for a chunk to be used.
    pub min_score: f32,
    /// Query used to select chunks for summaries.
    pub summary_query: String,
    /// Query used to select chunks for quizzes.
    pub quiz_query: String,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            k: 5,
            min_score: 0.0,
            summary_query: "summary of full video".to_string(),
            quiz_query: "quiz from full content".to_string(),
        }
    }
}

/// Summary and quiz generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSettings {
    /// Chat model used for summaries and quizzes.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Default number of quiz questions.
    pub num_questions: usize,
    /// Fewest quiz questions a user may request.
    pub min_questions: usize,
    /// Most quiz questions a user may request.
    pub max_questions: usize,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            num_questions: 5,
            min_questions: 3,
            max_questions: 15,
        }
    }
}

impl SynthesisSettings {
    /// Check a requested question count against the configured bounds.
    pub fn check_question_count(&self, num_questions: usize) -> Result<()> {
        if num_questions < self.min_questions || num_questions > self.max_questions {
            return Err(TldwError::InvalidConfiguration(format!(
                "number of quiz questions must be between {} and {}, got {}",
                self.min_questions, self.max_questions, num_questions
            )));
        }
        Ok(())
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let settings: Settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.chunking.config()?;

        if self.embedding.dimensions == 0 {
            return Err(TldwError::InvalidConfiguration(
                "embedding.dimensions must be greater than zero".to_string(),
            ));
        }
        if self.embedding.batch_size == 0 {
            return Err(TldwError::InvalidConfiguration(
                "embedding.batch_size must be greater than zero".to_string(),
            ));
        }
        if self.retrieval.k == 0 {
            return Err(TldwError::InvalidConfiguration(
                "retrieval.k must be greater than zero".to_string(),
            ));
        }
        if self.synthesis.min_questions == 0 || self.synthesis.min_questions > self.synthesis.max_questions {
            return Err(TldwError::InvalidConfiguration(
                "synthesis.min_questions must be between 1 and synthesis.max_questions".to_string(),
            ));
        }
        self.synthesis.check_question_count(self.synthesis.num_questions)?;

        Ok(())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| TldwError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tldw")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }
}
