//! Configuration module for tldw.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, QuizPrompts, SummaryPrompts};
pub use settings::{
    ChunkingSettings, EmbeddingSettings, GeneralSettings, PromptSettings, RetrievalSettings,
    Settings, SynthesisSettings, TranscriptSettings,
};
