//! tldw - Too Long; Didn't Watch
//!
//! Summarize YouTube videos and generate study quizzes from their transcripts.
//!
//! # Overview
//!
//! Instead of sending a whole transcript to a language model, tldw splits it
//! into overlapping chunks, embeds each chunk, and retrieves only the chunks
//! most relevant to the request. Summaries and quizzes are synthesized from
//! that reduced context.
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `transcript` - Transcript sources (YouTube via yt-dlp, local files)
//! - `chunking` - Fixed-size overlapping text chunking
//! - `embedding` - Embedding generation
//! - `index` - In-memory cosine similarity index
//! - `retrieval` - Query embedding and top-k retrieval
//! - `synthesis` - Summary and quiz generation
//! - `pipeline` - End-to-end coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use tldw::config::Settings;
//! use tldw::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(settings)?;
//!
//!     let session = pipeline.open_session("dQw4w9WgXcQ").await?;
//!     let summary = pipeline.summarize(&session).await?;
//!     println!("{}", summary.text);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod openai;
pub mod pipeline;
pub mod retrieval;
pub mod synthesis;
pub mod transcript;

pub use error::{Result, TldwError};
