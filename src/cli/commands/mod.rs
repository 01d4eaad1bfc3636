//! CLI command implementations.

mod config;
mod quiz;
mod search;
mod summarize;
mod transcript;

pub use config::run_config;
pub use quiz::run_quiz;
pub use search::run_search;
pub use summarize::run_summarize;
pub use transcript::run_transcript;

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::{Pipeline, Session};
use anyhow::Result;

/// Build a pipeline and index the transcript for `input`.
async fn open_session(input: &str, settings: Settings) -> Result<(Pipeline, Session)> {
    if let Err(e) = preflight::check(Operation::Analyze, input) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let pipeline = Pipeline::new(settings)?;

    let spinner = Output::spinner("Fetching transcript and building index...");
    let session = pipeline.open_session(input).await;
    spinner.finish_and_clear();

    match session {
        Ok(session) => {
            Output::info(&format!(
                "Indexed {} chunks from {}",
                session.index().len(),
                session.video_id()
            ));
            Ok((pipeline, session))
        }
        Err(e) => {
            Output::error(&format!("Failed to prepare transcript: {}", e));
            Output::info("This video may not have a transcript.");
            Err(e.into())
        }
    }
}
