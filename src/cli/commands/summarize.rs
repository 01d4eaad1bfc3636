//! Summarize command implementation.

use super::open_session;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the summarize command.
pub async fn run_summarize(input: &str, k: Option<usize>, show_sources: bool, mut settings: Settings) -> Result<()> {
    if let Some(k) = k {
        settings.retrieval.k = k;
    }

    let (pipeline, session) = open_session(input, settings).await?;

    let spinner = Output::spinner("Generating summary...");
    let result = pipeline.summarize(&session).await;
    spinner.finish_and_clear();

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            Output::error(&format!("Failed to generate summary: {}", e));
            return Err(e.into());
        }
    };

    Output::header("Summary");
    println!("\n{}\n", summary.text);

    if show_sources {
        Output::header("Sources");
        for (rank, source) in summary.sources.chunks.iter().enumerate() {
            Output::search_result(
                rank + 1,
                session.timestamp(&source.chunk).as_deref(),
                source.score,
                &source.chunk.text,
                session.link(&source.chunk).as_deref(),
            );
        }
    }

    Ok(())
}
