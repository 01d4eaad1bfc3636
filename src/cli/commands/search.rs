//! Search command implementation.

use super::open_session;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(input: &str, query: &str, k: usize, settings: Settings) -> Result<()> {
    let (pipeline, session) = open_session(input, settings).await?;

    let spinner = Output::spinner("Searching...");
    let results = pipeline.search(&session, query, k).await;
    spinner.finish_and_clear();

    match results {
        Ok(result) => {
            if result.is_empty() {
                Output::warning("No results found matching your query.");
            } else {
                Output::success(&format!("Found {} results", result.len()));

                for (rank, hit) in result.chunks.iter().enumerate() {
                    Output::search_result(
                        rank + 1,
                        session.timestamp(&hit.chunk).as_deref(),
                        hit.score,
                        &hit.chunk.text,
                        session.link(&hit.chunk).as_deref(),
                    );
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
