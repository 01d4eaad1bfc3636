//! Transcript command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::{Output, TranscriptFormat};
use crate::config::Settings;
use crate::transcript::{detect_source, Transcript};
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(
    input: &str,
    output: Option<String>,
    format: TranscriptFormat,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Transcript, input) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let Some((source, id)) = detect_source(input, &settings.transcript.language, settings.temp_dir()) else {
        Output::error("Invalid YouTube URL.");
        return Err(anyhow::anyhow!("Invalid YouTube URL: {}", input));
    };

    let spinner = Output::spinner("Fetching transcript...");
    let transcript = source.fetch(&id).await;
    spinner.finish_and_clear();

    let transcript = match transcript {
        Ok(t) => t,
        Err(e) => {
            Output::error(&format!("Failed to fetch transcript: {}", e));
            return Err(e.into());
        }
    };

    let rendered = render(&transcript, format)?;

    match output {
        Some(path) if path != "-" => {
            std::fs::write(&path, &rendered)?;
            Output::success(&format!(
                "Saved transcript for {} to {} ({} segments)",
                transcript.video_id,
                path,
                transcript.segments.len()
            ));
        }
        _ => println!("{}", rendered),
    }

    Ok(())
}

fn render(transcript: &Transcript, format: TranscriptFormat) -> Result<String> {
    Ok(match format {
        TranscriptFormat::Text => transcript.format_with_timestamps(),
        TranscriptFormat::Json => serde_json::to_string_pretty(transcript)?,
    })
}
