//! Transcript acquisition.
//!
//! Transcripts come from YouTube captions (via yt-dlp) or from files on disk.
//! Both sources produce the same [`Transcript`] model.

mod local;
mod models;
mod youtube;

pub use local::FileTranscriptSource;
pub use models::{format_timestamp, Transcript, TranscriptSegment};
pub use youtube::{parse_json3, YoutubeTranscriptSource};

use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Extract the source-specific ID from user input (URL, path, etc.).
    fn extract_id(&self, input: &str) -> Option<String>;

    /// Fetch the transcript for an ID returned by [`extract_id`](Self::extract_id).
    async fn fetch(&self, id: &str) -> Result<Transcript>;
}

/// Detect the appropriate transcript source for the given input.
///
/// Existing files win over YouTube so that a file named like a video ID is
/// still read from disk.
pub fn detect_source(
    input: &str,
    language: &str,
    temp_dir: PathBuf,
) -> Option<(Box<dyn TranscriptSource>, String)> {
    let local = FileTranscriptSource::new();
    if let Some(id) = local.extract_id(input) {
        return Some((Box::new(local), id));
    }

    let youtube = YoutubeTranscriptSource::new(language, temp_dir);
    let id = youtube.extract_id(input)?;
    Some((Box::new(youtube), id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_source() {
        let (_, id) = detect_source("https://youtu.be/dQw4w9WgXcQ", "en", std::env::temp_dir()).unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");

        assert!(detect_source("https://example.com/video", "en", std::env::temp_dir()).is_none());
    }
}
