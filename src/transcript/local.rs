//! Local transcript files (plain text or JSON segments).

use super::{Transcript, TranscriptSegment, TranscriptSource};
use crate::error::{Result, TldwError};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

/// Reads transcripts that were saved to disk.
///
/// `.json` files may hold either a bare array of segments or an object with a
/// `segments` array (the shape `tldw transcript --format json` writes). Any
/// other file is treated as untimed plain text.
pub struct FileTranscriptSource;

impl FileTranscriptSource {
    pub fn new() -> Self {
        Self
    }

    fn video_id_for(path: &Path) -> String {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "transcript".to_string());
        format!("local_{}", stem)
    }
}

impl Default for FileTranscriptSource {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SegmentFile {
    Wrapped { segments: Vec<TranscriptSegment> },
    Bare(Vec<TranscriptSegment>),
}

#[async_trait]
impl TranscriptSource for FileTranscriptSource {
    fn extract_id(&self, input: &str) -> Option<String> {
        Path::new(input).is_file().then(|| input.to_string())
    }

    async fn fetch(&self, path: &str) -> Result<Transcript> {
        let path = Path::new(path);
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TldwError::TranscriptNotFound(format!("{} does not exist", path.display()))
            } else {
                TldwError::Io(e)
            }
        })?;

        let video_id = Self::video_id_for(path);
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let segments = match serde_json::from_str(&content)? {
                SegmentFile::Wrapped { segments } => segments,
                SegmentFile::Bare(segments) => segments,
            };
            return Ok(Transcript::new(video_id, segments));
        }

        Ok(Transcript::from_text(video_id, content.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_plain_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "  some lecture notes  ").unwrap();

        let source = FileTranscriptSource::new();
        let path = file.path().to_str().unwrap();
        assert_eq!(source.extract_id(path), Some(path.to_string()));

        let transcript = source.fetch(path).await.unwrap();
        assert!(transcript.video_id.starts_with("local_"));
        assert_eq!(transcript.full_text, "some lecture notes");
        assert!(transcript.segments.is_empty());
    }

    #[tokio::test]
    async fn test_json_segments_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"video_id": "x", "segments": [
                {{"start_seconds": 0.0, "end_seconds": 2.0, "text": "one"}},
                {{"start_seconds": 2.0, "end_seconds": 5.0, "text": "two"}}
            ]}}"#
        )
        .unwrap();

        let source = FileTranscriptSource::new();
        let transcript = source.fetch(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(transcript.full_text, "one two");
        assert_eq!(transcript.duration_seconds, 5.0);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FileTranscriptSource::new();
        assert_eq!(source.extract_id("/definitely/not/here.txt"), None);

        let err = source.fetch("/definitely/not/here.txt").await.unwrap_err();
        assert!(matches!(err, TldwError::TranscriptNotFound(_)));
    }
}
