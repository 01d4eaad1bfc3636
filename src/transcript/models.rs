//! Data models for video transcripts.

use serde::{Deserialize, Serialize};

/// A complete transcript with timed segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video ID this transcript belongs to.
    pub video_id: String,
    /// Individual transcript segments with timestamps.
    pub segments: Vec<TranscriptSegment>,
    /// Full transcript text (segments joined by a single space).
    pub full_text: String,
    /// Total duration in seconds.
    pub duration_seconds: f64,
}

impl Transcript {
    /// Create a new transcript from segments.
    pub fn new(video_id: String, segments: Vec<TranscriptSegment>) -> Self {
        let full_text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let duration_seconds = segments
            .last()
            .map(|s| s.end_seconds)
            .unwrap_or(0.0);

        Self {
            video_id,
            segments,
            full_text,
            duration_seconds,
        }
    }

    /// Create an untimed transcript from plain text.
    pub fn from_text(video_id: String, text: String) -> Self {
        Self {
            video_id,
            segments: Vec::new(),
            full_text: text,
            duration_seconds: 0.0,
        }
    }

    /// Whether the transcript has no text at all.
    pub fn is_empty(&self) -> bool {
        self.full_text.is_empty()
    }

    /// Length of the full text in characters.
    pub fn char_len(&self) -> usize {
        self.full_text.chars().count()
    }

    /// Start time of the segment containing the given character offset of `full_text`.
    ///
    /// Returns `None` for untimed transcripts.
    pub fn seconds_at(&self, char_offset: usize) -> Option<f64> {
        let mut segment_start = 0;
        let mut found = None;

        for segment in &self.segments {
            if segment_start > char_offset {
                break;
            }
            found = Some(segment.start_seconds);
            // +1 for the joining space
            segment_start += segment.text.chars().count() + 1;
        }

        found
    }

    /// Format the transcript with timestamps for display.
    pub fn format_with_timestamps(&self) -> String {
        if self.segments.is_empty() {
            return self.full_text.clone();
        }

        self.segments
            .iter()
            .map(|s| format!("[{}] {}", format_timestamp(s.start_seconds), s.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single segment of a transcript with timestamp information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds.
    pub start_seconds: f64,
    /// End time in seconds.
    pub end_seconds: f64,
    /// Caption text.
    pub text: String,
}

impl TranscriptSegment {
    /// Create a new transcript segment.
    pub fn new(start_seconds: f64, end_seconds: f64, text: String) -> Self {
        Self {
            start_seconds,
            end_seconds,
            text,
        }
    }
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
