//! YouTube transcript source backed by yt-dlp subtitles.

use super::{Transcript, TranscriptSegment, TranscriptSource};
use crate::error::{Result, TldwError};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument};
use url::Url;

/// Fetches captions for YouTube videos.
///
/// Uses yt-dlp to download manual or automatic subtitles in the `json3`
/// format, then flattens the caption events into timed segments.
pub struct YoutubeTranscriptSource {
    video_id_regex: Regex,
    language: String,
    temp_dir: PathBuf,
}

impl YoutubeTranscriptSource {
    pub fn new(language: &str, temp_dir: PathBuf) -> Self {
        let video_id_regex = Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("Invalid regex");

        Self {
            video_id_regex,
            language: language.to_string(),
            temp_dir,
        }
    }

    /// Extract the video ID from a YouTube URL, youtu.be short link, or bare ID.
    pub fn extract_video_id(&self, input: &str) -> Option<String> {
        let input = input.trim();

        if self.video_id_regex.is_match(input) {
            return Some(input.to_string());
        }

        let with_scheme = if input.contains("://") {
            input.to_string()
        } else {
            format!("https://{}", input)
        };
        let url = Url::parse(&with_scheme).ok()?;

        let candidate = match url.host_str()? {
            "www.youtube.com" | "youtube.com" | "m.youtube.com" => {
                let mut segments = url.path_segments()?;
                match segments.next()? {
                    "watch" => url
                        .query_pairs()
                        .find(|(key, _)| key == "v")
                        .map(|(_, value)| value.into_owned()),
                    "embed" | "shorts" | "v" | "live" => segments.next().map(str::to_string),
                    _ => None,
                }
            }
            "youtu.be" => url.path_segments()?.next().map(str::to_string),
            _ => None,
        }?;

        self.video_id_regex
            .is_match(&candidate)
            .then_some(candidate)
    }

    /// Run yt-dlp to download subtitles into `dir`.
    async fn download_subtitles(&self, video_id: &str, dir: &Path) -> Result<PathBuf> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        let template = dir.join(format!("{}.%(ext)s", video_id));

        let result = Command::new("yt-dlp")
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .arg("--sub-langs").arg(format!("{0},{0}-*", self.language))
            .arg("--sub-format").arg("json3")
            .arg("--output").arg(&template)
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg(&url)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TldwError::ToolNotFound("yt-dlp".into()));
            }
            Err(e) => {
                return Err(TldwError::ToolFailed(format!("yt-dlp execution failed: {e}")));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TldwError::ToolFailed(format!("yt-dlp failed: {stderr}")));
        }

        find_subtitle_file(dir, video_id, &self.language)
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    fn extract_id(&self, input: &str) -> Option<String> {
        self.extract_video_id(input)
    }

    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<Transcript> {
        std::fs::create_dir_all(&self.temp_dir)?;
        let work_dir = tempfile::Builder::new()
            .prefix("tldw-subs-")
            .tempdir_in(&self.temp_dir)?;

        info!("Fetching captions for {}", video_id);
        let subtitle_path = self.download_subtitles(video_id, work_dir.path()).await?;
        debug!("Parsing subtitles from {:?}", subtitle_path);

        let raw = std::fs::read_to_string(&subtitle_path)?;
        let transcript = parse_json3(video_id, &raw)?;

        info!(
            "Fetched transcript with {} segments ({} chars)",
            transcript.segments.len(),
            transcript.char_len()
        );
        Ok(transcript)
    }
}

/// Locate the subtitle file yt-dlp wrote for a video.
///
/// The exact language track wins; otherwise the first regional variant by
/// file name.
fn find_subtitle_file(dir: &Path, video_id: &str, language: &str) -> Result<PathBuf> {
    let exact = dir.join(format!("{}.{}.json3", video_id, language));
    if exact.is_file() {
        return Ok(exact);
    }

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with(video_id) && name.ends_with(".json3")
        })
        .map(|entry| entry.path())
        .collect();
    candidates.sort();

    candidates.into_iter().next().ok_or_else(|| {
        TldwError::TranscriptNotFound(format!("No captions available for video {}", video_id))
    })
}

#[derive(Debug, Deserialize)]
struct Json3Captions {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Parse a YouTube `json3` caption document into a transcript.
///
/// Events without visible text (window setup, bare line breaks) are dropped and
/// whitespace inside each caption is collapsed to single spaces.
pub fn parse_json3(video_id: &str, raw: &str) -> Result<Transcript> {
    let captions: Json3Captions = serde_json::from_str(raw)
        .map_err(|e| TldwError::Transcript(format!("Failed to parse captions: {}", e)))?;

    let segments: Vec<TranscriptSegment> = captions
        .events
        .into_iter()
        .filter_map(|event| {
            let joined: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = joined.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }

            let start = event.t_start_ms as f64 / 1000.0;
            let end = (event.t_start_ms + event.d_duration_ms) as f64 / 1000.0;
            Some(TranscriptSegment::new(start, end, text))
        })
        .collect();

    Ok(Transcript::new(video_id.to_string(), segments))
}
