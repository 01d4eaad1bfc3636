//! Pipeline coordination for tldw.
//!
//! Fetches a transcript, chunks and indexes it into a [`Session`], then runs
//! summaries, quizzes and searches against that session.

use crate::chunking::{Chunk, Chunker};
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{Result, TldwError};
use crate::index::VectorIndex;
use crate::retrieval::{RetrievalResult, Retriever};
use crate::synthesis::{OpenAISynthesizer, Quiz, Synthesizer};
use crate::transcript::{detect_source, format_timestamp, Transcript};
use std::sync::Arc;
use tracing::{info, instrument};

/// One transcript and the vector index built from it.
///
/// Sessions are independent; dropping one discards its index.
pub struct Session {
    transcript: Transcript,
    index: VectorIndex,
}

impl Session {
    pub fn video_id(&self) -> &str {
        &self.transcript.video_id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// Position of a chunk in the video, as MM:SS or HH:MM:SS.
    pub fn timestamp(&self, chunk: &Chunk) -> Option<String> {
        self.transcript
            .seconds_at(chunk.start_offset)
            .map(format_timestamp)
    }

    /// YouTube link jumping to the start of a chunk.
    ///
    /// `None` for local transcripts and untimed text.
    pub fn link(&self, chunk: &Chunk) -> Option<String> {
        if self.video_id().starts_with("local_") {
            return None;
        }
        let seconds = self.transcript.seconds_at(chunk.start_offset)?;
        Some(format!(
            "https://youtube.com/watch?v={}&t={}s",
            self.video_id(),
            seconds as u32
        ))
    }
}

/// A generated summary with the chunks it was written from.
#[derive(Debug, Clone)]
pub struct Summary {
    pub text: String,
    pub sources: RetrievalResult,
}

/// A generated quiz with the chunks it was written from.
#[derive(Debug, Clone)]
pub struct QuizOutcome {
    pub quiz: Quiz,
    pub sources: RetrievalResult,
}

/// The main pipeline.
pub struct Pipeline {
    settings: Settings,
    prompts: Prompts,
    chunker: Chunker,
    retriever: Retriever,
    synthesizer: Arc<dyn Synthesizer>,
}

impl Pipeline {
    /// Create a pipeline backed by OpenAI.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let embedder = Arc::new(
            OpenAIEmbedder::with_config(
                &settings.embedding.model,
                settings.embedding.dimensions as usize,
            )?
            .with_batch_size(settings.embedding.batch_size),
        );

        let synthesizer = Arc::new(
            OpenAISynthesizer::new(&settings.synthesis.model)?
                .with_temperature(settings.synthesis.temperature)
                .with_prompts(prompts.clone()),
        );

        Self::with_components(settings, prompts, embedder, synthesizer)
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        embedder: Arc<dyn Embedder>,
        synthesizer: Arc<dyn Synthesizer>,
    ) -> Result<Self> {
        settings.validate()?;

        let chunker = Chunker::new(settings.chunking.config()?)?;

        let mut retriever = Retriever::new(embedder);
        if settings.retrieval.min_score > 0.0 {
            retriever = retriever.with_min_score(settings.retrieval.min_score);
        }

        Ok(Self {
            settings,
            prompts,
            chunker,
            retriever,
            synthesizer,
        })
    }

    /// Fetch the transcript for a YouTube URL, video ID, or transcript file.
    #[instrument(skip(self))]
    pub async fn fetch_transcript(&self, input: &str) -> Result<Transcript> {
        let (source, id) = detect_source(
            input,
            &self.settings.transcript.language,
            self.settings.temp_dir(),
        )
        .ok_or_else(|| TldwError::InvalidInput(format!("Invalid YouTube URL: {}", input)))?;

        source.fetch(&id).await
    }

    /// Fetch a transcript and index it.
    pub async fn open_session(&self, input: &str) -> Result<Session> {
        let transcript = self.fetch_transcript(input).await?;
        self.prepare(transcript).await
    }

    /// Chunk, embed and index a transcript.
    #[instrument(skip(self, transcript), fields(video_id = %transcript.video_id))]
    pub async fn prepare(&self, transcript: Transcript) -> Result<Session> {
        let chunks = self.chunker.chunk(&transcript.full_text);

        if chunks.is_empty() {
            return Err(TldwError::TranscriptNotFound(format!(
                "transcript for {} is empty",
                transcript.video_id
            )));
        }

        info!("Indexing {} chunks for {}", chunks.len(), transcript.video_id);
        let index = self.retriever.build_index(chunks).await?;

        Ok(Session { transcript, index })
    }

    /// Retrieve the `k` chunks of a session most relevant to `query`.
    pub async fn search(&self, session: &Session, query: &str, k: usize) -> Result<RetrievalResult> {
        self.retriever.retrieve(&session.index, query, k).await
    }

    /// Summarize the most summary-relevant parts of a session.
    #[instrument(skip(self, session), fields(video_id = %session.video_id()))]
    pub async fn summarize(&self, session: &Session) -> Result<Summary> {
        let sources = self
            .search(session, &self.settings.retrieval.summary_query, self.settings.retrieval.k)
            .await?;

        let text = self
            .synthesizer
            .summarize(&sources.to_context(), &self.prompts.summary.instructions)
            .await?;

        Ok(Summary { text, sources })
    }

    /// Generate a multiple-choice quiz from a session.
    #[instrument(skip(self, session), fields(video_id = %session.video_id()))]
    pub async fn quiz(&self, session: &Session, num_questions: usize) -> Result<QuizOutcome> {
        self.settings.synthesis.check_question_count(num_questions)?;

        let sources = self
            .search(session, &self.settings.retrieval.quiz_query, self.settings.retrieval.k)
            .await?;

        let quiz = self
            .synthesizer
            .generate_quiz(&sources.to_context(), num_questions)
            .await?;

        Ok(QuizOutcome { quiz, sources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::QuizQuestion;
    use crate::transcript::TranscriptSegment;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Embeds text by letter frequency.
    struct LetterEmbedder;

    #[async_trait]
    impl Embedder for LetterEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    let mut v = vec![0.0; 26];
                    for c in t.to_ascii_lowercase().bytes().filter(u8::is_ascii_lowercase) {
                        v[(c - b'a') as usize] += 1.0;
                    }
                    v
                })
                .collect())
        }

        fn dimensions(&self) -> usize {
            26
        }
    }

    /// Records the context it was given.
    #[derive(Default)]
    struct RecordingSynthesizer {
        contexts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Synthesizer for RecordingSynthesizer {
        async fn summarize(&self, context: &str, instructions: &str) -> Result<String> {
            self.contexts.lock().unwrap().push(context.to_string());
            Ok(format!("summary ({})", instructions.len()))
        }

        async fn generate_quiz(&self, context: &str, num_questions: usize) -> Result<Quiz> {
            self.contexts.lock().unwrap().push(context.to_string());
            Ok(Quiz {
                questions: (0..num_questions)
                    .map(|i| QuizQuestion {
                        question: format!("Question {}", i + 1),
                        choices: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                        answer: "A".to_string(),
                    })
                    .collect(),
            })
        }
    }

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.chunking.chunk_size = 20;
        settings.chunking.overlap = 5;
        settings.retrieval.k = 3;
        settings
    }

    fn pipeline(synthesizer: Arc<RecordingSynthesizer>) -> Pipeline {
        Pipeline::with_components(settings(), Prompts::default(), Arc::new(LetterEmbedder), synthesizer).unwrap()
    }

    fn transcript() -> Transcript {
        Transcript::new(
            "dQw4w9WgXcQ".to_string(),
            vec![
                TranscriptSegment::new(0.0, 10.0, "today we cover ownership".to_string()),
                TranscriptSegment::new(10.0, 20.0, "then borrowing and lifetimes".to_string()),
                TranscriptSegment::new(75.0, 90.0, "finally a summary of everything".to_string()),
            ],
        )
    }

    #[tokio::test]
    async fn test_prepare_and_summarize() {
        let synthesizer = Arc::new(RecordingSynthesizer::default());
        let pipeline = pipeline(synthesizer.clone());

        let session = pipeline.prepare(transcript()).await.unwrap();
        assert!(session.index().len() > 1);

        let summary = pipeline.summarize(&session).await.unwrap();
        assert!(summary.text.starts_with("summary"));
        assert_eq!(summary.sources.len(), 3);

        let contexts = synthesizer.contexts.lock().unwrap();
        assert_eq!(contexts[0], summary.sources.to_context());
    }

    #[tokio::test]
    async fn test_quiz_respects_question_bounds() {
        let synthesizer = Arc::new(RecordingSynthesizer::default());
        let pipeline = pipeline(synthesizer);
        let session = pipeline.prepare(transcript()).await.unwrap();

        let outcome = pipeline.quiz(&session, 4).await.unwrap();
        assert_eq!(outcome.quiz.len(), 4);

        let err = pipeline.quiz(&session, 2).await.unwrap_err();
        assert!(matches!(err, TldwError::InvalidConfiguration(_)));
    }

    #[tokio::test]
    async fn test_empty_transcript_is_reported() {
        let pipeline = pipeline(Arc::new(RecordingSynthesizer::default()));
        let empty = Transcript::new("dQw4w9WgXcQ".to_string(), Vec::new());

        let err = pipeline.prepare(empty).await.err().unwrap();
        assert!(matches!(err, TldwError::TranscriptNotFound(_)));
    }

    #[tokio::test]
    async fn test_links_and_timestamps() {
        let pipeline = pipeline(Arc::new(RecordingSynthesizer::default()));
        let session = pipeline.prepare(transcript()).await.unwrap();

        let last = session.index().chunks().last().unwrap().clone();
        assert_eq!(session.timestamp(&last), Some("01:15".to_string()));
        assert_eq!(
            session.link(&last),
            Some("https://youtube.com/watch?v=dQw4w9WgXcQ&t=75s".to_string())
        );

        let local = pipeline
            .prepare(Transcript::from_text("local_notes".to_string(), "some notes here".to_string()))
            .await
            .unwrap();
        let first = local.index().chunks().next().unwrap().clone();
        assert_eq!(local.link(&first), None);
        assert_eq!(local.timestamp(&first), None);
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected() {
        let pipeline = pipeline(Arc::new(RecordingSynthesizer::default()));
        let err = pipeline.fetch_transcript("https://example.com/not-youtube").await.unwrap_err();
        assert!(matches!(err, TldwError::InvalidInput(_)));
    }
}
