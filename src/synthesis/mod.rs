//! Turning retrieved transcript context into summaries and quizzes.

mod openai;

pub use openai::OpenAISynthesizer;

use crate::error::{Result, TldwError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Answer labels, in choice order.
pub const ANSWER_LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// Trait for language-model backed text synthesis.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Summarize `context` following `instructions`.
    async fn summarize(&self, context: &str, instructions: &str) -> Result<String>;

    /// Generate a multiple-choice quiz of `num_questions` questions about `context`.
    async fn generate_quiz(&self, context: &str, num_questions: usize) -> Result<Quiz>;
}

/// A multiple-choice quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

/// One question with four choices and the label of the correct one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub choices: Vec<String>,
    /// Letter `A`-`D` naming the correct choice.
    pub answer: String,
}

impl QuizQuestion {
    /// Text of the correct choice.
    pub fn correct_choice(&self) -> Option<&str> {
        let position = ANSWER_LABELS.iter().position(|l| *l == self.answer)?;
        self.choices.get(position).map(String::as_str)
    }

    fn validate(&self, number: usize) -> Result<()> {
        if self.question.trim().is_empty() {
            return Err(TldwError::Synthesis(format!("Question {} has no text", number)));
        }
        if self.choices.len() != ANSWER_LABELS.len() {
            return Err(TldwError::Synthesis(format!(
                "Question {} has {} choices, expected {}",
                number,
                self.choices.len(),
                ANSWER_LABELS.len()
            )));
        }
        if !ANSWER_LABELS.contains(&self.answer.as_str()) {
            return Err(TldwError::Synthesis(format!(
                "Question {} has invalid answer label '{}'",
                number, self.answer
            )));
        }
        Ok(())
    }
}

impl Quiz {
    /// Parse a quiz from a model response.
    ///
    /// Tolerates prose or code fences around the JSON object. Answers are
    /// normalized to a single upper-case letter (`"b)"` becomes `"B"`).
    pub fn parse(response: &str) -> Result<Self> {
        let json_start = response.find('{');
        let json_end = response.rfind('}');

        let json_str = match (json_start, json_end) {
            (Some(start), Some(end)) if end > start => &response[start..=end],
            _ => response,
        };

        let mut quiz: Quiz = serde_json::from_str(json_str).map_err(|e| {
            TldwError::Synthesis(format!(
                "Failed to parse quiz response: {}. Response was: {}",
                e,
                response.chars().take(500).collect::<String>()
            ))
        })?;

        if quiz.questions.is_empty() {
            return Err(TldwError::Synthesis("Quiz response contained no questions".to_string()));
        }

        for (i, question) in quiz.questions.iter_mut().enumerate() {
            question.answer = normalize_answer(&question.answer);
            question.validate(i + 1)?;
        }

        Ok(quiz)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn normalize_answer(answer: &str) -> String {
    answer
        .trim()
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}
