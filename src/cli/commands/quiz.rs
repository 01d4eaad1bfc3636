//! Quiz command implementation.

use super::open_session;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the quiz command.
pub async fn run_quiz(
    input: &str,
    questions: Option<usize>,
    show_answers: bool,
    json: bool,
    settings: Settings,
) -> Result<()> {
    let num_questions = questions.unwrap_or(settings.synthesis.num_questions);
    if let Err(e) = settings.synthesis.check_question_count(num_questions) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let (pipeline, session) = open_session(input, settings).await?;

    let spinner = Output::spinner("Generating quiz...");
    let result = pipeline.quiz(&session, num_questions).await;
    spinner.finish_and_clear();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            Output::error(&format!("Failed to generate quiz: {}", e));
            Output::info("Some videos do not support quiz generation due to transcript issues.");
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.quiz)?);
        return Ok(());
    }

    Output::header("Quiz");
    for (i, question) in outcome.quiz.questions.iter().enumerate() {
        Output::quiz_question(i + 1, question, show_answers);
    }
    println!();

    Ok(())
}
