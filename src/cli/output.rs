//! CLI output formatting utilities.

use crate::synthesis::{QuizQuestion, ANSWER_LABELS};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        eprintln!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        eprintln!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a ranked transcript passage.
    pub fn search_result(rank: usize, timestamp: Option<&str>, score: f32, content: &str, url: Option<&str>) {
        let position = timestamp.map(|t| format!(" @ {}", style(t).cyan())).unwrap_or_default();
        println!(
            "\n{} #{}{} (score: {:.2})",
            style(">>").green(),
            rank,
            position,
            score
        );
        println!("   {}", content_preview(content, 200));
        if let Some(u) = url {
            println!("   {}", style(u).dim());
        }
    }

    /// Print one quiz question with its labeled choices.
    pub fn quiz_question(number: usize, question: &QuizQuestion, show_answer: bool) {
        println!("\n{}", style(format!("{}. {}", number, question.question)).bold());
        for (label, choice) in ANSWER_LABELS.iter().zip(&question.choices) {
            println!("   {}. {}", label, choice);
        }
        if show_answer {
            println!("   {} {}", style("Answer:").green().bold(), question.answer);
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Collapse newlines and truncate content with ellipsis.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        format!("{}...", content.chars().take(max_chars).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_preview() {
        assert_eq!(content_preview("short\ntext", 20), "short text");
        assert_eq!(content_preview("ääääää", 3), "äää...");
    }
}
