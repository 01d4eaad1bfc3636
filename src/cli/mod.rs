//! CLI module for tldw.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand, ValueEnum};

/// tldw - Too Long; Didn't Watch
///
/// Summarize YouTube videos and turn them into study quizzes, using only the
/// parts of the transcript that matter for the request.
#[derive(Parser, Debug)]
#[command(name = "tldw")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a video
    Summarize {
        /// YouTube URL/ID, or transcript file path
        input: String,

        /// Number of transcript chunks to summarize from
        #[arg(short, long)]
        k: Option<usize>,

        /// Show which transcript chunks were used
        #[arg(long)]
        sources: bool,
    },

    /// Generate a multiple-choice quiz from a video
    Quiz {
        /// YouTube URL/ID, or transcript file path
        input: String,

        /// Number of questions
        #[arg(short = 'n', long)]
        questions: Option<usize>,

        /// Hide the answers
        #[arg(long)]
        no_answers: bool,

        /// Print the quiz as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the transcript passages most relevant to a query
    Search {
        /// YouTube URL/ID, or transcript file path
        input: String,

        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "5")]
        k: usize,
    },

    /// Fetch and print a transcript
    Transcript {
        /// YouTube URL/ID, or transcript file path
        input: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = TranscriptFormat::Text)]
        format: TranscriptFormat,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFormat {
    /// Plain text with timestamps
    Text,
    /// JSON segments (readable back as a transcript file)
    Json,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quiz_command() {
        let cli = Cli::parse_from(["tldw", "-vv", "quiz", "https://youtu.be/dQw4w9WgXcQ", "-n", "7"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Quiz { input, questions, no_answers, json } => {
                assert_eq!(input, "https://youtu.be/dQw4w9WgXcQ");
                assert_eq!(questions, Some(7));
                assert!(!no_answers);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_transcript_format() {
        let cli = Cli::parse_from(["tldw", "transcript", "dQw4w9WgXcQ", "--format", "json"]);
        match cli.command {
            Commands::Transcript { format, output, .. } => {
                assert_eq!(format, TranscriptFormat::Json);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
