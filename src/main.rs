//! tldw CLI entry point.

use anyhow::Result;
use clap::Parser;
use tldw::cli::{commands, Cli, Commands};
use tldw::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("tldw={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };

    std::fs::create_dir_all(settings.temp_dir())?;

    match &cli.command {
        Commands::Summarize { input, k, sources } => {
            commands::run_summarize(input, *k, *sources, settings).await?;
        }

        Commands::Quiz {
            input,
            questions,
            no_answers,
            json,
        } => {
            commands::run_quiz(input, *questions, !*no_answers, *json, settings).await?;
        }

        Commands::Search { input, query, k } => {
            commands::run_search(input, query, *k, settings).await?;
        }

        Commands::Transcript { input, output, format } => {
            commands::run_transcript(input, output.clone(), *format, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, cli.config.as_deref(), settings)?;
        }
    }

    Ok(())
}
