//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::error::{Result, TldwError};
use crate::openai::is_api_key_configured;
use std::path::Path;
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Fetching a transcript only.
    Transcript,
    /// Anything that embeds or synthesizes.
    Analyze,
}

/// Run pre-flight checks for the given operation and input.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, input: &str) -> Result<()> {
    if matches!(operation, Operation::Analyze) {
        check_api_key()?;
    }

    // Local transcript files don't need yt-dlp
    if !Path::new(input).is_file() {
        check_tool("yt-dlp")?;
    }

    Ok(())
}

/// Check if OpenAI API key is configured.
fn check_api_key() -> Result<()> {
    if is_api_key_configured() {
        Ok(())
    } else {
        Err(TldwError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        ))
    }
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(TldwError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TldwError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(TldwError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_transcript_needs_nothing() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(check(Operation::Transcript, file.path().to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_missing_tool() {
        let err = check_tool("tldw-no-such-tool").unwrap_err();
        assert!(matches!(err, TldwError::ToolNotFound(_)));
    }
}
