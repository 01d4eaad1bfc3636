//! Prompt templates for tldw.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    pub quiz: QuizPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for video summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub system: String,
    /// What the summary should focus on; passed as `{{instructions}}`.
    pub instructions: String,
    pub user: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            system: "You summarize YouTube video transcripts accurately. Only use information present in the transcript excerpts you are given.".to_string(),
            instructions: "Summarize the following YouTube transcript content clearly for a college student studying for finals. Focus on the main ideas, structure, and key takeaways.".to_string(),
            user: r#"{{instructions}}

{{content}}"#
                .to_string(),
        }
    }
}

/// Prompts for quiz generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizPrompts {
    pub system: String,
    pub user: String,
}

impl Default for QuizPrompts {
    fn default() -> Self {
        Self {
            system: "You write multiple-choice study quizzes from video transcripts. You always answer with a single JSON object and nothing else.".to_string(),
            user: r#"Create a quiz based on the following transcript content.
Generate {{num_questions}} multiple-choice questions with:
- A clear question
- Four answer choices (A, B, C, D)
- Correct answer labeled with the letter only

Format the result as JSON:

{
  "questions": [
    {
      "question": "string",
      "choices": ["A text", "B text", "C text", "D text"],
      "answer": "A"
    }
  ]
}

Transcript:
{{content}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }

            let quiz_path = custom_path.join("quiz.toml");
            if quiz_path.exists() {
                let content = std::fs::read_to_string(&quiz_path)?;
                prompts.quiz = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.summary.user.contains("{{content}}"));
        assert!(prompts.quiz.user.contains("{{num_questions}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_provided_vars_override_custom() {
        let mut prompts = Prompts::default();
        prompts.variables.insert("audience".to_string(), "students".to_string());
        prompts.variables.insert("content".to_string(), "ignored".to_string());

        let mut vars = HashMap::new();
        vars.insert("content".to_string(), "lecture".to_string());

        let rendered = prompts.render_with_custom("For {{audience}}: {{content}}", &vars);
        assert_eq!(rendered, "For students: lecture");
    }

    #[test]
    fn test_load_custom_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("summary.toml"),
            "instructions = \"Give three bullet points.\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.summary.instructions, "Give three bullet points.");
        // Unset fields keep their defaults
        assert!(prompts.summary.user.contains("{{instructions}}"));
        assert_eq!(prompts.quiz, QuizPrompts::default());
    }
}
