//! OpenAI chat-completion synthesizer.

use super::{Quiz, Synthesizer};
use crate::config::Prompts;
use crate::error::{Result, TldwError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Summaries and quizzes through the OpenAI chat API.
pub struct OpenAISynthesizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    prompts: Prompts,
}

impl OpenAISynthesizer {
    /// Create a new synthesizer for the given chat model.
    pub fn new(model: &str) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            model: model.to_string(),
            temperature: 0.7,
            prompts: Prompts::default(),
        })
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Send one system + user exchange and return the reply text.
    async fn complete(&self, system: String, user: String, json: bool) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()
                .map_err(|e| TldwError::Synthesis(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user)
                .build()
                .map_err(|e| TldwError::Synthesis(e.to_string()))?
                .into(),
        ];

        let mut request = CreateChatCompletionRequestArgs::default();
        request
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature);
        if json {
            request.response_format(ResponseFormat::JsonObject);
        }
        let request = request
            .build()
            .map_err(|e| TldwError::Synthesis(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            TldwError::Synthesis(format!("Chat completion failed: {}", e))
        })?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| TldwError::Synthesis("Empty response from LLM".to_string()))
    }
}

#[async_trait]
impl Synthesizer for OpenAISynthesizer {
    #[instrument(skip(self, context, instructions), fields(context_chars = context.len()))]
    async fn summarize(&self, context: &str, instructions: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("instructions".to_string(), instructions.to_string());
        vars.insert("content".to_string(), context.to_string());

        let system = self.prompts.render_with_custom(&self.prompts.summary.system, &vars);
        let user = self.prompts.render_with_custom(&self.prompts.summary.user, &vars);

        info!("Generating summary with {}", self.model);
        let summary = self.complete(system, user, false).await?;
        debug!("Summary is {} chars", summary.len());

        Ok(summary)
    }

    #[instrument(skip(self, context), fields(context_chars = context.len()))]
    async fn generate_quiz(&self, context: &str, num_questions: usize) -> Result<Quiz> {
        if num_questions == 0 {
            return Err(TldwError::InvalidConfiguration(
                "a quiz needs at least one question".to_string(),
            ));
        }

        let mut vars = HashMap::new();
        vars.insert("num_questions".to_string(), num_questions.to_string());
        vars.insert("content".to_string(), context.to_string());

        let system = self.prompts.render_with_custom(&self.prompts.quiz.system, &vars);
        let user = self.prompts.render_with_custom(&self.prompts.quiz.user, &vars);

        info!("Generating {} quiz questions with {}", num_questions, self.model);
        let raw = self.complete(system, user, true).await?;
        let quiz = Quiz::parse(&raw)?;

        if quiz.len() != num_questions {
            warn!("Requested {} questions, model returned {}", num_questions, quiz.len());
        }

        Ok(quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_questions_rejected_before_request() {
        let synthesizer = OpenAISynthesizer::new("gpt-4o-mini").unwrap();
        let err = synthesizer.generate_quiz("context", 0).await.unwrap_err();
        assert!(matches!(err, TldwError::InvalidConfiguration(_)));
    }
}
