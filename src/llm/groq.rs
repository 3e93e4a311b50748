//! Groq chat client via the OpenAI-compatible completions API.

use super::ChatModel;
use crate::config::{LlmSettings, Prompts};
use crate::error::{FlickError, Result};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default timeout for chat API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Groq-backed chat model.
pub struct GroqChat {
    client: async_openai::Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
    temperature: f32,
    system_prompt: String,
    context_preamble: String,
}

impl GroqChat {
    /// Create a client from `GROQ_API_KEY` and the configured API base.
    pub fn from_env(settings: &LlmSettings, prompts: &Prompts) -> Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| FlickError::Config("GROQ_API_KEY not set".to_string()))?;

        Ok(Self::new(&api_key, settings, prompts))
    }

    pub fn new(api_key: &str, settings: &LlmSettings, prompts: &Prompts) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        let config = OpenAIConfig::new()
            .with_api_base(&settings.api_base)
            .with_api_key(api_key);

        // Render {{variable}} placeholders from the prompt config.
        let no_vars = std::collections::HashMap::new();
        let system_prompt = prompts.render_with_custom(&prompts.assistant.system, &no_vars);
        let context_preamble =
            prompts.render_with_custom(&prompts.assistant.context_preamble, &no_vars);

        Self {
            client: async_openai::Client::with_config(config).with_http_client(http_client),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            system_prompt,
            context_preamble,
        }
    }

    /// Override the model for this session.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

#[async_trait]
impl ChatModel for GroqChat {
    #[instrument(skip(self, prompt, context), fields(model = %self.model))]
    async fn generate(&self, prompt: &str, context: Option<&str>) -> Result<String> {
        let system_prompt = match context {
            Some(ctx) => format!("{}\n\n{}\n{}", self.system_prompt, self.context_preamble, ctx),
            None => self.system_prompt.clone(),
        };

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()
                .map_err(|e| FlickError::Chat(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| FlickError::Chat(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build()
            .map_err(|e| FlickError::Chat(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| FlickError::Groq(format!("Failed to generate response: {}", e)))?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| FlickError::Chat("Empty response from model".to_string()))?
            .clone();

        debug!("Generated {} characters", answer.len());
        Ok(answer)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let chat = GroqChat::new("test-key", &LlmSettings::default(), &Prompts::default());
        assert_eq!(chat.model(), "llama-3.1-8b-instant");

        let chat = chat.with_model("llama-3.3-70b-versatile");
        assert_eq!(chat.model(), "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_prompt_variables_are_rendered() {
        let mut prompts = Prompts::default();
        prompts.assistant.system = "You are {{assistant_name}}, a film expert.".to_string();
        prompts
            .variables
            .insert("assistant_name".to_string(), "Flick".to_string());

        let chat = GroqChat::new("test-key", &LlmSettings::default(), &prompts);
        assert_eq!(chat.system_prompt, "You are Flick, a film expert.");
        assert!(!chat.context_preamble.contains("{{"));
    }
}
