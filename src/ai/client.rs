//! Single-turn chat client over an OpenAI-compatible endpoint.
//!
//! The assistant talks to whichever provider the settings point at
//! (OpenAI or DeepSeek, or anything else speaking the same protocol via a
//! custom base URL). Requests are single-turn: one system instruction, one
//! user message, no conversation history.

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use tracing::debug;

use crate::config::Settings;

use super::AiError;

#[derive(Clone)]
pub struct ModelClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl ModelClient {
    /// Build a client from the effective settings. Returns `None` when no
    /// API key is available - callers degrade to rule-only translation.
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        let api_key = settings.api_key.clone()?;
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(settings.resolved_base_url());
        Some(Self {
            client: Client::with_config(config),
            model: settings.resolved_model(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One blocking round-trip: instruction + user message in, raw reply
    /// text out. The caller owns any timeout policy around this.
    pub async fn generate(
        &self,
        instruction: &str,
        user_message: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, AiError> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(instruction)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(temperature)
            .max_completion_tokens(max_tokens)
            .build()?;

        debug!(model = %self.model, "sending chat completion request");
        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        match content {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            _ => Err(AiError::EmptyReply),
        }
    }
}
