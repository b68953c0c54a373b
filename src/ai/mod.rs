//! AI-assisted translation.
//!
//! This module owns everything that involves the language model: the
//! single-turn client, the scenario instruction templates, the reply
//! sanitizer, and the error diagnosis helper. The translator never guesses:
//! a failed request or an empty cleaned reply is reported as a distinct
//! error for the caller to handle.

pub mod client;
pub mod diagnose;
pub mod prompt;
pub mod sanitize;

use std::path::PathBuf;

use async_openai::error::OpenAIError;
use thiserror::Error;
use tracing::info;

use crate::scenario::Scenario;

pub use client::ModelClient;

/// Low temperature biases the model toward deterministic, minimal output.
const COMMAND_TEMPERATURE: f32 = 0.3;
/// Commands are one short line; cap the reply accordingly.
const COMMAND_MAX_TOKENS: u32 = 200;

#[derive(Debug, Error)]
pub enum AiError {
    /// The request itself failed: transport, authentication, or a
    /// malformed response.
    #[error("AI 调用失败 (model request failed): {0}")]
    Remote(#[from] OpenAIError),
    /// The model answered, but with no content at all.
    #[error("AI 返回了空响应 (model returned an empty reply)")]
    EmptyReply,
    /// The model answered, but sanitization left nothing executable.
    #[error("AI 返回了空命令 (nothing usable left after cleaning the reply)")]
    EmptyAfterCleaning,
}

/// Translates utterances through the model using scenario-selected
/// instructions.
pub struct AiTranslator {
    client: ModelClient,
    prompts_dir: PathBuf,
}

impl AiTranslator {
    pub fn new(client: ModelClient, prompts_dir: PathBuf) -> Self {
        Self {
            client,
            prompts_dir,
        }
    }

    pub fn client(&self) -> &ModelClient {
        &self.client
    }

    /// Produce a cleaned single-line command for an utterance.
    pub async fn translate(
        &self,
        utterance: &str,
        scenario: Scenario,
        context_hint: Option<&str>,
    ) -> Result<String, AiError> {
        let instruction = prompt::load_instruction(&self.prompts_dir, scenario);
        let instruction = prompt::with_context_hint(&instruction, context_hint);

        let raw = self
            .client
            .generate(
                &instruction,
                utterance.trim(),
                COMMAND_TEMPERATURE,
                COMMAND_MAX_TOKENS,
            )
            .await?;

        let cleaned = sanitize::sanitize(&raw);
        if cleaned.is_empty() {
            return Err(AiError::EmptyAfterCleaning);
        }

        info!(scenario = scenario.name(), command = %cleaned, "AI translation");
        Ok(cleaned)
    }
}
