//! The translation pipeline.
//!
//! An explicit ordered chain of fallible strategies, kept flat on purpose
//! so the precedence is auditable: reject blank input, run the rule-based
//! translator, then (when AI mode is on) consult the model with a
//! scenario-selected instruction, falling back to the rule result if the
//! model fails. The pipeline never fabricates a command: when every
//! strategy misses, the failure is surfaced as-is.

use thiserror::Error;
use tracing::{debug, info};

use crate::ai::{AiError, AiTranslator};
use crate::config::TranslationMode;
use crate::rules;
use crate::scenario::{self, Scenario};

/// Which strategy produced the final command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Rules,
    Ai,
}

/// A successfully resolved command with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub command: String,
    pub strategy: Strategy,
    /// The scenario the model was prompted with; `None` when the rule
    /// stage resolved the command on its own.
    pub scenario: Option<Scenario>,
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("输入不能为空 (input must not be empty)")]
    EmptyInput,
    #[error("抱歉，我不理解这个命令 (no rule matched and AI translation is disabled)")]
    NoMatch,
    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Resolves utterances through the strategy chain.
pub struct Translator {
    mode: TranslationMode,
    ai: Option<AiTranslator>,
}

impl Translator {
    pub fn new(mode: TranslationMode, ai: Option<AiTranslator>) -> Self {
        Self { mode, ai }
    }

    /// True when the model will be consulted for utterances.
    pub fn ai_enabled(&self) -> bool {
        self.mode == TranslationMode::Ai && self.ai.is_some()
    }

    /// Translate one utterance into an executable command.
    pub async fn translate(
        &self,
        utterance: &str,
        context_hint: Option<&str>,
    ) -> Result<Translation, TranslateError> {
        if utterance.trim().is_empty() {
            return Err(TranslateError::EmptyInput);
        }

        let rule_result = rules::translate(utterance);
        if let Some(command) = &rule_result {
            debug!(command, "rule-based match");
        }

        let ai = match (&self.ai, self.mode) {
            (Some(ai), TranslationMode::Ai) => ai,
            _ => {
                // Rule-only operation: a miss is the final answer.
                return rule_result
                    .map(|command| Translation {
                        command,
                        strategy: Strategy::Rules,
                        scenario: None,
                    })
                    .ok_or(TranslateError::NoMatch);
            }
        };

        let scenario = scenario::classify(utterance);
        match ai.translate(utterance, scenario, context_hint).await {
            Ok(command) => Ok(Translation {
                command,
                strategy: Strategy::Ai,
                scenario: Some(scenario),
            }),
            Err(e) => match rule_result {
                // The rule stage already had an answer; use it rather than
                // failing the whole translation on a remote hiccup.
                Some(command) => {
                    info!("AI translation failed ({e}), using rule-based result");
                    Ok(Translation {
                        command,
                        strategy: Strategy::Rules,
                        scenario: Some(scenario),
                    })
                }
                None => Err(e.into()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_only() -> Translator {
        Translator::new(TranslationMode::Rules, None)
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected_first() {
        for input in ["", "   ", "\t\n"] {
            let err = rules_only().translate(input, None).await.unwrap_err();
            assert!(matches!(err, TranslateError::EmptyInput), "input: {input:?}");
        }
    }

    #[tokio::test]
    async fn test_rule_hit_in_rules_mode() {
        let t = rules_only()
            .translate("查看当前目录", None)
            .await
            .unwrap();
        assert_eq!(t.command, "pwd");
        assert_eq!(t.strategy, Strategy::Rules);
        assert_eq!(t.scenario, None);
    }

    #[tokio::test]
    async fn test_rule_miss_in_rules_mode_is_no_match() {
        let err = rules_only()
            .translate("summarize this repository", None)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::NoMatch));
    }

    #[tokio::test]
    async fn test_ai_mode_without_client_degrades_to_rules() {
        // AI mode configured but no usable client (e.g. missing API key).
        let t = Translator::new(TranslationMode::Ai, None);
        assert!(!t.ai_enabled());
        let translation = t.translate("list files", None).await.unwrap();
        assert_eq!(translation.command, "ls -la");
        assert_eq!(translation.strategy, Strategy::Rules);
    }
}
