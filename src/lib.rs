//! nlsh - a natural-language shell assistant.
//!
//! Translates free-form requests (mixed Chinese/English) into a single
//! executable shell command and decides how that command should be run:
//! - rule-based translation against a static phrase table, with templated
//!   parameter extraction and fuzzy matching;
//! - scenario-aware AI translation through an OpenAI-compatible model,
//!   with sanitization of the raw reply into one clean command line;
//! - safety and interactivity classification that gates execution.
//!
//! # Example
//!
//! ```no_run
//! use nlsh::config::TranslationMode;
//! use nlsh::translator::Translator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let translator = Translator::new(TranslationMode::Rules, None);
//!     let translation = translator.translate("查看当前目录", None).await.unwrap();
//!     assert_eq!(translation.command, "pwd");
//! }
//! ```

pub mod ai;
pub mod config;
pub mod context;
pub mod exec;
pub mod history;
pub mod params;
pub mod repl;
pub mod rules;
pub mod scenario;
pub mod security;
pub mod translator;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use exec::{CommandOutput, Executor};
pub use scenario::Scenario;
pub use security::CommandAssessment;
pub use translator::{TranslateError, Translation, Translator};
