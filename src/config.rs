//! Persistent settings with environment overrides.
//!
//! Settings live in `~/.nlsh/config.json` and are written atomically
//! (temp file + rename). Environment variables always win over the file,
//! so a one-off `DEEPSEEK_API_KEY=... nlsh` works without touching the
//! config on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::utils;

/// Which OpenAI-compatible endpoint to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    DeepSeek,
}

impl Provider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com/v1",
            Provider::DeepSeek => "https://api.deepseek.com/v1",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o-mini",
            Provider::DeepSeek => "deepseek-chat",
        }
    }

    fn env_prefix(self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI",
            Provider::DeepSeek => "DEEPSEEK",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "openai" => Some(Provider::OpenAi),
            "deepseek" => Some(Provider::DeepSeek),
            _ => None,
        }
    }
}

/// How translation requests are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationMode {
    /// Phrase table and intent families only; a miss is a miss.
    Rules,
    /// Consult the model, falling back to the rule result on failure.
    Ai,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub mode: TranslationMode,
    pub enable_history: bool,
    pub max_history_entries: usize,
    pub prompts_dir: PathBuf,
    pub command_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: Provider::DeepSeek,
            api_key: None,
            base_url: None,
            model: None,
            mode: TranslationMode::Ai,
            enable_history: true,
            max_history_entries: 1000,
            prompts_dir: PathBuf::from("prompts"),
            command_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Load settings: built-in defaults, then the config file, then the
    /// environment. Never fails - a broken config file logs a warning and
    /// falls back to defaults.
    pub fn load() -> Self {
        let mut settings = match load_file(&default_config_path()) {
            Ok(Some(s)) => s,
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!("ignoring unreadable config file: {e:#}");
                Settings::default()
            }
        };
        settings.apply_env();
        settings
    }

    /// Overlay environment variables onto the current values.
    fn apply_env(&mut self) {
        if let Ok(value) = std::env::var("AI_PROVIDER") {
            if let Some(provider) = Provider::parse(&value) {
                self.provider = provider;
            }
        }
        let prefix = self.provider.env_prefix();
        if let Ok(key) = std::env::var(format!("{prefix}_API_KEY")) {
            if !key.trim().is_empty() {
                self.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var(format!("{prefix}_BASE_URL")) {
            if !url.trim().is_empty() {
                self.base_url = Some(url);
            }
        }
        if let Ok(model) = std::env::var(format!("{prefix}_MODEL")) {
            if !model.trim().is_empty() {
                self.model = Some(model);
            }
        }
        if let Ok(mode) = std::env::var("NLSH_MODE") {
            match mode.trim().to_lowercase().as_str() {
                "rules" => self.mode = TranslationMode::Rules,
                "ai" => self.mode = TranslationMode::Ai,
                _ => {}
            }
        }
    }

    /// Effective endpoint base URL.
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.provider.default_base_url().to_string())
    }

    /// Effective model name.
    pub fn resolved_model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    /// Update one configuration key and persist the result.
    ///
    /// Keys mirror the JSON field names. Unknown keys are rejected rather
    /// than silently stored.
    pub fn set_value(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "provider" => {
                self.provider = Provider::parse(value)
                    .with_context(|| format!("unknown provider: {value}"))?;
            }
            "api_key" => self.api_key = Some(value.to_string()),
            "base_url" => self.base_url = Some(value.to_string()),
            "model" => self.model = Some(value.to_string()),
            "mode" => {
                self.mode = match value.trim().to_lowercase().as_str() {
                    "rules" => TranslationMode::Rules,
                    "ai" => TranslationMode::Ai,
                    other => anyhow::bail!("unknown mode: {other} (expected rules|ai)"),
                };
            }
            "enable_history" => {
                self.enable_history = value
                    .trim()
                    .parse()
                    .with_context(|| format!("expected true/false, got {value}"))?;
            }
            "max_history_entries" => {
                self.max_history_entries = value
                    .trim()
                    .parse()
                    .with_context(|| format!("expected a number, got {value}"))?;
            }
            "command_timeout_secs" => {
                self.command_timeout_secs = value
                    .trim()
                    .parse()
                    .with_context(|| format!("expected a number, got {value}"))?;
            }
            "prompts_dir" => self.prompts_dir = PathBuf::from(value),
            other => anyhow::bail!("unknown configuration key: {other}"),
        }
        self.save(&default_config_path())
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let data = serde_json::to_vec_pretty(self).context("Failed to serialize settings")?;
        write_atomic(path, &data)
    }

    /// Render the settings for display, masking secret values unless asked
    /// not to.
    pub fn display(&self, show_secrets: bool) -> String {
        let value = match serde_json::to_value(self) {
            Ok(v) => v,
            Err(_) => return String::new(),
        };
        let mut lines = Vec::new();
        if let serde_json::Value::Object(map) = value {
            for (key, val) in map {
                let rendered = match val {
                    serde_json::Value::Null => "(unset)".to_string(),
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                if is_secret_key(&key) && !show_secrets && rendered != "(unset)" {
                    lines.push(format!("  {key}: {}", mask(&rendered)));
                } else {
                    lines.push(format!("  {key}: {rendered}"));
                }
            }
        }
        lines.join("\n")
    }
}

fn is_secret_key(key: &str) -> bool {
    let upper = key.to_uppercase();
    ["KEY", "SECRET", "PASSWORD", "TOKEN"]
        .iter()
        .any(|s| upper.contains(s))
}

/// Mask a secret, keeping the first and last four characters when long
/// enough to stay recognizable.
fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}****{tail}")
    } else {
        "****".to_string()
    }
}

pub fn default_config_path() -> PathBuf {
    utils::app_dir().join("config.json")
}

fn load_file(path: &Path) -> anyhow::Result<Option<Settings>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid settings JSON at {}", path.display()))?;
    Ok(Some(settings))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }
    Ok(())
}

fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    ensure_parent_dir(path)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).with_context(|| format!("Failed to write temp file: {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace {} with {}", path.display(), tmp.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.provider, Provider::DeepSeek);
        assert_eq!(s.mode, TranslationMode::Ai);
        assert_eq!(s.resolved_base_url(), "https://api.deepseek.com/v1");
        assert_eq!(s.resolved_model(), "deepseek-chat");
    }

    #[test]
    fn test_explicit_values_beat_provider_defaults() {
        let s = Settings {
            base_url: Some("http://localhost:8080/v1".to_string()),
            model: Some("local-model".to_string()),
            ..Settings::default()
        };
        assert_eq!(s.resolved_base_url(), "http://localhost:8080/v1");
        assert_eq!(s.resolved_model(), "local-model");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut s = Settings::default();
        s.provider = Provider::OpenAi;
        s.api_key = Some("sk-1234567890abcdef".to_string());
        s.save(&path).unwrap();

        let loaded = load_file(&path).unwrap().unwrap();
        assert_eq!(loaded.provider, Provider::OpenAi);
        assert_eq!(loaded.api_key.as_deref(), Some("sk-1234567890abcdef"));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("nope.json")).unwrap().is_none());
    }

    #[test]
    fn test_display_masks_secrets() {
        let s = Settings {
            api_key: Some("sk-1234567890abcdef".to_string()),
            ..Settings::default()
        };
        let masked = s.display(false);
        assert!(masked.contains("sk-1****cdef"), "got: {masked}");
        assert!(!masked.contains("sk-1234567890abcdef"));

        let full = s.display(true);
        assert!(full.contains("sk-1234567890abcdef"));
    }

    #[test]
    fn test_mask_short_values() {
        assert_eq!(mask("abc"), "****");
        assert_eq!(mask("sk-1234567890abcdef"), "sk-1****cdef");
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(Provider::parse("OpenAI"), Some(Provider::OpenAi));
        assert_eq!(Provider::parse(" deepseek "), Some(Provider::DeepSeek));
        assert_eq!(Provider::parse("claude"), None);
    }
}
