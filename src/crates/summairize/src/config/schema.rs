//! Configuration schema for summairize

use crate::error::{Result, SummairizeError};
use llm::LocalLlmConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Main summairize configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SummairizeConfig {
    /// Provider used for summarization
    #[serde(default)]
    pub provider: ProviderKind,

    /// Local Ollama daemon settings
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Summary generation settings
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Note exclusion rules
    #[serde(default)]
    pub filter: FilterConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Known provider identifiers.
///
/// Only `ollama` has an implementation; the others can be selected but
/// resolve to "not found" at summarization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Ollama,
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    /// Registry key for this provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = SummairizeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(ProviderKind::Ollama),
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            other => Err(SummairizeError::Config(format!(
                "Unknown provider '{}' (expected one of: ollama, openai, anthropic)",
                other
            ))),
        }
    }
}

/// Ollama daemon configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Default model name
    pub model: String,

    /// Base URL of the HTTP API
    pub base_url: String,

    /// Command-line client used by the fallback channel
    #[serde(default = "default_client")]
    pub client: String,

    /// HTTP request deadline in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Deadline for `ollama pull` in seconds
    #[serde(default = "default_pull_timeout")]
    pub pull_timeout_secs: u64,
}

fn default_client() -> String {
    "ollama".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_pull_timeout() -> u64 {
    1800
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            model: "gemma3:4b".to_string(),
            base_url: "http://localhost:11434".to_string(),
            client: default_client(),
            request_timeout_secs: default_request_timeout(),
            pull_timeout_secs: default_pull_timeout(),
        }
    }
}

impl OllamaConfig {
    /// Provider configuration derived from this section.
    pub fn to_provider_config(&self) -> LocalLlmConfig {
        LocalLlmConfig::new(&self.base_url, &self.model)
            .with_client(&self.client)
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_pull_timeout(Duration::from_secs(self.pull_timeout_secs))
    }
}

/// Summary generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Target summary length in words
    pub length: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self { length: 500 }
    }
}

/// Exclusion rules for notes that should not be summarized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Skip template notes
    #[serde(default = "default_true")]
    pub exclude_templates: bool,

    /// Skip daily notes
    #[serde(default = "default_true")]
    pub exclude_daily_notes: bool,

    /// Regex matched against the file stem
    #[serde(default = "default_daily_notes_pattern")]
    pub daily_notes_pattern: String,

    /// Folder names treated as template folders (case-insensitive)
    #[serde(default = "default_template_folders")]
    pub template_folders: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_daily_notes_pattern() -> String {
    r"\d{4}-\d{2}-\d{2}".to_string()
}

fn default_template_folders() -> Vec<String> {
    vec!["Templates".to_string(), "templates".to_string()]
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            exclude_templates: true,
            exclude_daily_notes: true,
            daily_notes_pattern: default_daily_notes_pattern(),
            template_folders: default_template_folders(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Values picked up from `SUMMAIRIZE_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub ollama_url: Option<String>,
    pub summary_length: Option<u32>,
}

impl EnvOverrides {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            provider: tooling::config::get_env("SUMMAIRIZE_PROVIDER")?,
            model: tooling::config::get_env("SUMMAIRIZE_MODEL")?,
            ollama_url: tooling::config::get_env("SUMMAIRIZE_OLLAMA_URL")?,
            summary_length: tooling::config::get_env_parse("SUMMAIRIZE_SUMMARY_LENGTH")?,
        })
    }
}

impl SummairizeConfig {
    /// Apply environment overrides on top of file-based values.
    pub fn apply_overrides(&mut self, overrides: EnvOverrides) -> Result<()> {
        if let Some(provider) = overrides.provider {
            self.provider = provider.parse()?;
        }
        if let Some(model) = overrides.model {
            self.ollama.model = model;
        }
        if let Some(url) = overrides.ollama_url {
            self.ollama.base_url = url;
        }
        if let Some(length) = overrides.summary_length {
            self.summary.length = length;
        }
        Ok(())
    }

    /// Reject values that would only fail later, at summarization time.
    pub fn validate(&self) -> Result<()> {
        if self.summary.length == 0 {
            return Err(SummairizeError::Config(
                "summary.length must be a positive word count".to_string(),
            ));
        }
        if self.ollama.model.trim().is_empty() {
            return Err(SummairizeError::Config(
                "ollama.model must not be empty".to_string(),
            ));
        }
        if self.ollama.base_url.trim().is_empty() {
            return Err(SummairizeError::Config(
                "ollama.base_url must not be empty".to_string(),
            ));
        }
        Regex::new(&self.filter.daily_notes_pattern)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SummairizeConfig::default();
        assert_eq!(config.provider, ProviderKind::Ollama);
        assert_eq!(config.ollama.model, "gemma3:4b");
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
        assert_eq!(config.summary.length, 500);
        assert!(config.filter.exclude_templates);
        assert_eq!(config.filter.template_folders, vec!["Templates", "templates"]);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml = r#"
            provider = "anthropic"

            [ollama]
            model = "llama3.2"
            base_url = "http://10.0.0.5:11434"
        "#;

        let config: SummairizeConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.provider, ProviderKind::Anthropic);
        assert_eq!(config.ollama.model, "llama3.2");
        assert_eq!(config.ollama.client, "ollama");
        assert_eq!(config.ollama.request_timeout_secs, 30);
        assert_eq!(config.summary.length, 500);
    }

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::OpenAi.to_string(), "openai");

        let err = "mistral".parse::<ProviderKind>().unwrap_err();
        assert!(err.to_string().contains("mistral"));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = SummairizeConfig::default();
        config
            .apply_overrides(EnvOverrides {
                provider: Some("openai".into()),
                model: Some("mistral:7b".into()),
                ollama_url: Some("http://gpu-box:11434".into()),
                summary_length: Some(120),
            })
            .unwrap();

        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.ollama.model, "mistral:7b");
        assert_eq!(config.ollama.base_url, "http://gpu-box:11434");
        assert_eq!(config.summary.length, 120);
    }

    #[test]
    fn test_bad_provider_override_is_rejected() {
        let mut config = SummairizeConfig::default();
        let result = config.apply_overrides(EnvOverrides {
            provider: Some("cohere".into()),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(config.provider, ProviderKind::Ollama);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SummairizeConfig::default();
        config.summary.length = 0;
        assert!(config.validate().is_err());

        let mut config = SummairizeConfig::default();
        config.ollama.model = "  ".into();
        assert!(config.validate().is_err());

        let mut config = SummairizeConfig::default();
        config.filter.daily_notes_pattern = "(unclosed".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_provider_config_conversion() {
        let mut config = OllamaConfig::default();
        config.base_url = "http://localhost:11434/".into();
        config.request_timeout_secs = 12;

        let provider = config.to_provider_config();
        assert_eq!(provider.base_url, "http://localhost:11434");
        assert_eq!(provider.model, "gemma3:4b");
        assert_eq!(provider.timeout, Duration::from_secs(12));
        assert_eq!(provider.pull_timeout, Duration::from_secs(1800));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = SummairizeConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("provider = \"ollama\""));
        let parsed: SummairizeConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
