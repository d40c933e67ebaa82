//! Error types for summarization providers.

use thiserror::Error;
use tooling::CommandError;

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when working with providers.
///
/// The first group is what a user sees after every channel to a provider
/// has failed; each message is a complete sentence with the remediation
/// hint embedded. The second group covers transport and decoding failures.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The requested model is not installed.
    #[error("Ollama model '{model}' not found. Please run: ollama pull {model}")]
    ModelNotFound { model: String },

    /// The daemon is not running or refuses connections.
    #[error("Ollama service is not running. Please start Ollama first.")]
    DaemonNotRunning,

    /// The command-line client is not installed.
    #[error("Ollama is not installed. Please install Ollama from https://ollama.ai")]
    ClientNotInstalled,

    /// Request timeout.
    #[error("Ollama did not respond in time: {0}")]
    Timeout(String),

    /// Unclassified provider failure; the original detail is preserved.
    #[error("Ollama error: {0}")]
    ProviderError(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid response from provider.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// External command failed; surfaced unmodified.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LlmError {
    /// Classify a command-line channel failure.
    ///
    /// This is the only place that interprets the daemon's wording. Checks
    /// run in priority order and the first hit wins; anything unrecognised
    /// becomes [`LlmError::ProviderError`] with the original text.
    pub fn from_cli_failure(model: &str, failure: &CommandError) -> Self {
        if let CommandError::TimedOut(limit) = failure {
            return LlmError::Timeout(format!("no response within {}s", limit.as_secs()));
        }

        let text = failure.to_string();
        let lower = text.to_lowercase();

        if lower.contains("model") && lower.contains("not found") {
            LlmError::ModelNotFound {
                model: model.to_string(),
            }
        } else if lower.contains("connection refused") || lower.contains("connect") {
            LlmError::DaemonNotRunning
        } else if lower.contains("command not found") {
            LlmError::ClientNotInstalled
        } else {
            LlmError::ProviderError(text)
        }
    }

    /// Check if this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            LlmError::Timeout(_) => true,
            LlmError::HttpError(e) => e.is_timeout(),
            LlmError::Command(CommandError::TimedOut(_)) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_model_not_found() {
        let failure = CommandError::Failed("Error: model 'llama9' not found, try pulling it first".into());
        let err = LlmError::from_cli_failure("llama9", &failure);
        assert!(matches!(err, LlmError::ModelNotFound { ref model } if model == "llama9"));
        assert_eq!(
            err.to_string(),
            "Ollama model 'llama9' not found. Please run: ollama pull llama9"
        );
    }

    #[test]
    fn test_connection_refused() {
        let failure = CommandError::Failed(
            "Error: could not connect to ollama app, is it running?".into(),
        );
        let err = LlmError::from_cli_failure("gemma3:4b", &failure);
        assert!(matches!(err, LlmError::DaemonNotRunning));

        let failure = CommandError::Failed("dial tcp 127.0.0.1:11434: connection refused".into());
        assert!(matches!(
            LlmError::from_cli_failure("gemma3:4b", &failure),
            LlmError::DaemonNotRunning
        ));
    }

    #[test]
    fn test_client_missing() {
        let failure = CommandError::NotFound("sh: 1: ollama: not found".into());
        let err = LlmError::from_cli_failure("gemma3:4b", &failure);
        assert!(matches!(err, LlmError::ClientNotInstalled));
        assert!(err.to_string().contains("https://ollama.ai"));
    }

    #[test]
    fn test_model_not_found_wins_over_connect() {
        let failure = CommandError::Failed("connected, but model not found".into());
        assert!(matches!(
            LlmError::from_cli_failure("x", &failure),
            LlmError::ModelNotFound { .. }
        ));
    }

    #[test]
    fn test_timeout() {
        let failure = CommandError::TimedOut(Duration::from_secs(30));
        let err = LlmError::from_cli_failure("gemma3:4b", &failure);
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "Ollama did not respond in time: no response within 30s");
    }

    #[test]
    fn test_unclassified_keeps_detail() {
        let failure = CommandError::Failed("GPU out of memory".into());
        let err = LlmError::from_cli_failure("gemma3:4b", &failure);
        assert_eq!(err.to_string(), "Ollama error: Command failed: GPU out of memory");
    }

    #[test]
    fn test_command_error_is_transparent() {
        let err = LlmError::from(CommandError::Failed("pull failed".into()));
        assert_eq!(err.to_string(), "Command failed: pull failed");
    }
}
