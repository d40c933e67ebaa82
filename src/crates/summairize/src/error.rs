//! Error types for summairize
//!
//! Summarization itself never returns these; its failures are folded into
//! [`crate::SummaryResult`]. They cover configuration, file access and the
//! model-management calls.

use llm::LlmError;
use thiserror::Error;
use tooling::ToolingError;

/// Result type alias for summairize operations
pub type Result<T> = std::result::Result<T, SummairizeError>;

/// Main error type for summairize operations
#[derive(Debug, Error)]
pub enum SummairizeError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid exclusion pattern
    #[error("Invalid daily notes pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A provider needed for the operation is not registered
    #[error("{0} provider not available")]
    ProviderNotAvailable(String),

    /// Provider failure
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// Environment or logging setup error
    #[error(transparent)]
    Tooling(#[from] ToolingError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_not_available_message() {
        let err = SummairizeError::ProviderNotAvailable("Ollama".into());
        assert_eq!(err.to_string(), "Ollama provider not available");
    }

    #[test]
    fn test_llm_error_is_transparent() {
        let err = SummairizeError::from(LlmError::DaemonNotRunning);
        assert_eq!(
            err.to_string(),
            "Ollama service is not running. Please start Ollama first."
        );
    }
}
