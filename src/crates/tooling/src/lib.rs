//! Tooling utilities and helpers for summairize
//!
//! This crate holds the low-level pieces the provider layer builds on.
//!
//! # Modules
//!
//! - `shell` - Command runner with bounded timeout/output, search-path
//!   reconstruction, command probing and shell-safe quoting
//! - `async_utils` - Timeout wrapper for async operations
//! - `config` - Environment variable loading helpers
//! - `logging` - Subscriber setup and timing helpers

pub mod async_utils;
pub mod config;
pub mod logging;
pub mod shell;

use thiserror::Error;

pub use shell::{escape_argument, CommandError, CommandExecutor, ShellRunner};

/// Errors that can occur in the tooling crate
#[derive(Debug, Error)]
pub enum ToolingError {
    /// Environment variable present but unusable
    #[error("Invalid environment variable {key}: {reason}")]
    InvalidEnv { key: String, reason: String },

    /// Logging subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Result type for tooling operations
pub type Result<T> = std::result::Result<T, ToolingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_env_display() {
        let err = ToolingError::InvalidEnv {
            key: "SUMMAIRIZE_SUMMARY_LENGTH".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid environment variable SUMMAIRIZE_SUMMARY_LENGTH: invalid digit found in string"
        );
    }
}
