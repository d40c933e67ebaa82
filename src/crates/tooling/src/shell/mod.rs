//! External command execution.
//!
//! Commands are full shell command lines executed through `sh -c` with a
//! bounded wall-clock timeout and a bounded amount of captured output. The
//! search path handed to the child is rebuilt per invocation so binaries
//! installed outside a minimal GUI-launched environment are still found.
//!
//! # Example
//!
//! ```rust,ignore
//! use tooling::shell::{escape_argument, CommandExecutor, ShellRunner};
//!
//! let runner = ShellRunner::new();
//! let line = format!("ollama pull {}", escape_argument("gemma3:4b"));
//! let output = runner.execute(&line).await?;
//! ```

mod escape;
mod runner;
mod search_path;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub use escape::escape_argument;
pub use runner::{ShellRunner, DEFAULT_MAX_OUTPUT, DEFAULT_TIMEOUT};
pub use search_path::{augmented_search_path, EXTRA_SEARCH_DIRS};

/// Failure modes of an external command.
///
/// Callers react differently to each: a missing binary usually means a
/// missing installation, a timeout means the tool hung, anything else is a
/// plain failure carrying whatever the process reported.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The command did not finish before the deadline and was terminated.
    #[error("Command timed out after {}s", .0.as_secs())]
    TimedOut(Duration),

    /// The shell or the requested executable could not be found.
    #[error("Command not found: {0}")]
    NotFound(String),

    /// Non-zero exit, oversized output or an I/O failure.
    #[error("Command failed: {0}")]
    Failed(String),
}

/// Seam over command execution so providers can be driven by a scripted
/// executor in tests.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run a command line with the executor's default timeout and return
    /// its trimmed standard output.
    async fn execute(&self, command_line: &str) -> Result<String, CommandError>;

    /// Run a command line with an explicit timeout.
    ///
    /// Meant for user-initiated operations that are expected to be slow.
    async fn execute_with_timeout(
        &self,
        command_line: &str,
        timeout: Duration,
    ) -> Result<String, CommandError> {
        let _ = timeout;
        self.execute(command_line).await
    }

    /// Best-effort check whether `name` resolves to an executable.
    ///
    /// Never fails; any error counts as "not found".
    async fn command_exists(&self, name: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CommandError::TimedOut(Duration::from_secs(30)).to_string(),
            "Command timed out after 30s"
        );
        assert_eq!(
            CommandError::Failed("exit status 1".into()).to_string(),
            "Command failed: exit status 1"
        );
    }

    #[test]
    fn test_not_found_mentions_command_not_found() {
        // dash reports "sh: 1: ollama: not found" without the word "command"
        let err = CommandError::NotFound("sh: 1: ollama: not found".into());
        assert!(err.to_string().to_lowercase().contains("command not found"));
    }
}
