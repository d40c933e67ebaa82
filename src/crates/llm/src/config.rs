//! Configuration for local model providers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a locally hosted model-serving daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalLlmConfig {
    /// Base URL of the daemon's HTTP API, e.g. "http://localhost:11434".
    pub base_url: String,

    /// Default model identifier.
    pub model: String,

    /// Name of the daemon's command-line client.
    #[serde(default = "default_client")]
    pub client: String,

    /// Deadline for each HTTP request. Matches the shell channel's
    /// command timeout so both channels give up comparably fast.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// Deadline for fetching a model through the command-line client.
    #[serde(default = "default_pull_timeout")]
    pub pull_timeout: Duration,
}

impl LocalLlmConfig {
    /// Create a new local LLM configuration.
    ///
    /// Trailing slashes on `base_url` are dropped.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: default_client(),
            timeout: default_timeout(),
            pull_timeout: default_pull_timeout(),
        }
    }

    /// Set the command-line client name.
    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    /// Set the HTTP request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the model fetch timeout.
    pub fn with_pull_timeout(mut self, pull_timeout: Duration) -> Self {
        self.pull_timeout = pull_timeout;
        self
    }

    /// Join an API path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn default_client() -> String {
    "ollama".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_pull_timeout() -> Duration {
    Duration::from_secs(30 * 60)
}
