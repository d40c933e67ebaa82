//! Ollama provider implementation.
//!
//! Ollama is reachable through two independent channels:
//!
//! - **HTTP API** (`/api/generate`, `/api/tags`) - preferred, no terminal
//!   involved
//! - **`ollama` CLI** - present on every install, but `ollama run` misbehaves
//!   without a TTY unless the prompt is piped in on stdin
//!
//! Generation tries HTTP first and falls back to the CLI. Only when both
//! fail is the CLI failure classified into a user-facing error.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::config::LocalLlmConfig;
//! use llm::local::OllamaProvider;
//! use llm::{SummaryOptions, SummaryProvider};
//!
//! let provider = OllamaProvider::new(LocalLlmConfig::new("http://localhost:11434", "gemma3:4b"))?;
//! let summary = provider.generate(&note, &SummaryOptions::new(200)).await?;
//! ```

use crate::config::LocalLlmConfig;
use crate::error::{LlmError, Result};
use crate::provider::{clean_summary, format_prompt, SummaryOptions, SummaryProvider};
use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tooling::shell::{escape_argument, CommandError, CommandExecutor, ShellRunner};
use tracing::{debug, info, warn};

/// Header token of `ollama list` output.
const LIST_HEADER_MARKER: &str = "NAME";

/// Ollama-backed summarization provider.
pub struct OllamaProvider {
    config: LocalLlmConfig,
    client: Client,
    runner: Arc<dyn CommandExecutor>,
    default_model: RwLock<String>,
}

impl OllamaProvider {
    /// Create a provider that falls back to a [`ShellRunner`].
    pub fn new(config: LocalLlmConfig) -> Result<Self> {
        Self::with_runner(config, Arc::new(ShellRunner::new()))
    }

    /// Create a provider with a custom command executor.
    pub fn with_runner(config: LocalLlmConfig, runner: Arc<dyn CommandExecutor>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;
        let default_model = RwLock::new(config.model.clone());

        Ok(Self {
            config,
            client,
            runner,
            default_model,
        })
    }

    /// Provider configuration.
    pub fn config(&self) -> &LocalLlmConfig {
        &self.config
    }

    /// Model used when a call carries no override.
    pub fn default_model(&self) -> String {
        self.default_model.read().clone()
    }

    /// Replace the default model in place. In-flight calls keep the model
    /// they already resolved.
    pub fn set_default_model(&self, model: impl Into<String>) {
        let model = model.into();
        debug!(model = %model, "Updating default Ollama model");
        *self.default_model.write() = model;
    }

    /// List installed models, HTTP first, CLI output as fallback.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        match self.list_models_via_api().await {
            Ok(models) => Ok(models),
            Err(e) => {
                debug!(error = %e, "Listing models over HTTP failed, trying CLI");
                let output = self.runner.execute(&self.client_command("list")).await?;
                Ok(parse_model_list(&output))
            }
        }
    }

    /// Fetch a model with `ollama pull`.
    ///
    /// Failures are returned as-is; fetching is user-initiated and its
    /// errors are already specific.
    pub async fn pull_model(&self, name: &str) -> Result<()> {
        info!(model = %name, "Pulling Ollama model");
        let command = format!("{} {}", self.client_command("pull"), escape_argument(name));
        self.runner
            .execute_with_timeout(&command, self.config.pull_timeout)
            .await?;
        Ok(())
    }

    fn resolve_model(&self, options: &SummaryOptions) -> String {
        options
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.default_model())
    }

    /// `'<client>' <subcommand>`
    fn client_command(&self, subcommand: &str) -> String {
        format!("{} {}", escape_argument(&self.config.client), subcommand)
    }

    /// Pipe the prompt into `ollama run` so it never waits on a terminal.
    fn cli_generate_command(&self, model: &str, prompt: &str) -> String {
        format!(
            "printf '%s' {} | {} {}",
            escape_argument(prompt),
            self.client_command("run"),
            escape_argument(model)
        )
    }

    async fn generate_via_api(&self, model: &str, prompt: &str) -> Result<String> {
        let url = self.config.endpoint("/api/generate");
        let req_body = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        let response = self.client.post(&url).json(&req_body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::ProviderError(format!(
                "Ollama API error {}: {}",
                status, error_text
            )));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        if let Some(error) = generated.error {
            return Err(LlmError::ProviderError(error));
        }
        Ok(generated.response)
    }

    async fn generate_via_cli(&self, model: &str, prompt: &str) -> std::result::Result<String, CommandError> {
        self.runner
            .execute(&self.cli_generate_command(model, prompt))
            .await
    }

    async fn list_models_via_api(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.config.endpoint("/api/tags"))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LlmError::ProviderError(format!(
                "Failed to fetch models from Ollama: {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn api_reachable(&self) -> bool {
        match self.client.get(self.config.endpoint("/api/tags")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Ollama HTTP API unreachable");
                false
            }
        }
    }
}

#[async_trait]
impl SummaryProvider for OllamaProvider {
    async fn generate(&self, content: &str, options: &SummaryOptions) -> Result<String> {
        let model = self.resolve_model(options);
        let prompt = format_prompt(content, options.length);

        match self.generate_via_api(&model, &prompt).await {
            Ok(text) => return Ok(clean_summary(&text)),
            Err(e) => {
                warn!(model = %model, error = %e, "Ollama HTTP generation failed, falling back to CLI")
            }
        }

        match self.generate_via_cli(&model, &prompt).await {
            Ok(text) => Ok(clean_summary(&text)),
            Err(e) => {
                warn!(model = %model, error = %e, "Ollama CLI generation failed");
                Err(LlmError::from_cli_failure(&model, &e))
            }
        }
    }

    async fn is_available(&self) -> Result<bool> {
        if self.api_reachable().await {
            return Ok(true);
        }

        if !self.runner.command_exists(&self.config.client).await {
            debug!(client = %self.config.client, "Ollama client not found");
            return Ok(false);
        }

        if let Err(e) = self.runner.execute(&self.client_command("--version")).await {
            debug!(error = %e, "Ollama version probe failed");
            return Ok(false);
        }

        match self.runner.execute(&self.client_command("list")).await {
            Ok(_) => return Ok(true),
            Err(e) => debug!(error = %e, "Ollama list probe failed"),
        }

        match self.runner.execute(&self.client_command("ps")).await {
            Ok(_) => Ok(true),
            Err(e) => {
                debug!(error = %e, "Ollama ps probe failed");
                Ok(false)
            }
        }
    }

    fn display_name(&self) -> &str {
        "Ollama"
    }
}

/// Model names from `ollama list` output: header skipped, first column of
/// each non-blank row.
fn parse_model_list(output: &str) -> Vec<String> {
    output
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| line.split_whitespace().next())
        .filter(|name| *name != LIST_HEADER_MARKER)
        .map(str::to_string)
        .collect()
}

// Ollama API types
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}
