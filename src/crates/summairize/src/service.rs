//! Summarization orchestration
//!
//! [`SummaryService`] owns the provider registry, prepares note content,
//! picks the configured provider and folds every failure into a
//! [`SummaryResult`]. Nothing raised below it escapes
//! [`SummaryService::generate_summary`].
//!
//! # Example
//!
//! ```rust,ignore
//! use summairize::{SummairizeConfig, SummaryService};
//!
//! let service = SummaryService::from_config(SummairizeConfig::default())?;
//! match service.generate_summary(&note).await {
//!     SummaryResult::Success { summary } => println!("{}", summary),
//!     SummaryResult::Failure { reason, .. } => eprintln!("{}", reason),
//! }
//! ```

use crate::config::{ProviderKind, SummairizeConfig};
use crate::content::{ContentPreparer, NoteContent, Validation};
use crate::error::{Result, SummairizeError};
use llm::local::OllamaProvider;
use llm::{LlmError, SummaryOptions, SummaryProvider};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tooling::logging::timed;
use tracing::{debug, info, warn};

/// Availability of every registered provider, keyed by registry name.
pub type ProviderStatus = BTreeMap<String, bool>;

/// Category of a summarization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Input rejected before reaching a provider
    Validation,
    /// Configured provider is not registered
    Configuration,
    /// Provider unreachable by any channel
    Unavailable,
    /// Requested model is not installed
    ModelMissing,
    /// Daemon is not running
    DaemonDown,
    /// Command-line client is not installed
    ClientMissing,
    Timeout,
    /// Anything unclassified
    Provider,
}

impl FailureKind {
    fn from_error(err: &LlmError) -> Self {
        match err {
            LlmError::ModelNotFound { .. } => FailureKind::ModelMissing,
            LlmError::DaemonNotRunning => FailureKind::DaemonDown,
            LlmError::ClientNotInstalled => FailureKind::ClientMissing,
            err if err.is_timeout() => FailureKind::Timeout,
            _ => FailureKind::Provider,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Validation => "validation",
            FailureKind::Configuration => "configuration",
            FailureKind::Unavailable => "unavailable",
            FailureKind::ModelMissing => "model_missing",
            FailureKind::DaemonDown => "daemon_down",
            FailureKind::ClientMissing => "client_missing",
            FailureKind::Timeout => "timeout",
            FailureKind::Provider => "provider",
        };
        f.write_str(name)
    }
}

/// Outcome of a summarization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryResult {
    /// Non-empty, trimmed summary text
    Success { summary: String },
    /// A single human-readable sentence, remediation hint included
    Failure { kind: FailureKind, reason: String },
}

impl SummaryResult {
    fn failure(kind: FailureKind, reason: impl Into<String>) -> Self {
        SummaryResult::Failure {
            kind,
            reason: reason.into(),
        }
    }

    fn from_error(err: &LlmError) -> Self {
        Self::failure(FailureKind::from_error(err), err.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SummaryResult::Success { .. })
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            SummaryResult::Success { summary } => Some(summary),
            SummaryResult::Failure { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            SummaryResult::Success { .. } => None,
            SummaryResult::Failure { reason, .. } => Some(reason),
        }
    }
}

/// Orchestrates providers for note summarization.
pub struct SummaryService {
    providers: BTreeMap<String, Arc<dyn SummaryProvider>>,
    ollama: Option<Arc<OllamaProvider>>,
    content: Arc<dyn ContentPreparer>,
    config: RwLock<SummairizeConfig>,
}

impl SummaryService {
    pub fn builder(config: SummairizeConfig) -> SummaryServiceBuilder {
        SummaryServiceBuilder::new(config)
    }

    /// Service with the Ollama provider built from `config`.
    pub fn from_config(config: SummairizeConfig) -> Result<Self> {
        let ollama = OllamaProvider::new(config.ollama.to_provider_config())?;
        Ok(Self::builder(config).ollama(Arc::new(ollama)).build())
    }

    /// Summarize raw note content.
    pub async fn generate_summary(&self, raw_content: &str) -> SummaryResult {
        let config = self.config.read().clone();

        if let Validation::Invalid(reason) = self.content.validate(raw_content) {
            debug!(reason = %reason, "Content rejected");
            return SummaryResult::failure(FailureKind::Validation, reason);
        }

        let name = config.provider.as_str();
        let Some(provider) = self.providers.get(name) else {
            return SummaryResult::failure(
                FailureKind::Configuration,
                format!("AI provider '{}' not found", name),
            );
        };

        match provider.is_available().await {
            Ok(true) => {}
            Ok(false) => {
                return SummaryResult::failure(
                    FailureKind::Unavailable,
                    format!(
                        "{} is not available. Please check your installation and configuration.",
                        provider.display_name()
                    ),
                )
            }
            Err(e) => return SummaryResult::from_error(&e),
        }

        let prepared = self
            .content
            .truncate_for_ai(&self.content.extract_for_summary(raw_content));

        let mut options = SummaryOptions::new(config.summary.length);
        if config.provider == ProviderKind::Ollama {
            options = options.with_model(config.ollama.model.clone());
        }

        info!(provider = %name, chars = prepared.len(), length = options.length, "Generating summary");

        match timed("summary.generate", provider.generate(&prepared, &options)).await {
            Ok(summary) => {
                let summary = summary.trim();
                if summary.is_empty() {
                    warn!(provider = %name, "Provider returned an empty summary");
                    SummaryResult::failure(FailureKind::Provider, "Generated summary is empty")
                } else {
                    SummaryResult::Success {
                        summary: summary.to_string(),
                    }
                }
            }
            Err(e) => {
                warn!(provider = %name, error = %e, "Summary generation failed");
                SummaryResult::from_error(&e)
            }
        }
    }

    /// Check every registered provider; a failing check counts as unavailable.
    pub async fn provider_status(&self) -> ProviderStatus {
        let mut status = ProviderStatus::new();

        for (name, provider) in &self.providers {
            let available = match provider.is_available().await {
                Ok(available) => available,
                Err(e) => {
                    warn!(provider = %name, error = %e, "Availability check failed");
                    false
                }
            };
            status.insert(name.clone(), available);
        }

        status
    }

    /// Registered provider names, sorted.
    pub fn available_providers(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Current configuration snapshot.
    pub fn configuration(&self) -> SummairizeConfig {
        self.config.read().clone()
    }

    /// Replace the configuration and push the model into the local provider.
    pub fn update_configuration(&self, config: SummairizeConfig) {
        if let Some(ollama) = &self.ollama {
            ollama.set_default_model(config.ollama.model.clone());
        }
        *self.config.write() = config;
    }

    /// Installed local models; empty when they cannot be listed.
    pub async fn list_models(&self) -> Vec<String> {
        let Some(ollama) = &self.ollama else {
            return Vec::new();
        };

        match ollama.list_models().await {
            Ok(models) => models,
            Err(e) => {
                warn!(error = %e, "Failed to list Ollama models");
                Vec::new()
            }
        }
    }

    /// Fetch a local model.
    pub async fn pull_model(&self, name: &str) -> Result<()> {
        let ollama = self
            .ollama
            .as_ref()
            .ok_or_else(|| SummairizeError::ProviderNotAvailable("Ollama".to_string()))?;
        ollama.pull_model(name).await?;
        Ok(())
    }
}

/// Assembles a [`SummaryService`]. The registry is fixed once built.
pub struct SummaryServiceBuilder {
    config: SummairizeConfig,
    providers: BTreeMap<String, Arc<dyn SummaryProvider>>,
    ollama: Option<Arc<OllamaProvider>>,
    content: Option<Arc<dyn ContentPreparer>>,
}

impl SummaryServiceBuilder {
    fn new(config: SummairizeConfig) -> Self {
        Self {
            config,
            providers: BTreeMap::new(),
            ollama: None,
            content: None,
        }
    }

    /// Register a provider under `name`, replacing any earlier one.
    pub fn provider(mut self, name: impl Into<String>, provider: Arc<dyn SummaryProvider>) -> Self {
        self.providers.insert(name.into(), provider);
        self
    }

    /// Register the Ollama provider; it also backs model management.
    pub fn ollama(mut self, provider: Arc<OllamaProvider>) -> Self {
        self.providers.insert(
            ProviderKind::Ollama.as_str().to_string(),
            provider.clone() as Arc<dyn SummaryProvider>,
        );
        self.ollama = Some(provider);
        self
    }

    pub fn content_preparer(mut self, content: Arc<dyn ContentPreparer>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn build(self) -> SummaryService {
        SummaryService {
            providers: self.providers,
            ollama: self.ollama,
            content: self
                .content
                .unwrap_or_else(|| Arc::new(NoteContent::new())),
            config: RwLock::new(self.config),
        }
    }
}
