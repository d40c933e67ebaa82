//! Provider contract and the helpers every provider shares.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Per-call summarization options. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Target summary length in words.
    pub length: u32,

    /// Model to use instead of the provider's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl SummaryOptions {
    /// Options with a target length and no model override.
    pub fn new(length: u32) -> Self {
        Self { length, model: None }
    }

    /// Override the model for this call.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// A backend capable of turning text into a summary.
///
/// Implementations are constructed once and shared for the process lifetime,
/// so every method takes `&self`.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Summarize `content`, returning cleaned summary text.
    async fn generate(&self, content: &str, options: &SummaryOptions) -> Result<String>;

    /// Whether the provider can currently serve requests.
    ///
    /// Recomputed on every call; the backend can come and go between checks.
    async fn is_available(&self) -> Result<bool>;

    /// Human-readable provider name.
    fn display_name(&self) -> &str;
}

/// Build the summarization prompt.
///
/// The content follows the instruction verbatim.
pub fn format_prompt(content: &str, length: u32) -> String {
    format!(
        "Please provide a comprehensive summary of the following text in approximately {} words. \
         Focus on the main ideas, key points, and important details:\n\n{}",
        length, content
    )
}

/// Lead-ins models tend to echo back, in match priority order.
const ECHOED_PREFIXES: &[&str] = &[
    "Here is a summary",
    "Here's a summary",
    "Summary:",
    "The summary is:",
    "Based on the text",
    "The text discusses",
];

/// Trim model output and strip at most one echoed lead-in.
///
/// Matching is case-insensitive; a colon directly after the stripped
/// phrase goes with it.
pub fn clean_summary(raw: &str) -> String {
    let cleaned = raw.trim();

    for prefix in ECHOED_PREFIXES {
        if starts_with_ignore_ascii_case(cleaned, prefix) {
            let rest = cleaned[prefix.len()..].trim_start();
            let rest = rest.strip_prefix(':').unwrap_or(rest);
            return rest.trim().to_string();
        }
    }

    cleaned.to_string()
}

fn starts_with_ignore_ascii_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}
