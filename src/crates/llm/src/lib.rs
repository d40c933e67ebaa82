//! Summarization providers for summairize.
//!
//! This crate defines the [`SummaryProvider`] contract every backend
//! implements, the shared prompt/cleanup helpers, and the concrete local
//! provider for Ollama.
//!
//! # Local Providers
//!
//! - **Ollama** - reached over its HTTP API first, with the `ollama`
//!   command-line client as a fallback channel
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use llm::config::LocalLlmConfig;
//! use llm::local::OllamaProvider;
//! use llm::{SummaryOptions, SummaryProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LocalLlmConfig::new("http://localhost:11434", "gemma3:4b");
//!     let provider = OllamaProvider::new(config)?;
//!
//!     if provider.is_available().await? {
//!         let summary = provider
//!             .generate("Long meeting notes...", &SummaryOptions::new(120))
//!             .await?;
//!         println!("{}", summary);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod provider;

#[cfg(feature = "local")]
pub mod local;

// Re-export commonly used types
pub use config::LocalLlmConfig;
pub use error::{LlmError, Result};
pub use provider::{clean_summary, format_prompt, SummaryOptions, SummaryProvider};
