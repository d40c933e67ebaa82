//! Local LLM provider implementations.
//!
//! Providers for model servers running on the same machine. They need no
//! API keys and keep document content on the host.
//!
//! # Providers
//!
//! - **Ollama** - HTTP API with a command-line fallback

pub mod ollama;

pub use ollama::OllamaProvider;
