//! summairize - note summarization with a locally running language model
//!
//! The [`SummaryService`] validates and prepares note content, selects the
//! configured provider and turns every outcome into a [`SummaryResult`].
//! Providers live in the `llm` crate; the Ollama provider reaches its daemon
//! over HTTP first and through the `ollama` command-line client second.
//!
//! Supporting pieces:
//!
//! - [`config`] - layered TOML configuration with environment overrides
//! - [`content`] - validation, extraction and truncation of note text
//! - [`filter`] - template and daily-note exclusion rules
//! - [`notify`] - user-facing messages

pub mod config;
pub mod content;
pub mod error;
pub mod filter;
pub mod notify;
pub mod service;

pub use config::{ConfigLoader, ProviderKind, SummairizeConfig};
pub use content::{insert_summary, ContentPreparer, NoteContent, Validation};
pub use error::{Result, SummairizeError};
pub use filter::{ExclusionReason, FileFilter};
pub use notify::{ConsoleNotifier, Notifier};
pub use service::{FailureKind, ProviderStatus, SummaryResult, SummaryService, SummaryServiceBuilder};
