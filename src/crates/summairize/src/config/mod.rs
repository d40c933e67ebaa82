//! Configuration management
//!
//! Layered TOML configuration: defaults, then the user file, then the
//! project file, then `SUMMAIRIZE_*` environment variables.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{
    EnvOverrides, FilterConfig, LoggingConfig, OllamaConfig, ProviderKind, SummairizeConfig,
    SummaryConfig,
};
