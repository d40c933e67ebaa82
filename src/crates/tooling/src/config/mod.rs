//! Configuration helpers
//!
//! Environment variable loading used to layer overrides on top of file-based
//! configuration.
//!
//! # Example
//!
//! ```rust,ignore
//! use tooling::config::{get_env, get_env_parse};
//!
//! let model = get_env("SUMMAIRIZE_MODEL")?;
//! let length: Option<u32> = get_env_parse("SUMMAIRIZE_SUMMARY_LENGTH")?;
//! ```

mod env;

pub use env::{get_env, get_env_parse};
