//! Async utilities for common async patterns
//!
//! # Example
//!
//! ```rust,ignore
//! use tooling::async_utils::timeout::with_timeout;
//! use std::time::Duration;
//!
//! async fn call_with_timeout() -> Result<String, String> {
//!     with_timeout(Duration::from_secs(30), async { Ok("done".to_string()) })
//!         .await
//!         .map_err(|e| e.to_string())
//! }
//! ```

pub mod timeout;
