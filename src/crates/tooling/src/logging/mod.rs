//! Logging utilities
//!
//! Subscriber setup for binaries and a timing helper for slow async calls.

use std::time::{Duration, Instant};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{Result, ToolingError};

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_level` when set.
///
/// # Example
///
/// ```rust,ignore
/// tooling::logging::init_logging("info")?;
/// ```
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| ToolingError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ToolingError::Logging(e.to_string()))
}

/// Log execution time of a future at debug level
///
/// # Example
///
/// ```rust,ignore
/// use tooling::logging::timed;
///
/// let summary = timed("ollama.generate", provider.generate(&text, &options)).await;
/// ```
pub async fn timed<F, T>(name: &str, future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let start = Instant::now();
    debug!("Starting: {}", name);

    let result = future.await;

    let elapsed = start.elapsed();
    debug!(elapsed = %format_duration(elapsed), "Completed: {}", name);

    result
}

/// Format duration in human-readable form
///
/// ```rust
/// use tooling::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
