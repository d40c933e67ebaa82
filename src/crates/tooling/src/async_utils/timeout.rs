//! Timeout utilities for async operations
//!
//! Wraps a fallible future with a deadline and keeps the two failure modes
//! (deadline elapsed vs. operation error) apart, so callers can clean up
//! differently after a timeout.

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout as tokio_timeout;

/// Execute an async operation with a timeout
///
/// The operation future is dropped when the deadline elapses. Anything it
/// borrowed mutably is released by the time this returns, which lets the
/// caller terminate resources the operation was driving.
///
/// # Example
///
/// ```rust,ignore
/// use tooling::async_utils::timeout::{with_timeout, TimeoutError};
/// use std::time::Duration;
///
/// match with_timeout(Duration::from_secs(1), read_output(&mut child)).await {
///     Ok(output) => println!("{output}"),
///     Err(TimeoutError::Timeout(limit)) => child.kill().await?,
///     Err(TimeoutError::OperationFailed(e)) => return Err(e),
/// }
/// ```
pub async fn with_timeout<F, T, E>(
    duration: Duration,
    operation: F,
) -> std::result::Result<T, TimeoutError<E>>
where
    F: Future<Output = std::result::Result<T, E>>,
{
    match tokio_timeout(duration, operation).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(error)) => Err(TimeoutError::OperationFailed(error)),
        Err(_elapsed) => Err(TimeoutError::Timeout(duration)),
    }
}

/// Error type for timeout operations
#[derive(Debug)]
pub enum TimeoutError<E> {
    /// Operation completed but failed
    OperationFailed(E),
    /// Operation did not finish within the given duration
    Timeout(Duration),
}

impl<E> TimeoutError<E> {
    /// Whether the deadline elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TimeoutError::Timeout(_))
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TimeoutError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeoutError::OperationFailed(e) => write!(f, "Operation failed: {}", e),
            TimeoutError::Timeout(d) => write!(f, "Operation timed out after {:?}", d),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for TimeoutError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimeoutError::OperationFailed(e) => Some(e),
            TimeoutError::Timeout(_) => None,
        }
    }
}
