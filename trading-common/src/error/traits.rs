//! Error classification traits for retry decisions.
//!
//! Errors self-describe whether another attempt could succeed. Only
//! read-only calls are ever retried; order placement and cancellation get
//! exactly one attempt regardless of classification.

use std::time::Duration;

use tracing::warn;

use super::common::*;

/// Classification of error types for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transient errors that may resolve on retry (network issues, timeouts)
    Transient,
    /// Permanent errors that won't resolve on retry (invalid input, rejected order)
    Permanent,
    /// Resource exhaustion errors (rate limits)
    ResourceExhausted,
    /// Configuration errors (missing credentials, invalid settings)
    Configuration,
    /// Internal errors (bugs, unexpected state)
    Internal,
}

/// Trait for errors that can classify themselves for retry logic.
///
/// # Example
///
/// ```rust,ignore
/// use trading_common::error::retry_with_backoff;
/// use std::time::Duration;
///
/// let pong = retry_with_backoff(|| client.ping(), 3, Duration::from_millis(200)).await?;
/// ```
pub trait ErrorClassification {
    /// Returns the category of this error
    fn category(&self) -> ErrorCategory;

    /// Returns true if this error is transient and may succeed on retry
    fn is_transient(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Transient | ErrorCategory::ResourceExhausted
        )
    }

    /// Returns true if this error is permanent and won't succeed on retry
    fn is_permanent(&self) -> bool {
        matches!(self.category(), ErrorCategory::Permanent)
    }

    /// Suggests a delay before retrying, if applicable
    fn suggested_retry_delay(&self) -> Option<Duration> {
        match self.category() {
            ErrorCategory::Transient => Some(Duration::from_millis(100)),
            ErrorCategory::ResourceExhausted => Some(Duration::from_secs(1)),
            _ => None,
        }
    }

    /// Returns the maximum number of retries suggested for this error
    fn max_retries(&self) -> u32 {
        match self.category() {
            ErrorCategory::Transient => 3,
            ErrorCategory::ResourceExhausted => 5,
            _ => 0,
        }
    }
}

impl ErrorClassification for ConfigurationError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }

    fn suggested_retry_delay(&self) -> Option<Duration> {
        None
    }

    fn max_retries(&self) -> u32 {
        0
    }
}

impl ErrorClassification for ValidationError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::Permanent
    }
}

/// Retry an idempotent operation while its error stays transient.
///
/// Must not wrap state-mutating calls such as order placement.
pub async fn retry_with_backoff<T, E, F, Fut>(
    mut operation: F,
    max_attempts: u32,
    initial_delay: Duration,
) -> Result<T, E>
where
    E: ErrorClassification + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let mut attempts = 0;
    let mut delay = initial_delay;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempts += 1;

                if !err.is_transient() || attempts >= max_attempts {
                    return Err(err);
                }

                let retry_delay = err.suggested_retry_delay().unwrap_or(delay).max(delay);
                warn!(
                    "Attempt {}/{} failed: {}. Retrying in {:?}",
                    attempts, max_attempts, err, retry_delay
                );
                tokio::time::sleep(retry_delay).await;

                // Exponential backoff with cap
                delay = std::cmp::min(delay * 2, Duration::from_secs(30));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug)]
    enum FakeError {
        Flaky,
        Fatal,
    }

    impl std::fmt::Display for FakeError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    impl ErrorClassification for FakeError {
        fn category(&self) -> ErrorCategory {
            match self {
                FakeError::Flaky => ErrorCategory::Transient,
                FakeError::Fatal => ErrorCategory::Permanent,
            }
        }

        fn suggested_retry_delay(&self) -> Option<Duration> {
            Some(Duration::from_millis(1))
        }
    }

    #[test]
    fn test_validation_error_classification() {
        let err = ValidationError::required(OrderField::Price);
        assert!(err.is_permanent());
        assert_eq!(err.max_retries(), 0);
    }

    #[test]
    fn test_configuration_error_classification() {
        let err = ConfigurationError::MissingCredentials {
            key_var: "BINANCE_API_KEY",
            secret_var: "BINANCE_API_SECRET",
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(!err.is_transient());
        assert!(err.suggested_retry_delay().is_none());
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_error() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<u32, FakeError> = retry_with_backoff(
            move || async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(FakeError::Flaky)
                } else {
                    Ok(n)
                }
            },
            5,
            Duration::from_millis(1),
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_stops_on_permanent_error() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<(), FakeError> = retry_with_backoff(
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(FakeError::Fatal)
            },
            5,
            Duration::from_millis(1),
        )
        .await;

        assert!(matches!(result, Err(FakeError::Fatal)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_respects_max_attempts() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<(), FakeError> = retry_with_backoff(
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(FakeError::Flaky)
            },
            2,
            Duration::from_millis(1),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
