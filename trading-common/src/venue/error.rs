//! Venue error types with error classification for retry logic.
//!
//! Every failure after a request leaves the process lands here: no reply at
//! all (`Transport`), a structured rejection (`Api`), an unstructured non-2xx
//! reply (`Http`), or a 2xx reply that does not decode (`Parse`).

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::error::{ErrorCategory, ErrorClassification};

/// Result type for venue operations.
pub type VenueResult<T> = Result<T, VenueError>;

/// Why no response was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// DNS, connect, TLS or connection reset
    Network,
    /// Request exceeded the configured timeout
    Timeout,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Network => write!(f, "network"),
            TransportKind::Timeout => write!(f, "timeout"),
        }
    }
}

/// Errors that can occur while talking to the exchange.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum VenueError {
    /// No response was received
    #[error("Transport error ({kind}): {message}")]
    Transport { kind: TransportKind, message: String },

    /// Exchange rejected the request with a structured `{code, msg}` body
    #[error("API error [{code}]: {message}")]
    Api { code: i64, message: String },

    /// Non-2xx reply without a structured error body
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Client could not be built from its settings
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ErrorClassification for VenueError {
    fn category(&self) -> ErrorCategory {
        match self {
            VenueError::Transport { .. } => ErrorCategory::Transient,
            VenueError::Api { code, .. } => {
                // Binance error code ranges
                match code {
                    -1003 | -1015 => ErrorCategory::ResourceExhausted,
                    -1001 | -1007 | -1021 => ErrorCategory::Transient,
                    -2014 | -2015 | -1022 => ErrorCategory::Configuration,
                    -1099..=-1000 => ErrorCategory::Internal,
                    _ => ErrorCategory::Permanent,
                }
            }
            VenueError::Http { status, .. } => match status {
                429 | 418 => ErrorCategory::ResourceExhausted,
                500..=599 => ErrorCategory::Transient,
                _ => ErrorCategory::Permanent,
            },
            VenueError::Parse(_) => ErrorCategory::Permanent,
            VenueError::Configuration(_) => ErrorCategory::Configuration,
        }
    }

    fn suggested_retry_delay(&self) -> Option<Duration> {
        match self {
            VenueError::Transport {
                kind: TransportKind::Network,
                ..
            } => Some(Duration::from_secs(1)),
            VenueError::Transport {
                kind: TransportKind::Timeout,
                ..
            } => Some(Duration::from_millis(500)),
            VenueError::Api { code, .. } => match code {
                -1003 | -1015 => Some(Duration::from_secs(60)),
                -1001 | -1007 | -1021 => Some(Duration::from_millis(500)),
                _ => None,
            },
            VenueError::Http { status, .. } if *status >= 500 => Some(Duration::from_secs(1)),
            _ => None,
        }
    }
}

impl VenueError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Transport {
            kind: TransportKind::Network,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Transport {
            kind: TransportKind::Timeout,
            message: message.into(),
        }
    }

    pub fn api(code: i64, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// Returns true when no response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, VenueError::Transport { .. })
    }

    /// Returns the exchange error code if available.
    pub fn error_code(&self) -> Option<i64> {
        match self {
            VenueError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for VenueError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            VenueError::timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            VenueError::network(err.to_string())
        } else if err.is_decode() {
            VenueError::Parse(err.to_string())
        } else if err.is_builder() {
            VenueError::Configuration(err.to_string())
        } else {
            VenueError::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for VenueError {
    fn from(err: serde_json::Error) -> Self {
        VenueError::Parse(err.to_string())
    }
}
