//! REST connection settings for the futures venue.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::binance::endpoints::FUTURES_TESTNET_URL;
use crate::error::ConfigurationError;

/// REST API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestConfig {
    /// Base URL for the REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Receive window in milliseconds (for timestamp validation)
    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,
    /// Attempts for read-only connectivity checks. Orders always get one.
    #[serde(default = "default_ping_attempts")]
    pub ping_attempts: u32,
    /// Initial delay between connectivity attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_base_url() -> String {
    FUTURES_TESTNET_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_recv_window_ms() -> u64 {
    5_000
}

fn default_ping_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    200
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            recv_window_ms: default_recv_window_ms(),
            ping_attempts: default_ping_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl RestConfig {
    /// Returns the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the retry delay as a Duration.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Reject settings the exchange or HTTP stack cannot work with.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigurationError::InvalidValue {
                field: "base_url".to_string(),
                reason: format!("'{}' is not an http(s) URL", self.base_url),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "timeout_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        // Binance caps recvWindow at 60s
        if self.recv_window_ms == 0 || self.recv_window_ms > 60_000 {
            return Err(ConfigurationError::InvalidValue {
                field: "recv_window_ms".to_string(),
                reason: "must be between 1 and 60000".to_string(),
            });
        }
        if self.ping_attempts == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "ping_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
