//! Top-level error for a bot invocation.

use thiserror::Error;
use trading_common::error::{ConfigurationError, ValidationError};
use trading_common::venue::VenueError;

/// Exit code for a run stopped by Ctrl+C
pub const EXIT_INTERRUPTED: i32 = 130;

/// Everything that can end a run early.
#[derive(Debug, Error)]
pub enum BotError {
    /// Bad order input, caught before any request
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Missing credentials or unusable settings
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Exchange rejected the request or no response arrived
    #[error(transparent)]
    Venue(#[from] VenueError),

    #[error("Operation cancelled by user")]
    Interrupted,

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<config::ConfigError> for BotError {
    fn from(err: config::ConfigError) -> Self {
        BotError::Configuration(ConfigurationError::Parse(err.to_string()))
    }
}

impl BotError {
    /// Error class as it appears in the session log.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BotError::Validation(_) => "ValidationError",
            BotError::Configuration(_) => "ConfigurationError",
            BotError::Venue(e) if e.is_transport() => "TransportError",
            BotError::Venue(_) => "ApiError",
            BotError::Interrupted => "Interrupted",
            BotError::Unexpected(_) => "UnexpectedError",
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            BotError::Interrupted => EXIT_INTERRUPTED,
            _ => 1,
        }
    }

    /// One line for the terminal.
    pub fn console_line(&self) -> String {
        match self {
            BotError::Validation(e) => format!("✗ Validation Error: {}", e),
            BotError::Configuration(e) => format!("✗ Configuration Error: {}", e),
            BotError::Venue(e) if e.is_transport() => format!("✗ Network Error: {}", e),
            BotError::Venue(e) => format!("✗ API Error: {}", e),
            BotError::Interrupted => "⚠ Operation cancelled by user".to_string(),
            BotError::Unexpected(e) => format!("✗ Unexpected Error: {}", e),
        }
    }
}
