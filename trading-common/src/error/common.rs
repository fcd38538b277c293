//! Common error types shared across crates.
//!
//! These represent failures detected locally, before any request leaves the
//! process. Venue failures live in [`crate::venue::VenueError`].

use std::fmt;

use thiserror::Error;

/// Configuration-related errors.
///
/// Use this for credential loading, settings parsing, and validation.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// Field has invalid value
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// Settings source could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// API credentials are absent from the environment
    #[error(
        "API credentials not found. Please set {key_var} and {secret_var} environment variables"
    )]
    MissingCredentials {
        key_var: &'static str,
        secret_var: &'static str,
    },
}

/// Order field a validation rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    Symbol,
    Side,
    OrderType,
    Quantity,
    Price,
}

impl OrderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::Symbol => "symbol",
            OrderField::Side => "side",
            OrderField::OrderType => "type",
            OrderField::Quantity => "quantity",
            OrderField::Price => "price",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order input rejected before signing.
///
/// Carries the offending field and a human readable reason. Never reaches
/// the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: OrderField,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: OrderField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// Create a Required validation error
    pub fn required(field: OrderField) -> Self {
        Self::new(field, format!("{} is required", field))
    }

    /// Create an invalid format validation error
    pub fn invalid_format(field: OrderField, value: &str) -> Self {
        Self::new(field, format!("invalid {} format: '{}'", field, value))
    }

    /// Create an out of range validation error
    pub fn out_of_range(field: OrderField, value: impl ToString, max: impl ToString) -> Self {
        Self::new(
            field,
            format!(
                "{} {} exceeds maximum of {}",
                field,
                value.to_string(),
                max.to_string()
            ),
        )
    }
}
