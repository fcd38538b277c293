//! Symbol validation for exchange tickers.
//!
//! A ticker is a bare run of ASCII letters and digits such as `BTCUSDT`.
//! No separators, no whitespace, no exchange prefix.

use thiserror::Error;

use crate::error::{OrderField, ValidationError};

/// Errors from symbol validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolValidationError {
    #[error("symbol cannot be empty")]
    Empty,

    #[error("symbol '{symbol}' is too short (min {min} characters)")]
    TooShort { symbol: String, min: usize },

    #[error("symbol '{symbol}' exceeds maximum length of {max} characters")]
    TooLong { symbol: String, max: usize },

    /// Anything outside `[A-Za-z0-9]`
    #[error("symbol '{symbol}' contains invalid characters (must be letters and digits only)")]
    InvalidCharacters { symbol: String },

    #[error("symbol '{symbol}' must be uppercase")]
    NotUppercase { symbol: String },
}

impl From<SymbolValidationError> for ValidationError {
    fn from(err: SymbolValidationError) -> Self {
        ValidationError::new(OrderField::Symbol, err.to_string())
    }
}

/// Configuration for symbol validation.
#[derive(Debug, Clone)]
pub struct SymbolValidatorConfig {
    /// Minimum symbol length (default: 1)
    pub min_length: usize,
    /// Maximum symbol length (default: 20)
    pub max_length: usize,
    /// Whether `validate` rejects lowercase input (default: true)
    pub require_uppercase: bool,
}

impl Default for SymbolValidatorConfig {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 20,
            require_uppercase: true,
        }
    }
}

impl SymbolValidatorConfig {
    /// Stricter preset: futures pairs are at least a base plus a quote asset.
    pub fn futures_pair() -> Self {
        Self {
            min_length: 6,
            ..Self::default()
        }
    }

    /// Set minimum length
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = min;
        self
    }

    /// Set maximum length
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        self
    }

    /// Set uppercase requirement
    pub fn with_require_uppercase(mut self, require: bool) -> Self {
        self.require_uppercase = require;
        self
    }
}

/// Symbol validator with configurable length bounds.
///
/// # Example
///
/// ```
/// use trading_common::validation::{SymbolValidator, SymbolValidatorConfig};
///
/// let validator = SymbolValidator::new();
/// assert!(validator.validate("BTCUSDT").is_ok());
/// assert!(validator.validate("btcusdt").is_err()); // Not uppercase
///
/// // User input is trimmed and uppercased first
/// assert_eq!(validator.normalize(" btcusdt ").unwrap(), "BTCUSDT");
///
/// let strict = SymbolValidator::with_config(SymbolValidatorConfig::futures_pair());
/// assert!(strict.validate("BTC").is_err()); // Too short
/// ```
#[derive(Debug, Clone, Default)]
pub struct SymbolValidator {
    config: SymbolValidatorConfig,
}

impl SymbolValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SymbolValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate a symbol exactly as given.
    pub fn validate(&self, symbol: &str) -> Result<(), SymbolValidationError> {
        self.check_shape(symbol)?;

        if self.config.require_uppercase && symbol.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(SymbolValidationError::NotUppercase {
                symbol: symbol.to_string(),
            });
        }

        Ok(())
    }

    /// Trim, uppercase, then validate. Returns the canonical ticker.
    pub fn normalize(&self, symbol: &str) -> Result<String, SymbolValidationError> {
        let normalized = symbol.trim().to_ascii_uppercase();
        self.check_shape(&normalized)?;
        Ok(normalized)
    }

    /// Check if a symbol is valid (convenience method).
    pub fn is_valid(&self, symbol: &str) -> bool {
        self.validate(symbol).is_ok()
    }

    pub fn config(&self) -> &SymbolValidatorConfig {
        &self.config
    }

    fn check_shape(&self, symbol: &str) -> Result<(), SymbolValidationError> {
        if symbol.is_empty() {
            return Err(SymbolValidationError::Empty);
        }

        if !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SymbolValidationError::InvalidCharacters {
                symbol: symbol.to_string(),
            });
        }

        // ASCII only from here, so byte length == char count
        if symbol.len() < self.config.min_length {
            return Err(SymbolValidationError::TooShort {
                symbol: symbol.to_string(),
                min: self.config.min_length,
            });
        }

        if symbol.len() > self.config.max_length {
            return Err(SymbolValidationError::TooLong {
                symbol: symbol.to_string(),
                max: self.config.max_length,
            });
        }

        Ok(())
    }
}
