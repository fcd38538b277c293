//! Application settings and configuration

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trading_common::error::ConfigurationError;
use trading_common::validation::{OrderValidator, SymbolValidatorConfig, DEFAULT_MAX_QUANTITY};
use trading_common::venue::RestConfig;

/// Environment prefix for overrides, e.g. `TRADING_BOT__EXCHANGE__BASE_URL`
pub const ENV_PREFIX: &str = "TRADING_BOT";

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Futures REST connection
    #[serde(default)]
    pub exchange: RestConfig,
    /// Local order checks
    #[serde(default)]
    pub validation: ValidationSettings,
}

/// Limits applied before an order leaves the machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Upper bound on order quantity
    #[serde(default = "default_max_quantity")]
    pub max_quantity: Decimal,
    /// Longest accepted symbol
    #[serde(default = "default_symbol_max_length")]
    pub symbol_max_length: usize,
}

fn default_max_quantity() -> Decimal {
    DEFAULT_MAX_QUANTITY
}

fn default_symbol_max_length() -> usize {
    20
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            max_quantity: default_max_quantity(),
            symbol_max_length: default_symbol_max_length(),
        }
    }
}

impl ValidationSettings {
    /// Build the order validator these limits describe.
    pub fn validator(&self) -> OrderValidator {
        OrderValidator::new()
            .with_symbol_config(
                SymbolValidatorConfig::default().with_max_length(self.symbol_max_length),
            )
            .with_max_quantity(self.max_quantity)
    }
}

impl Settings {
    /// Load settings from configuration files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_dir(), ENV_PREFIX)
    }

    /// Load from an explicit directory and environment prefix
    pub fn load_from(config_dir: &str, env_prefix: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            // Start with default configuration
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Add local overrides (not checked into git)
            .add_source(File::with_name(&format!("{}/local", config_dir)).required(false))
            // Add environment variables (e.g., TRADING_BOT__EXCHANGE__TIMEOUT_MS)
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    /// Get the configuration directory path
    fn config_dir() -> String {
        std::env::var("TRADING_BOT_CONFIG_DIR").unwrap_or_else(|_| "config".into())
    }

    /// Reject values the bot cannot run with.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.exchange.validate()?;

        if self.validation.max_quantity <= Decimal::ZERO {
            return Err(ConfigurationError::InvalidValue {
                field: "validation.max_quantity".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.validation.symbol_max_length == 0 {
            return Err(ConfigurationError::InvalidValue {
                field: "validation.symbol_max_length".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
