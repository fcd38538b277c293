//! Logging configuration and initialization.

use std::env;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};
use tracing::{info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use super::json_layer::JsonLayer;
use crate::error::ConfigurationError;

/// Crates whose records go to the session file at the configured level.
const APP_TARGETS: &[&str] = &["trading_bot", "trading_common"];

/// Session file output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One human-readable line per record (default)
    #[default]
    Text,
    /// One JSON object per record
    Json,
}

impl LogFormat {
    /// Parse format from string
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Parse a level name. Accepts `WARNING` as an alias of `WARN`.
pub fn parse_level(s: &str) -> Result<Level, ConfigurationError> {
    match s.trim().to_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" => Ok(Level::ERROR),
        other => Err(ConfigurationError::InvalidValue {
            field: "log_level".to_string(),
            reason: format!("unknown level '{}', expected DEBUG, INFO, WARNING or ERROR", other),
        }),
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Session file format (text, json)
    pub format: LogFormat,
    /// Level for the session file
    pub level: Level,
    /// Minimum level echoed to stderr
    pub console_level: Level,
    /// Directory holding session files
    pub log_dir: PathBuf,
    /// Include source file location
    pub include_location: bool,
    /// Application name for JSON logs
    pub app_name: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            level: Level::INFO,
            console_level: Level::WARN,
            log_dir: PathBuf::from("logs"),
            include_location: false,
            app_name: None,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `LOG_FORMAT`: text or json
    /// - `LOG_LEVEL`: file level (DEBUG, INFO, WARNING, ERROR)
    /// - `LOG_DIR`: directory for session files
    /// - `LOG_LOCATION`: true/false for file:line info
    /// - `LOG_APP_NAME`: application name for JSON logs
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_env_with_level(None)
    }

    /// Like [`LogConfig::from_env`], but an explicit `level` replaces
    /// `LOG_LEVEL`, which is then not read at all.
    pub fn from_env_with_level(level: Option<Level>) -> Result<Self, ConfigurationError> {
        let defaults = Self::default();
        let level = match (level, env::var("LOG_LEVEL")) {
            (Some(level), _) => level,
            (None, Ok(s)) if !s.trim().is_empty() => parse_level(&s)?,
            (None, _) => defaults.level,
        };
        Ok(Self {
            format: env::var("LOG_FORMAT")
                .map(|s| LogFormat::from_str(&s))
                .unwrap_or_default(),
            level,
            log_dir: env::var("LOG_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            include_location: env::var("LOG_LOCATION")
                .map(|s| s == "true" || s == "1")
                .unwrap_or(false),
            app_name: env::var("LOG_APP_NAME").ok(),
            ..defaults
        })
    }

    /// Set the file log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the application name
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Filter directive: app crates at `level`, dependencies at WARN.
    fn filter_directive(&self) -> String {
        let level = self.level.as_str().to_lowercase();
        let mut directive = String::from("warn");
        for target in APP_TARGETS {
            directive.push_str(&format!(",{}={}", target, level));
        }
        directive
    }
}

/// The log file opened for this process.
#[derive(Debug, Clone)]
pub struct SessionLog {
    pub path: PathBuf,
    pub level: Level,
    pub started_at: DateTime<Local>,
}

/// `<dir>/trading_bot_<YYYYmmdd_HHMMSS>_<pid>.log`
pub fn session_log_path(dir: &Path, started_at: &DateTime<Local>, pid: u32) -> PathBuf {
    dir.join(format!(
        "trading_bot_{}_{}.log",
        started_at.format("%Y%m%d_%H%M%S"),
        pid
    ))
}

/// Initialize logging with the given configuration
///
/// Creates the log directory, opens a fresh session file and installs the
/// global subscriber: file layer at `config.level` (`RUST_LOG` overrides),
/// console layer on stderr at `config.console_level`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the subscriber is
/// already set.
pub fn init_logging(config: LogConfig) -> Result<SessionLog, Box<dyn std::error::Error + Send + Sync>> {
    fs::create_dir_all(&config.log_dir)?;

    let started_at = Local::now();
    let path = session_log_path(&config.log_dir, &started_at, std::process::id());
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    // Build env filter from RUST_LOG or default
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    let (text_layer, json_layer) = match config.format {
        LogFormat::Text => (
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(config.include_location)
                    .with_line_number(config.include_location)
                    .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string())),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(JsonLayer::new(
                Box::new(file),
                config.app_name.clone(),
                config.include_location,
            )),
        ),
    };

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .without_time()
        .with_filter(LevelFilter::from_level(config.console_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(text_layer)
        .with(json_layer)
        .with(console_layer)
        .try_init()?;

    let session = SessionLog {
        path,
        level: config.level,
        started_at,
    };

    info!("{}", "=".repeat(60));
    info!("TRADING BOT SESSION STARTED");
    info!("Log file: {}", session.path.display());
    info!("Log level: {}", session.level);
    info!("{}", "=".repeat(60));

    Ok(session)
}
