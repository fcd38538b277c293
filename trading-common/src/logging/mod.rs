//! Session logging for the order bot.
//!
//! Every run writes its own file under the log directory, one record per
//! line, either human-readable or JSON. Warnings and errors are echoed to
//! stderr.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Standard tracing filter, overrides the computed directive
//! - `LOG_LEVEL`: File level - `DEBUG`, `INFO` (default), `WARNING`, `ERROR`
//! - `LOG_FORMAT`: File format - `text` (default) or `json`
//! - `LOG_DIR`: Directory for session files (default `logs`)
//!
//! # Usage
//!
//! ```rust,ignore
//! use trading_common::logging::{init_logging, LogConfig};
//!
//! let session = init_logging(LogConfig::from_env()?.with_level(level))?;
//! println!("Logging to: {}", session.path.display());
//! ```

mod config;
mod json_layer;

pub use config::{
    init_logging, parse_level, session_log_path, LogConfig, LogFormat, SessionLog,
};
pub use json_layer::{JsonLayer, JsonLogEvent};
