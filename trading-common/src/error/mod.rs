//! Consolidated error handling for the order bot.
//!
//! This module provides:
//! - Local error types (configuration, order validation)
//! - Error classification traits for retry decisions
//!
//! # Usage
//!
//! ```rust,ignore
//! use trading_common::error::ErrorClassification;
//!
//! fn handle_error(err: impl ErrorClassification) {
//!     if err.is_transient() {
//!         if let Some(delay) = err.suggested_retry_delay() {
//!             // Retry read-only calls after delay
//!         }
//!     }
//! }
//! ```

mod common;
mod traits;

pub use common::*;
pub use traits::*;
