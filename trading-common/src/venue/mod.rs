//! Venue connectivity for order execution.
//!
//! # Layers
//!
//! - [`http`]: request signing trait, signed request shape, reqwest transport
//! - [`binance`]: Binance USDT-M Futures signer, endpoints, typed REST client
//!
//! # Shared Infrastructure
//!
//! - [`RestConfig`]: base URL, timeout, recvWindow, connectivity retries
//! - [`VenueError`]: transport / API / HTTP / parse failures with
//!   [`ErrorClassification`](crate::error::ErrorClassification)
//!
//! # Example
//!
//! ```ignore
//! use trading_common::venue::{binance::FuturesRestClient, RestConfig};
//!
//! let client = FuturesRestClient::connect(&credentials, RestConfig::default())?;
//! client.ping().await?;
//! let account = client.account_info().await?;
//! ```

mod config;
mod error;

pub mod binance;
pub mod http;

pub use config::RestConfig;
pub use error::{TransportKind, VenueError, VenueResult};
