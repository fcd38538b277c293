//! Binance USDT-M Futures venue.
//!
//! - [`BinanceHmacSigner`]: HMAC-SHA256 query signing
//! - [`FuturesRestClient`]: place, query and cancel orders; account and ping
//! - [`OrderResponse`], [`FuturesAccountInfo`]: decoded replies
//!
//! # Example
//!
//! ```ignore
//! use trading_common::venue::binance::FuturesRestClient;
//!
//! let client = FuturesRestClient::connect(&credentials, RestConfig::default())?;
//! let signed = client.sign(endpoints::futures::ORDER, FuturesRestClient::order_params(&order));
//! let response = client.submit_order(&signed).await?;
//! ```

pub mod endpoints;
mod futures;
mod signer;
mod types;

pub use futures::FuturesRestClient;
pub use signer::BinanceHmacSigner;
pub use types::{decode, FuturesAccountInfo, OrderResponse, OrderStatus, ServerTime};
