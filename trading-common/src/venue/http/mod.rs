//! HTTP client infrastructure for venues.
//!
//! - [`RequestSigner`]: Trait for request signing
//! - [`SignedRequest`]: Timestamped, signed parameter list
//! - [`RequestTransport`]: Single-attempt send seam
//! - [`HttpClient`]: reqwest-backed transport
//!
//! # Example
//!
//! ```ignore
//! use trading_common::venue::http::{HttpClient, HttpMethod, RequestTransport};
//!
//! let client = HttpClient::new(&signer, rest_config)?;
//! let signed = signer.sign("/fapi/v1/order", params, timestamp);
//! let raw = client.send(HttpMethod::Post, &signed).await?;
//! ```

mod client;
mod signer;

pub use client::{HttpClient, HttpMethod, RawResponse, RequestTransport};
pub use signer::{build_query_string, sign_payload, RequestSigner, SignedRequest};
