//! Request signing traits for authenticated API calls.
//!
//! The venue-specific signer decides which parameters to inject and how to
//! compute the signature; this module owns the canonical serialization that
//! both the signature and the transmitted request are built from.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// A request whose parameters have been timestamped and signed.
///
/// `params` excludes the signature. [`SignedRequest::query_string`] appends it
/// last, so the bytes on the wire are exactly the signed payload followed by
/// `&signature=...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub endpoint: String,
    pub params: Vec<(String, String)>,
    pub timestamp: u64,
    pub signature: String,
}

impl SignedRequest {
    /// Canonical payload the signature was computed over.
    pub fn payload(&self) -> String {
        build_query_string(&self.params)
    }

    /// Full query string to transmit, signature last.
    pub fn query_string(&self) -> String {
        let payload = self.payload();
        if payload.is_empty() {
            format!("signature={}", self.signature)
        } else {
            format!("{}&signature={}", payload, self.signature)
        }
    }

    /// Look up a parameter value by key.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Trait for signing HTTP requests.
///
/// Implementations handle venue-specific authentication:
/// - Adding timestamp parameters
/// - Computing signatures
/// - Providing API key headers
pub trait RequestSigner: Send + Sync {
    /// Timestamp and sign `params` for `endpoint`.
    ///
    /// Parameters already present keep their order; the timestamp is
    /// appended after them and the signature is computed over the result.
    fn sign(&self, endpoint: &str, params: Vec<(String, String)>, timestamp: u64)
        -> SignedRequest;

    /// Returns the header name for the API key.
    ///
    /// For Binance: "X-MBX-APIKEY"
    fn api_key_header(&self) -> &str;

    /// Returns the API key value.
    fn api_key(&self) -> &str;

    /// Returns additional headers required for authentication.
    fn additional_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// Build a query string from parameters, preserving their order.
///
/// Values are emitted verbatim. Callers only pass validated tickers, enum
/// names and decimals, none of which need percent-encoding.
pub fn build_query_string(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Lower-case hex HMAC-SHA256 of `payload` keyed by `secret`.
pub fn sign_payload(payload: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take any size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
