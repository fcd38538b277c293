//! HMAC-SHA256 request signing for Binance API.
//!
//! Binance signs the exact query string it receives:
//! 1. Append `timestamp` after the caller's parameters
//! 2. HMAC-SHA256 the `k=v&...` serialization with the API secret
//! 3. Transmit the signature as the final `signature` parameter

use tracing::debug;

use super::endpoints::API_KEY_HEADER;
use crate::credentials::Credentials;
use crate::venue::http::{build_query_string, sign_payload, RequestSigner, SignedRequest};

/// HMAC-SHA256 request signer for Binance API.
///
/// # Example
///
/// ```ignore
/// let signer = BinanceHmacSigner::new(&credentials);
///
/// let params = vec![
///     ("symbol".to_string(), "BTCUSDT".to_string()),
///     ("side".to_string(), "BUY".to_string()),
/// ];
///
/// let signed = signer.sign("/fapi/v1/order", params, 1234567890);
/// // signed.query_string() ends with "&timestamp=1234567890&signature=<hex>"
/// ```
#[derive(Clone)]
pub struct BinanceHmacSigner {
    api_key: String,
    api_secret: String,
}

impl BinanceHmacSigner {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            api_key: credentials.api_key().to_string(),
            api_secret: credentials.api_secret().to_string(),
        }
    }
}

impl std::fmt::Debug for BinanceHmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceHmacSigner").finish_non_exhaustive()
    }
}

impl RequestSigner for BinanceHmacSigner {
    fn sign(
        &self,
        endpoint: &str,
        mut params: Vec<(String, String)>,
        timestamp: u64,
    ) -> SignedRequest {
        params.retain(|(k, _)| k != "timestamp" && k != "signature");
        params.push(("timestamp".to_string(), timestamp.to_string()));

        let payload = build_query_string(&params);
        let signature = sign_payload(&payload, &self.api_secret);

        debug!("Signed {} payload: {}", endpoint, payload);

        SignedRequest {
            endpoint: endpoint.to_string(),
            params,
            timestamp,
            signature,
        }
    }

    fn api_key_header(&self) -> &str {
        API_KEY_HEADER
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }
}
