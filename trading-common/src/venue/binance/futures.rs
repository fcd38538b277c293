//! REST client for Binance USDT-M Futures API.
//!
//! Typed operations for placing, querying and cancelling orders plus the
//! read-only connectivity checks. Every method performs one request.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::endpoints::futures;
use super::signer::BinanceHmacSigner;
use super::types::{decode, FuturesAccountInfo, OrderResponse, ServerTime};
use crate::credentials::Credentials;
use crate::orders::{OrderRequest, OrderType};
use crate::venue::config::RestConfig;
use crate::venue::error::VenueResult;
use crate::venue::http::{HttpClient, HttpMethod, RequestSigner, RequestTransport, SignedRequest};

/// REST client for Binance USDT-M Futures API.
pub struct FuturesRestClient {
    transport: Arc<dyn RequestTransport>,
    signer: Arc<dyn RequestSigner>,
    recv_window_ms: u64,
}

impl FuturesRestClient {
    /// Create a client over an existing transport and signer.
    pub fn new(
        transport: Arc<dyn RequestTransport>,
        signer: Arc<dyn RequestSigner>,
        config: &RestConfig,
    ) -> Self {
        Self {
            transport,
            signer,
            recv_window_ms: config.recv_window_ms,
        }
    }

    /// Build the HMAC signer and reqwest transport from credentials.
    pub fn connect(credentials: &Credentials, config: RestConfig) -> VenueResult<Self> {
        let signer = Arc::new(BinanceHmacSigner::new(credentials));
        info!(
            "Initializing futures client for {} (API key {})",
            config.base_url,
            credentials.masked_key()
        );
        let transport = Arc::new(HttpClient::new(signer.as_ref(), config.clone())?);
        Ok(Self::new(transport, signer, &config))
    }

    /// Wire parameters for a validated order.
    ///
    /// `symbol, side, type, quantity`, then `price, timeInForce` for LIMIT.
    /// MARKET orders never carry a price.
    pub fn order_params(order: &OrderRequest) -> Vec<(String, String)> {
        let mut params = vec![
            ("symbol".to_string(), order.symbol.clone()),
            ("side".to_string(), order.side.to_string()),
            ("type".to_string(), order.order_type.to_string()),
            ("quantity".to_string(), order.quantity.normalize().to_string()),
        ];

        if order.order_type == OrderType::Limit {
            if let Some(price) = order.price {
                params.push(("price".to_string(), price.normalize().to_string()));
            }
            if let Some(tif) = order.time_in_force {
                params.push(("timeInForce".to_string(), tif.to_string()));
            }
        }

        params
    }

    /// Sign `params` for `endpoint` with the current time.
    pub fn sign(&self, endpoint: &str, params: Vec<(String, String)>) -> SignedRequest {
        self.sign_at(endpoint, params, current_timestamp_ms())
    }

    /// Sign with an explicit timestamp. Appends `recvWindow` unless present.
    pub fn sign_at(
        &self,
        endpoint: &str,
        mut params: Vec<(String, String)>,
        timestamp: u64,
    ) -> SignedRequest {
        if !params.iter().any(|(k, _)| k == "recvWindow") {
            params.push(("recvWindow".to_string(), self.recv_window_ms.to_string()));
        }
        self.signer.sign(endpoint, params, timestamp)
    }

    /// Submit a signed new-order request.
    pub async fn submit_order(&self, signed: &SignedRequest) -> VenueResult<OrderResponse> {
        debug!("Submitting futures order: {}", signed.payload());

        let raw = self.transport.send(HttpMethod::Post, signed).await?;
        OrderResponse::from_raw(&raw)
    }

    /// Build, sign and submit in one step.
    pub async fn place_order(&self, order: &OrderRequest) -> VenueResult<OrderResponse> {
        let signed = self.sign(futures::ORDER, Self::order_params(order));
        self.submit_order(&signed).await
    }

    /// Query an order by exchange ID.
    pub async fn query_order(&self, symbol: &str, order_id: i64) -> VenueResult<OrderResponse> {
        let signed = self.sign(futures::ORDER_QUERY, id_params(symbol, order_id));

        debug!("Querying futures order: {}", signed.payload());

        let raw = self.transport.send(HttpMethod::Get, &signed).await?;
        OrderResponse::from_raw(&raw)
    }

    /// Cancel an order by exchange ID.
    pub async fn cancel_order(&self, symbol: &str, order_id: i64) -> VenueResult<OrderResponse> {
        let signed = self.sign(futures::ORDER_CANCEL, id_params(symbol, order_id));

        debug!("Cancelling futures order: {}", signed.payload());

        let raw = self.transport.send(HttpMethod::Delete, &signed).await?;
        OrderResponse::from_raw(&raw)
    }

    /// Fetch account balances (signed, read-only).
    pub async fn account_info(&self) -> VenueResult<FuturesAccountInfo> {
        let signed = self.sign(futures::ACCOUNT, Vec::new());
        let raw = self.transport.send(HttpMethod::Get, &signed).await?;
        decode(&raw)
    }

    /// Unsigned connectivity check.
    pub async fn ping(&self) -> VenueResult<()> {
        self.transport.send_public(futures::PING, &[]).await?;
        Ok(())
    }

    /// Exchange clock, useful when the exchange reports a timestamp outside recvWindow.
    pub async fn server_time(&self) -> VenueResult<ServerTime> {
        let raw = self.transport.send_public(futures::SERVER_TIME, &[]).await?;
        decode(&raw)
    }
}

fn id_params(symbol: &str, order_id: i64) -> Vec<(String, String)> {
    vec![
        ("symbol".to_string(), symbol.to_string()),
        ("orderId".to_string(), order_id.to_string()),
    ]
}

fn current_timestamp_ms() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
