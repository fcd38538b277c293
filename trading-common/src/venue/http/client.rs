//! HTTP transport for venue REST APIs.
//!
//! This module provides a generic HTTP client that handles:
//! - API key header placement
//! - Query-string vs form-body placement of signed parameters
//! - Timeout handling
//! - Mapping of non-2xx replies onto [`VenueError`]
//!
//! Each call is a single attempt. Whether a failure may be retried is the
//! caller's decision, see [`crate::error::retry_with_backoff`].

use std::fmt;

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::signer::{build_query_string, RequestSigner, SignedRequest};
use crate::venue::config::RestConfig;
use crate::venue::error::{VenueError, VenueResult};

/// HTTP verbs used by the futures REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// A 2xx reply, body not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends requests to the venue.
///
/// The orchestrator and venue client depend on this seam rather than on
/// [`HttpClient`] directly so tests can substitute a recording transport.
#[async_trait]
pub trait RequestTransport: Send + Sync {
    /// Send a signed request exactly once.
    async fn send(&self, method: HttpMethod, request: &SignedRequest) -> VenueResult<RawResponse>;

    /// Send an unsigned GET exactly once.
    async fn send_public(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> VenueResult<RawResponse>;
}

/// HTTP client for venue REST APIs.
///
/// # Example
///
/// ```ignore
/// let signer = BinanceHmacSigner::new(&credentials);
/// let client = HttpClient::new(&signer, RestConfig::default())?;
///
/// let signed = signer.sign("/fapi/v2/account", params, timestamp);
/// let response = client.send(HttpMethod::Get, &signed).await?;
/// ```
pub struct HttpClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for all requests, no trailing slash
    base_url: String,
    /// API key header, built once from the signer
    auth_headers: header::HeaderMap,
}

impl HttpClient {
    /// Create a new HTTP client.
    ///
    /// Fails with [`VenueError::Configuration`] if the signer's key cannot be
    /// expressed as a header value.
    pub fn new(signer: &dyn RequestSigner, config: RestConfig) -> VenueResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| VenueError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_headers: build_auth_headers(signer)?,
        })
    }

    /// Build the full URL with query string.
    fn build_url(&self, endpoint: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, query)
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_response(response: Response) -> VenueResult<RawResponse> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            // The deadline also covers the body; a stalled body is a timeout
            let message = format!("Failed to read response: {}", e);
            if e.is_timeout() {
                VenueError::timeout(message)
            } else {
                VenueError::network(message)
            }
        })?;

        classify_response(status, body)
    }
}

#[async_trait]
impl RequestTransport for HttpClient {
    async fn send(&self, method: HttpMethod, request: &SignedRequest) -> VenueResult<RawResponse> {
        let query = request.query_string();

        debug!("{} (signed) {}", method, request.endpoint);

        let builder = match method {
            HttpMethod::Get => self.client.get(self.build_url(&request.endpoint, &query)),
            HttpMethod::Delete => self.client.delete(self.build_url(&request.endpoint, &query)),
            HttpMethod::Post => self
                .client
                .post(self.build_url(&request.endpoint, ""))
                .body(query),
        };

        let response = builder
            .headers(self.auth_headers.clone())
            .send()
            .await
            .map_err(|e| {
                let err = VenueError::from(e);
                warn!("{} {} failed: {}", method, request.endpoint, err);
                err
            })?;

        info!(
            "{} {} -> HTTP {}",
            method,
            request.endpoint,
            response.status().as_u16()
        );
        Self::read_response(response).await
    }

    async fn send_public(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> VenueResult<RawResponse> {
        let url = self.build_url(endpoint, &build_query_string(params));

        debug!("GET (public) {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            let err = VenueError::from(e);
            warn!("GET {} failed: {}", endpoint, err);
            err
        })?;

        Self::read_response(response).await
    }
}

/// Binance-style error response.
#[derive(Debug, Deserialize)]
struct BinanceErrorResponse {
    code: i64,
    msg: String,
}

/// Map a reply onto success or the matching error variant.
pub(crate) fn classify_response(status: u16, body: String) -> VenueResult<RawResponse> {
    if (200..300).contains(&status) {
        debug!("Response body: {}", body);
        return Ok(RawResponse { status, body });
    }

    if let Ok(error) = serde_json::from_str::<BinanceErrorResponse>(&body) {
        warn!("API error {} (HTTP {}): {}", error.code, status, error.msg);
        return Err(VenueError::Api {
            code: error.code,
            message: error.msg,
        });
    }

    warn!("HTTP {} without error payload: {}", status, body);
    Err(VenueError::Http { status, body })
}

fn build_auth_headers(signer: &dyn RequestSigner) -> VenueResult<header::HeaderMap> {
    let mut headers = header::HeaderMap::new();

    let name = header::HeaderName::from_bytes(signer.api_key_header().as_bytes())
        .map_err(|e| VenueError::Configuration(format!("Invalid API key header name: {}", e)))?;
    let mut value = header::HeaderValue::from_str(signer.api_key())
        .map_err(|_| VenueError::Configuration("API key contains invalid characters".to_string()))?;
    value.set_sensitive(true);
    headers.insert(name, value);

    for (name, value) in signer.additional_headers() {
        if let (Ok(name), Ok(value)) = (
            header::HeaderName::from_bytes(name.as_bytes()),
            header::HeaderValue::from_str(&value),
        ) {
            headers.insert(name, value);
        }
    }

    Ok(headers)
}
