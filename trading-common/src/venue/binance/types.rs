//! Types for Binance USDT-M Futures API responses.
//!
//! Binance sends prices and quantities as JSON strings; they are decoded
//! straight into [`Decimal`] so no precision is lost on the way to reports.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::orders::OrderSide;
use crate::venue::error::{VenueError, VenueResult};
use crate::venue::http::RawResponse;

/// Binance order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    PendingCancel,
    Rejected,
    Expired,
    ExpiredInMatch,
    // Futures-specific
    NewInsurance,
    NewAdl,
}

impl OrderStatus {
    /// Check if the order is still working on the book.
    pub fn is_open(self) -> bool {
        matches!(self, Self::New | Self::PartiallyFilled | Self::PendingCancel)
    }

    /// Check if the order can no longer change.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Filled | Self::Canceled | Self::Rejected | Self::Expired | Self::ExpiredInMatch
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::PartiallyFilled => write!(f, "PARTIALLY_FILLED"),
            Self::Filled => write!(f, "FILLED"),
            Self::Canceled => write!(f, "CANCELED"),
            Self::PendingCancel => write!(f, "PENDING_CANCEL"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::ExpiredInMatch => write!(f, "EXPIRED_IN_MATCH"),
            Self::NewInsurance => write!(f, "NEW_INSURANCE"),
            Self::NewAdl => write!(f, "NEW_ADL"),
        }
    }
}

/// Order as reported by the exchange after place, query or cancel.
///
/// Only ever built from a 2xx reply. `raw_body` keeps the exact JSON for the
/// session log.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Exchange order ID
    pub order_id: i64,
    /// Client order ID (exchange-generated when not supplied)
    pub client_order_id: String,
    pub symbol: String,
    pub side: OrderSide,
    /// Kept as text: queried orders may carry types this tool never places
    #[serde(rename = "type")]
    pub order_type: String,
    pub status: OrderStatus,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub orig_qty: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub executed_qty: Decimal,
    /// Zero for MARKET orders
    #[serde(deserialize_with = "deserialize_decimal")]
    pub price: Decimal,
    /// Absent from cancel replies
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub avg_price: Decimal,
    /// Milliseconds since epoch
    #[serde(default)]
    pub update_time: i64,
    #[serde(skip)]
    pub raw_body: String,
}

impl OrderResponse {
    /// Decode a successful reply.
    pub fn from_raw(raw: &RawResponse) -> VenueResult<Self> {
        let mut response: OrderResponse = serde_json::from_str(&raw.body).map_err(|e| {
            VenueError::Parse(format!(
                "Failed to parse order response: {} - body: {}",
                e, raw.body
            ))
        })?;
        response.raw_body = raw.body.clone();
        Ok(response)
    }

    /// Update time as a UTC timestamp.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.update_time)
    }
}

/// Futures account summary (v2), reduced to what the connection check shows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuturesAccountInfo {
    /// Total wallet balance (USDT)
    #[serde(deserialize_with = "deserialize_decimal")]
    pub total_wallet_balance: Decimal,
    /// Available balance for new positions
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub available_balance: Decimal,
    /// Total unrealized profit
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub total_unrealized_profit: Decimal,
    #[serde(default)]
    pub can_trade: bool,
}

/// Server time response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    pub server_time: i64,
}

/// Decode a JSON reply into `T`, keeping the body in the error.
pub fn decode<T: serde::de::DeserializeOwned>(raw: &RawResponse) -> VenueResult<T> {
    serde_json::from_str(&raw.body)
        .map_err(|e| VenueError::Parse(format!("Failed to parse response: {} - body: {}", e, raw.body)))
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&s).map_err(serde::de::Error::custom)
}
