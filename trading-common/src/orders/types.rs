//! Core order types for single-shot futures orders.
//!
//! - `OrderSide` - Buy or Sell
//! - `OrderType` - Market or Limit
//! - `TimeInForce` - GTC, the only policy attached to LIMIT orders
//! - `OrderInput` - raw, untrusted fields as typed on the command line
//! - `OrderRequest` - validated order, the only shape that can be signed

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{OrderField, ValidationError};

/// Order side indicating buy or sell direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// Buy order - open or add to a long position
    Buy,
    /// Sell order - open or add to a short position
    Sell,
}

impl OrderSide {
    /// Returns true if this is a buy order
    pub fn is_buy(&self) -> bool {
        matches!(self, OrderSide::Buy)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderSide {
    type Err = ValidationError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(OrderSide::Buy),
            "SELL" => Ok(OrderSide::Sell),
            _ => Err(ValidationError::new(
                OrderField::Side,
                format!("invalid side '{}', must be BUY or SELL", s.trim()),
            )),
        }
    }
}

/// Order type determining execution behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Market order - execute immediately at best available price
    Market,
    /// Limit order - rest on the book at the specified price or better
    Limit,
}

impl OrderType {
    /// Returns true if this order type requires a limit price
    pub fn requires_price(&self) -> bool {
        matches!(self, OrderType::Limit)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            _ => Err(ValidationError::new(
                OrderField::OrderType,
                format!("invalid order type '{}', must be MARKET or LIMIT", s.trim()),
            )),
        }
    }
}

/// Time-in-force policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeInForce {
    /// Good-Till-Canceled - remains active until filled or explicitly canceled
    #[default]
    GTC,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeInForce::GTC => write!(f, "GTC"),
        }
    }
}

/// Untrusted order fields exactly as the user supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderInput {
    pub symbol: String,
    pub side: String,
    pub order_type: String,
    pub quantity: String,
    pub price: Option<String>,
}

impl OrderInput {
    pub fn new(
        symbol: impl Into<String>,
        side: impl Into<String>,
        order_type: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side: side.into(),
            order_type: order_type.into(),
            quantity: quantity.into(),
            price: None,
        }
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }
}

/// A validated order.
///
/// Only [`crate::validation::OrderValidator`] builds these, so holding one
/// guarantees `quantity > 0` and that `price` (with GTC) is present exactly
/// when the order is LIMIT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub time_in_force: Option<TimeInForce>,
}

impl OrderRequest {
    pub(crate) fn market(symbol: String, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            symbol,
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            time_in_force: None,
        }
    }

    pub(crate) fn limit(symbol: String, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol,
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
            time_in_force: Some(TimeInForce::GTC),
        }
    }

    /// Notional value for LIMIT orders.
    pub fn notional(&self) -> Option<Decimal> {
        self.price.map(|p| p * self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_side_parse_is_case_insensitive() {
        assert_eq!("buy".parse::<OrderSide>().unwrap(), OrderSide::Buy);
        assert_eq!(" Sell ".parse::<OrderSide>().unwrap(), OrderSide::Sell);

        let err = "HOLD".parse::<OrderSide>().unwrap_err();
        assert_eq!(err.field, OrderField::Side);
        assert!(err.reason.contains("HOLD"));
    }

    #[test]
    fn test_order_type_parse() {
        assert_eq!("market".parse::<OrderType>().unwrap(), OrderType::Market);
        assert_eq!("LIMIT".parse::<OrderType>().unwrap(), OrderType::Limit);

        let err = "STOP".parse::<OrderType>().unwrap_err();
        assert_eq!(err.field, OrderField::OrderType);
    }

    #[test]
    fn test_display_matches_wire_names() {
        assert_eq!(OrderSide::Buy.to_string(), "BUY");
        assert_eq!(OrderType::Limit.to_string(), "LIMIT");
        assert_eq!(TimeInForce::default().to_string(), "GTC");
    }

    #[test]
    fn test_order_type_requires_price() {
        assert!(OrderType::Limit.requires_price());
        assert!(!OrderType::Market.requires_price());
    }

    #[test]
    fn test_request_constructors_keep_price_invariant() {
        let market = OrderRequest::market("BTCUSDT".into(), OrderSide::Buy, dec!(0.01));
        assert!(market.price.is_none());
        assert!(market.time_in_force.is_none());
        assert!(market.notional().is_none());

        let limit = OrderRequest::limit("BTCUSDT".into(), OrderSide::Sell, dec!(0.5), dec!(50000));
        assert_eq!(limit.price, Some(dec!(50000)));
        assert_eq!(limit.time_in_force, Some(TimeInForce::GTC));
        assert_eq!(limit.notional(), Some(dec!(25000)));
    }

    #[test]
    fn test_order_input_builder() {
        let input = OrderInput::new("btcusdt", "buy", "limit", "0.01").with_price("50000");
        assert_eq!(input.price.as_deref(), Some("50000"));
        assert_eq!(input.symbol, "btcusdt");
    }
}
