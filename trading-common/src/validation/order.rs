//! Order input validation.
//!
//! Turns an untrusted [`OrderInput`] into an [`OrderRequest`]. Rules run in
//! field order (symbol, side, type, quantity, price) and stop at the first
//! failure, so the reported error is always the earliest bad field.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::symbol::{SymbolValidator, SymbolValidatorConfig};
use crate::error::{OrderField, ValidationError};
use crate::orders::{OrderInput, OrderRequest, OrderSide, OrderType};

/// Largest quantity accepted without being treated as a typo.
pub const DEFAULT_MAX_QUANTITY: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Validator for order parameters.
#[derive(Debug, Clone)]
pub struct OrderValidator {
    symbols: SymbolValidator,
    max_quantity: Decimal,
}

impl Default for OrderValidator {
    fn default() -> Self {
        Self {
            symbols: SymbolValidator::new(),
            max_quantity: DEFAULT_MAX_QUANTITY,
        }
    }
}

impl OrderValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbol_config(mut self, config: SymbolValidatorConfig) -> Self {
        self.symbols = SymbolValidator::with_config(config);
        self
    }

    pub fn with_max_quantity(mut self, max: Decimal) -> Self {
        self.max_quantity = max;
        self
    }

    /// Validate every field and build the typed request.
    ///
    /// A price supplied with a MARKET order is dropped with a warning rather
    /// than rejected.
    pub fn validate(&self, input: &OrderInput) -> Result<OrderRequest, ValidationError> {
        info!("Validating order parameters...");

        let result = self.validate_inner(input);
        match &result {
            Ok(order) => info!(
                "All parameters validated successfully: {} {} {} qty={}",
                order.symbol, order.side, order.order_type, order.quantity
            ),
            Err(e) => warn!("Validation failed: {}", e),
        }
        result
    }

    fn validate_inner(&self, input: &OrderInput) -> Result<OrderRequest, ValidationError> {
        let symbol = self.validate_symbol(&input.symbol)?;
        let side = validate_side(&input.side)?;
        let order_type = validate_order_type(&input.order_type)?;
        let quantity = self.validate_quantity(&input.quantity)?;

        match order_type {
            OrderType::Market => {
                if let Some(price) = input.price.as_deref().filter(|p| !p.trim().is_empty()) {
                    warn!(
                        "Price provided for MARKET order will be ignored: {}",
                        price.trim()
                    );
                }
                Ok(OrderRequest::market(symbol, side, quantity))
            }
            OrderType::Limit => {
                let price = validate_limit_price(input.price.as_deref())?;
                Ok(OrderRequest::limit(symbol, side, quantity, price))
            }
        }
    }

    pub fn validate_symbol(&self, raw: &str) -> Result<String, ValidationError> {
        let symbol = self.symbols.normalize(raw)?;
        debug!("Symbol validated: {}", symbol);
        Ok(symbol)
    }

    pub fn validate_quantity(&self, raw: &str) -> Result<Decimal, ValidationError> {
        let quantity = parse_decimal(OrderField::Quantity, raw, self.max_quantity)?;

        if quantity <= Decimal::ZERO {
            return Err(ValidationError::new(
                OrderField::Quantity,
                "quantity must be positive",
            ));
        }
        if quantity > self.max_quantity {
            return Err(ValidationError::out_of_range(
                OrderField::Quantity,
                quantity,
                self.max_quantity,
            ));
        }

        debug!("Quantity validated: {}", quantity);
        Ok(quantity)
    }
}

fn validate_side(raw: &str) -> Result<OrderSide, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::required(OrderField::Side));
    }
    let side = raw.parse::<OrderSide>()?;
    debug!("Side validated: {}", side);
    Ok(side)
}

fn validate_order_type(raw: &str) -> Result<OrderType, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::required(OrderField::OrderType));
    }
    let order_type = raw.parse::<OrderType>()?;
    debug!("Order type validated: {}", order_type);
    Ok(order_type)
}

fn validate_limit_price(raw: Option<&str>) -> Result<Decimal, ValidationError> {
    let raw = match raw.map(str::trim) {
        Some(p) if !p.is_empty() => p,
        _ => {
            return Err(ValidationError::new(
                OrderField::Price,
                "price required for LIMIT orders",
            ))
        }
    };

    let price = parse_decimal(OrderField::Price, raw, Decimal::MAX)?;
    if price <= Decimal::ZERO {
        return Err(ValidationError::new(
            OrderField::Price,
            "price must be positive",
        ));
    }

    debug!("Price validated: {}", price);
    Ok(price)
}

/// Parse a plain (`0.001`) or scientific (`1e-3`) decimal.
///
/// `NaN` and infinities have no decimal form and fail as bad format. A
/// well-formed number too large for a `Decimal` is out of range against `max`.
fn parse_decimal(field: OrderField, raw: &str, max: Decimal) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required(field));
    }

    let parsed = if trimmed.contains(['e', 'E']) {
        Decimal::from_scientific(&trimmed.to_ascii_lowercase())
    } else {
        Decimal::from_str(trimmed)
    };

    parsed.map(|d| d.normalize()).map_err(|_| {
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() && v <= 0.0 => {
                ValidationError::new(field, format!("{} must be positive", field))
            }
            Ok(v) if v.is_finite() && v >= 1.0 => ValidationError::out_of_range(field, trimmed, max),
            _ => ValidationError::invalid_format(field, trimmed),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::TimeInForce;
    use rust_decimal_macros::dec;

    fn validator() -> OrderValidator {
        OrderValidator::default()
    }

    #[test]
    fn test_market_order_is_normalized() {
        let input = OrderInput::new(" btcusdt ", "buy", "market", "0.01");
        let order = validator().validate(&input).unwrap();

        assert_eq!(order.symbol, "BTCUSDT");
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.quantity, dec!(0.01));
        assert!(order.price.is_none());
        assert!(order.time_in_force.is_none());
    }

    #[test]
    fn test_limit_order_gets_gtc() {
        let input = OrderInput::new("ETHUSDT", "SELL", "LIMIT", "1.5").with_price("3500.50");
        let order = validator().validate(&input).unwrap();

        assert_eq!(order.price, Some(dec!(3500.5)));
        assert_eq!(order.time_in_force, Some(TimeInForce::GTC));
    }

    #[test]
    fn test_market_price_is_ignored() {
        let input = OrderInput::new("BTCUSDT", "BUY", "MARKET", "0.01").with_price("50000");
        let order = validator().validate(&input).unwrap();
        assert!(order.price.is_none());
    }

    #[test]
    fn test_limit_without_price_fails() {
        let input = OrderInput::new("BTCUSDT", "BUY", "LIMIT", "0.01");
        let err = validator().validate(&input).unwrap_err();
        assert_eq!(err.field, OrderField::Price);
        assert_eq!(err.reason, "price required for LIMIT orders");

        let blank = input.with_price("  ");
        let err = validator().validate(&blank).unwrap_err();
        assert_eq!(err.reason, "price required for LIMIT orders");
    }

    #[test]
    fn test_non_positive_price_fails() {
        for price in ["0", "-1", "-0.0001"] {
            let input = OrderInput::new("BTCUSDT", "BUY", "LIMIT", "0.01").with_price(price);
            let err = validator().validate(&input).unwrap_err();
            assert_eq!(err.field, OrderField::Price);
            assert_eq!(err.reason, "price must be positive");
        }
    }

    #[test]
    fn test_non_positive_quantity_fails() {
        for qty in ["0", "-0.5", "0.000"] {
            let input = OrderInput::new("BTCUSDT", "BUY", "MARKET", qty);
            let err = validator().validate(&input).unwrap_err();
            assert_eq!(err.field, OrderField::Quantity);
            assert_eq!(err.reason, "quantity must be positive");
        }
    }

    #[test]
    fn test_quantity_format_errors() {
        for qty in ["abc", "1.2.3", "NaN", "inf", ""] {
            let input = OrderInput::new("BTCUSDT", "BUY", "MARKET", qty);
            let err = validator().validate(&input).unwrap_err();
            assert_eq!(err.field, OrderField::Quantity, "input {:?}", qty);
        }
    }

    #[test]
    fn test_scientific_notation_quantity() {
        let input = OrderInput::new("BTCUSDT", "BUY", "MARKET", "1e-3");
        let order = validator().validate(&input).unwrap();
        assert_eq!(order.quantity, dec!(0.001));

        let input = OrderInput::new("BTCUSDT", "BUY", "MARKET", "2.5E2");
        let order = validator().validate(&input).unwrap();
        assert_eq!(order.quantity, dec!(250));
    }

    #[test]
    fn test_quantity_beyond_decimal_range_is_out_of_range() {
        for qty in ["1e30", "1E30", "100000000000000000000000000000000"] {
            let input = OrderInput::new("BTCUSDT", "BUY", "MARKET", qty);
            let err = validator().validate(&input).unwrap_err();
            assert_eq!(err.field, OrderField::Quantity, "input {:?}", qty);
            assert!(
                err.reason.contains("exceeds maximum of 1000000"),
                "input {:?}: {}",
                qty,
                err.reason
            );
        }

        let input = OrderInput::new("BTCUSDT", "BUY", "MARKET", "-1e30");
        let err = validator().validate(&input).unwrap_err();
        assert!(err.reason.contains("must be positive"), "{}", err.reason);
    }

    #[test]
    fn test_quantity_upper_bound() {
        let input = OrderInput::new("BTCUSDT", "BUY", "MARKET", "1000001");
        let err = validator().validate(&input).unwrap_err();
        assert_eq!(err.field, OrderField::Quantity);
        assert!(err.reason.contains("exceeds maximum"));

        let input = OrderInput::new("BTCUSDT", "BUY", "MARKET", "1000000");
        assert!(validator().validate(&input).is_ok());

        let small = validator().with_max_quantity(dec!(10));
        let input = OrderInput::new("BTCUSDT", "BUY", "MARKET", "11");
        assert!(small.validate(&input).is_err());
    }

    #[test]
    fn test_first_failing_field_wins() {
        let input = OrderInput::new("BTC-USDT", "HOLD", "STOP", "-1");
        let err = validator().validate(&input).unwrap_err();
        assert_eq!(err.field, OrderField::Symbol);

        let input = OrderInput::new("BTCUSDT", "HOLD", "STOP", "-1");
        let err = validator().validate(&input).unwrap_err();
        assert_eq!(err.field, OrderField::Side);

        let input = OrderInput::new("BTCUSDT", "BUY", "STOP", "-1");
        let err = validator().validate(&input).unwrap_err();
        assert_eq!(err.field, OrderField::OrderType);
    }

    #[test]
    fn test_empty_side_and_type_are_required() {
        let input = OrderInput::new("BTCUSDT", "", "MARKET", "1");
        let err = validator().validate(&input).unwrap_err();
        assert_eq!(err.field, OrderField::Side);
        assert!(err.reason.contains("required"));

        let input = OrderInput::new("BTCUSDT", "BUY", " ", "1");
        let err = validator().validate(&input).unwrap_err();
        assert_eq!(err.field, OrderField::OrderType);
    }

    #[test]
    fn test_strict_symbol_config() {
        let strict = validator().with_symbol_config(SymbolValidatorConfig::futures_pair());
        let input = OrderInput::new("BTC", "BUY", "MARKET", "1");
        let err = strict.validate(&input).unwrap_err();
        assert_eq!(err.field, OrderField::Symbol);
        assert!(err.reason.contains("too short"));
    }
}
