//! Order types for the futures order bot.
//!
//! Raw input arrives as [`OrderInput`]; the validator turns it into an
//! [`OrderRequest`], which is the only shape the venue client will sign.
//!
//! # Example
//!
//! ```ignore
//! use trading_common::orders::OrderInput;
//! use trading_common::validation::OrderValidator;
//!
//! let input = OrderInput::new("btcusdt", "buy", "limit", "0.01").with_price("50000");
//! let order = OrderValidator::default().validate(&input)?;
//! ```

mod types;

pub use types::*;
