// trading-common: Order domain, validation, request signing and Binance Futures transport
// Used by the trading-bot CLI

pub mod credentials;
pub mod error;
pub mod logging;
pub mod orders;
pub mod validation;
pub mod venue;
