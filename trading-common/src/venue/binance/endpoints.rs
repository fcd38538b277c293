//! Binance USDT-M Futures endpoints.

/// USDT-M Futures testnet REST base URL.
pub const FUTURES_TESTNET_URL: &str = "https://testnet.binancefuture.com";

/// API key header expected on every signed request.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// REST API endpoint paths for Binance USDT-M Futures.
pub mod futures {
    /// Account information (v2)
    pub const ACCOUNT: &str = "/fapi/v2/account";

    /// New order (POST)
    pub const ORDER: &str = "/fapi/v1/order";

    /// Query order (GET)
    pub const ORDER_QUERY: &str = "/fapi/v1/order";

    /// Cancel order (DELETE)
    pub const ORDER_CANCEL: &str = "/fapi/v1/order";

    /// Server time
    pub const SERVER_TIME: &str = "/fapi/v1/time";

    /// Test connectivity
    pub const PING: &str = "/fapi/v1/ping";
}
