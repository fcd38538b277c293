//! Command-line interface

use clap::Parser;
use trading_common::orders::OrderInput;

const EXAMPLES: &str = "\
Examples:
  # Place a market buy order
  trading-bot --symbol BTCUSDT --side BUY --type MARKET --quantity 0.001

  # Place a limit sell order
  trading-bot -s ETHUSDT -d SELL -t LIMIT -q 0.01 -p 3500

  # Check an order, then cancel it
  trading-bot -s ETHUSDT --query-order 8389765520
  trading-bot -s ETHUSDT --cancel-order 8389765520

  # Verify credentials and connectivity
  trading-bot --test-connection

Environment Variables:
  BINANCE_API_KEY     Your Binance API key
  BINANCE_API_SECRET  Your Binance API secret
  LOG_LEVEL           Session log level when --log-level is not given
  LOG_DIR             Directory for session logs (default: logs)
  LOG_FORMAT          text (default) or json";

/// Trading Bot CLI
#[derive(Debug, Parser)]
#[command(name = "Trading Bot", bin_name = "trading-bot")]
#[command(version = concat!("v", env!("CARGO_PKG_VERSION")))]
#[command(about = "Trading Bot for Binance Futures Testnet")]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Trading symbol (e.g., BTCUSDT, ETHUSDT)
    #[arg(short = 's', long, required_unless_present = "test_connection")]
    pub symbol: Option<String>,

    /// Order side: BUY or SELL
    #[arg(
        short = 'd',
        long,
        required_unless_present_any = ["test_connection", "query_order", "cancel_order"]
    )]
    pub side: Option<String>,

    /// Order type: MARKET or LIMIT
    #[arg(
        short = 't',
        long = "type",
        required_unless_present_any = ["test_connection", "query_order", "cancel_order"]
    )]
    pub order_type: Option<String>,

    /// Order quantity (e.g., 0.001)
    #[arg(
        short = 'q',
        long,
        required_unless_present_any = ["test_connection", "query_order", "cancel_order"]
    )]
    pub quantity: Option<String>,

    /// Order price (required for LIMIT orders)
    #[arg(short = 'p', long)]
    pub price: Option<String>,

    /// Session log level [default: INFO, or LOG_LEVEL]
    #[arg(
        long,
        ignore_case = true,
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"]
    )]
    pub log_level: Option<String>,

    /// Test API connection and exit
    #[arg(long, conflicts_with_all = ["query_order", "cancel_order"])]
    pub test_connection: bool,

    /// Show an existing order by exchange ID
    #[arg(long, value_name = "ORDER_ID", conflicts_with = "cancel_order")]
    pub query_order: Option<i64>,

    /// Cancel an open order by exchange ID
    #[arg(long, value_name = "ORDER_ID")]
    pub cancel_order: Option<i64>,
}

/// What this invocation should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    TestConnection,
    QueryOrder { symbol: String, order_id: i64 },
    CancelOrder { symbol: String, order_id: i64 },
    PlaceOrder(OrderInput),
}

impl Cli {
    /// Resolve the flags into one action.
    ///
    /// Clap has already enforced which flags are present, so missing values
    /// here only fall through to the validator as empty strings.
    pub fn action(&self) -> Action {
        let symbol = self.symbol.clone().unwrap_or_default();

        if self.test_connection {
            return Action::TestConnection;
        }
        if let Some(order_id) = self.query_order {
            return Action::QueryOrder { symbol, order_id };
        }
        if let Some(order_id) = self.cancel_order {
            return Action::CancelOrder { symbol, order_id };
        }

        let mut input = OrderInput::new(
            symbol,
            self.side.clone().unwrap_or_default(),
            self.order_type.clone().unwrap_or_default(),
            self.quantity.clone().unwrap_or_default(),
        );
        if let Some(price) = &self.price {
            input = input.with_price(price.clone());
        }
        Action::PlaceOrder(input)
    }
}
