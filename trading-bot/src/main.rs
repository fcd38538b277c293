//! Trading Bot CLI
//!
//! Places MARKET and LIMIT orders on the Binance USDT-M Futures testnet,
//! queries or cancels them, and checks connectivity.

use clap::Parser;

use trading_bot::app;
use trading_bot::cli::Cli;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(app::parse_error_exit_code(&e));
        }
    };

    let code = app::run(cli).await;
    std::process::exit(code);
}
