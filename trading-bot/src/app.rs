//! One invocation, from parsed flags to exit code.

use std::future::Future;
use std::io;

use tracing::{error, info, warn};
use trading_common::credentials::Credentials;
use trading_common::logging::{init_logging, parse_level, LogConfig, SessionLog};
use trading_common::venue::binance::FuturesRestClient;

use crate::cli::{Action, Cli};
use crate::error::BotError;
use crate::orchestrator::OrderOrchestrator;
use crate::settings::Settings;

/// Exit code for an argument error: 0 for `--help`/`--version`, 1 otherwise.
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Logging setup from the environment. `--log-level` replaces `LOG_LEVEL`.
pub fn log_config(cli: &Cli) -> Result<LogConfig, BotError> {
    let level = cli.log_level.as_deref().map(parse_level).transpose()?;
    Ok(LogConfig::from_env_with_level(level)?.with_app_name("trading-bot"))
}

/// Run the bot and return the process exit code.
pub async fn run(cli: Cli) -> i32 {
    let session = match start_session(&cli) {
        Ok(session) => session,
        Err(e) => {
            println!("\n{}\n", e.console_line());
            return e.exit_code();
        }
    };
    println!("\n📝 Logging to: {}\n", session.path.display());

    let result = tokio::select! {
        result = execute(&cli) => result,
        interrupted = wait_for_interrupt(tokio::signal::ctrl_c()) => Err(interrupted),
    };

    match result {
        Ok(()) => {
            info!("Session finished successfully");
            0
        }
        Err(e) => {
            report_failure(&e);
            e.exit_code()
        }
    }
}

/// Resolves once Ctrl+C is received. If the handler cannot be installed the
/// run continues without interrupt support.
async fn wait_for_interrupt<F>(signal: F) -> BotError
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => BotError::Interrupted,
        Err(e) => {
            warn!("Ctrl+C handler unavailable: {}", e);
            std::future::pending().await
        }
    }
}

fn start_session(cli: &Cli) -> Result<SessionLog, BotError> {
    let config = log_config(cli)?;
    init_logging(config).map_err(|e| BotError::Unexpected(anyhow::anyhow!(e)))
}

async fn execute(cli: &Cli) -> Result<(), BotError> {
    info!("Loading API credentials...");
    let credentials = Credentials::from_env()?;

    let settings = Settings::load()?;
    settings.validate()?;
    info!(
        "Settings loaded: base_url={}, timeout={}ms, recvWindow={}ms",
        settings.exchange.base_url, settings.exchange.timeout_ms, settings.exchange.recv_window_ms
    );

    info!("Initializing Binance client...");
    let client = FuturesRestClient::connect(&credentials, settings.exchange.clone())?;
    let mut orchestrator =
        OrderOrchestrator::new(client, settings.validation.validator(), &settings.exchange);

    match cli.action() {
        Action::TestConnection => {
            orchestrator.test_connection().await?;
        }
        Action::QueryOrder { symbol, order_id } => {
            orchestrator.query_order(&symbol, order_id).await?;
        }
        Action::CancelOrder { symbol, order_id } => {
            orchestrator.cancel_order(&symbol, order_id).await?;
        }
        Action::PlaceOrder(input) => {
            orchestrator.place_order(&input).await?;
        }
    }
    Ok(())
}

/// Full detail to the log, one line to the terminal.
fn report_failure(err: &BotError) {
    match err {
        BotError::Interrupted => warn!("Operation cancelled by user"),
        BotError::Unexpected(e) => error!("Unexpected error occurred: {:?}", e),
        other => error!("{}: {}", other.kind_name(), other),
    }
    println!("\n{}\n", err.console_line());
}
