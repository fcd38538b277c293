//! Order pipeline for a single invocation.
//!
//! `Start → Validated → Signed → Sent → {Succeeded | Failed}`
//!
//! Every transition is logged. Validation failures stop the pipeline before
//! anything is signed, and the signed request is sent exactly once.

use std::fmt;
use std::time::Duration;

use tracing::{debug, error, info};
use trading_common::error::retry_with_backoff;
use trading_common::orders::{OrderInput, OrderRequest};
use trading_common::validation::OrderValidator;
use trading_common::venue::binance::endpoints::futures;
use trading_common::venue::binance::{FuturesAccountInfo, FuturesRestClient, OrderResponse};
use trading_common::venue::RestConfig;

use crate::error::BotError;
use crate::report;

/// Where the current order is in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    Validated,
    Signed,
    Sent,
    Succeeded,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Start => "Start",
            PipelineStage::Validated => "Validated",
            PipelineStage::Signed => "Signed",
            PipelineStage::Sent => "Sent",
            PipelineStage::Succeeded => "Succeeded",
            PipelineStage::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// Runs orders, queries, cancels and connection checks against the venue.
pub struct OrderOrchestrator {
    client: FuturesRestClient,
    validator: OrderValidator,
    ping_attempts: u32,
    retry_delay: Duration,
    stages: Vec<PipelineStage>,
}

impl OrderOrchestrator {
    pub fn new(client: FuturesRestClient, validator: OrderValidator, config: &RestConfig) -> Self {
        info!("OrderOrchestrator initialized");
        Self {
            client,
            validator,
            ping_attempts: config.ping_attempts,
            retry_delay: config.retry_delay(),
            stages: Vec::new(),
        }
    }

    /// Stages visited by the last [`place_order`](Self::place_order) call.
    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    pub fn stage(&self) -> Option<PipelineStage> {
        self.stages.last().copied()
    }

    fn advance(&mut self, next: PipelineStage) {
        let from = self.stage().unwrap_or(PipelineStage::Start);
        info!("Order pipeline: {} -> {}", from, next);
        self.stages.push(next);
    }

    fn fail(&mut self, err: BotError) -> BotError {
        self.advance(PipelineStage::Failed);
        error!("Order failed ({}): {}", err.kind_name(), err);
        err
    }

    /// Validate, sign and submit one order.
    ///
    /// Prints the request summary once validated and the exchange response
    /// on success. Never retries.
    pub async fn place_order(&mut self, input: &OrderInput) -> Result<OrderResponse, BotError> {
        self.stages.clear();
        self.stages.push(PipelineStage::Start);
        info!("Placing order...");

        let order = match self.validator.validate(input) {
            Ok(order) => order,
            Err(e) => {
                error!("Parameter validation failed: {}", e);
                return Err(self.fail(e.into()));
            }
        };
        self.advance(PipelineStage::Validated);
        self.print_summary(&order);

        let signed = self
            .client
            .sign(futures::ORDER, FuturesRestClient::order_params(&order));
        self.advance(PipelineStage::Signed);
        debug!(
            "Signed {} at {} (signature {})",
            signed.endpoint, signed.timestamp, signed.signature
        );

        self.advance(PipelineStage::Sent);
        match self.client.submit_order(&signed).await {
            Ok(response) => {
                self.advance(PipelineStage::Succeeded);
                self.print_response(&response);
                info!("Order completed successfully");
                Ok(response)
            }
            Err(e) => {
                error!("Order placement failed: {}", e);
                Err(self.fail(e.into()))
            }
        }
    }

    /// Look up an order by exchange ID and print it.
    pub async fn query_order(&self, symbol: &str, order_id: i64) -> Result<OrderResponse, BotError> {
        let symbol = self.validator.validate_symbol(symbol)?;
        info!("Querying order status for Order ID: {}", order_id);

        let response = self.client.query_order(&symbol, order_id).await.map_err(|e| {
            error!("Failed to get order status: {}", e);
            e
        })?;

        self.print_response(&response);
        Ok(response)
    }

    /// Cancel an open order by exchange ID.
    pub async fn cancel_order(&self, symbol: &str, order_id: i64) -> Result<OrderResponse, BotError> {
        let symbol = self.validator.validate_symbol(symbol)?;
        info!("Attempting to cancel Order ID: {}", order_id);

        let response = self.client.cancel_order(&symbol, order_id).await.map_err(|e| {
            error!("Failed to cancel order: {}", e);
            e
        })?;

        info!(
            "Order {} canceled, status {}: {}",
            response.order_id, response.status, response.raw_body
        );
        println!("\n{}\n", report::cancel_confirmation(&response));
        Ok(response)
    }

    /// Ping (retried, read-only) then read the account with a signed call.
    pub async fn test_connection(&self) -> Result<FuturesAccountInfo, BotError> {
        println!("\nTesting connection to Binance Futures Testnet...");
        info!("Testing connectivity ({} attempts)", self.ping_attempts);

        let client = &self.client;
        retry_with_backoff(|| client.ping(), self.ping_attempts, self.retry_delay).await?;
        println!("✓ Connection successful!");
        info!("Ping successful");

        let account = self.client.account_info().await?;
        info!(
            "Account access successful: wallet balance {} USDT",
            account.total_wallet_balance
        );
        println!("{}", report::account_summary(&account));
        Ok(account)
    }

    fn print_summary(&self, order: &OrderRequest) {
        println!("\n{}\n", report::order_summary(order));
        info!("Order Summary: {}", report::order_summary_line(order));
    }

    fn print_response(&self, response: &OrderResponse) {
        println!("\n{}\n", report::order_response(response));
        info!(
            "Order Response: ID={}, Status={}, ExecutedQty={}",
            response.order_id, response.status, response.executed_qty
        );
        debug!("Raw response: {}", response.raw_body);
    }
}
