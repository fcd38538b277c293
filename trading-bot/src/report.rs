//! Console reports printed to standard output.

use rust_decimal::Decimal;
use trading_common::orders::OrderRequest;
use trading_common::venue::binance::{FuturesAccountInfo, OrderResponse, OrderStatus};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Block shown after validation, before the order is signed.
pub fn order_summary(order: &OrderRequest) -> String {
    let price = match order.price {
        Some(price) => price.normalize().to_string(),
        None => "MARKET PRICE".to_string(),
    };

    let mut lines = vec![
        rule(),
        "ORDER REQUEST SUMMARY".to_string(),
        rule(),
        format!("Symbol:      {}", order.symbol),
        format!("Side:        {}", order.side),
        format!("Type:        {}", order.order_type),
        format!("Quantity:    {}", order.quantity.normalize()),
        format!("Price:       {}", price),
    ];
    if let Some(tif) = order.time_in_force {
        lines.push(format!("TimeInForce: {}", tif));
    }
    lines.push(rule());

    lines.join("\n")
}

/// One-line summary for the session log.
pub fn order_summary_line(order: &OrderRequest) -> String {
    let price = order
        .price
        .map(|p| p.normalize().to_string())
        .unwrap_or_else(|| "MARKET".to_string());
    format!(
        "{} {} {} {} @ {}",
        order.order_type,
        order.side,
        order.quantity.normalize(),
        order.symbol,
        price
    )
}

/// Exchange view of an order after place or query.
pub fn order_response(response: &OrderResponse) -> String {
    let mut lines = vec![
        rule(),
        "ORDER RESPONSE".to_string(),
        rule(),
        format!("Order ID:          {}", response.order_id),
        format!("Client Order ID:   {}", response.client_order_id),
        format!("Status:            {}", response.status),
        format!("Symbol:            {}", response.symbol),
        format!("Side:              {}", response.side),
        format!("Type:              {}", response.order_type),
        format!("Original Qty:      {}", response.orig_qty.normalize()),
        format!("Executed Qty:      {}", response.executed_qty.normalize()),
        format!("Price:             {}", response.price.normalize()),
    ];

    if response.avg_price > Decimal::ZERO {
        lines.push(format!("Average Price:     {}", response.avg_price.normalize()));
    }

    let update_time = response
        .updated_at()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string())
        .unwrap_or_else(|| "N/A".to_string());
    lines.push(format!("Update Time:       {}", update_time));
    lines.push(rule());
    lines.push(status_line(response.status));
    lines.push(rule());

    lines.join("\n")
}

/// Verdict line under the response block.
pub fn status_line(status: OrderStatus) -> String {
    match status {
        OrderStatus::Filled => "✓ ORDER FILLED SUCCESSFULLY".to_string(),
        OrderStatus::New => "✓ ORDER PLACED SUCCESSFULLY (PENDING)".to_string(),
        OrderStatus::PartiallyFilled => "⚠ ORDER PARTIALLY FILLED".to_string(),
        OrderStatus::Canceled => "✗ ORDER CANCELED".to_string(),
        OrderStatus::Rejected => "✗ ORDER REJECTED".to_string(),
        other => format!("ℹ ORDER STATUS: {}", other),
    }
}

pub fn cancel_confirmation(response: &OrderResponse) -> String {
    format!(
        "✓ Order {} canceled successfully (status {})",
        response.order_id, response.status
    )
}

/// Balances shown by the connection check.
pub fn account_summary(account: &FuturesAccountInfo) -> String {
    [
        "✓ Account access successful!".to_string(),
        format!(
            "  Total Wallet Balance: {} USDT",
            account.total_wallet_balance.normalize()
        ),
        format!(
            "  Available Balance:    {} USDT",
            account.available_balance.normalize()
        ),
        format!(
            "  Unrealized PnL:       {} USDT",
            account.total_unrealized_profit.normalize()
        ),
        format!(
            "  Trading enabled:      {}",
            if account.can_trade { "yes" } else { "no" }
        ),
    ]
    .join("\n")
}
