/*
[INPUT]:  Typed replies, dispatch reports, and errors from the adapter
[OUTPUT]: Printable lines for the terminal
[POS]:    Presentation layer - no business logic, formatting only
[UPDATE]: When result types gain fields worth showing
*/

use std::fmt::Display;
use std::time::Duration;

use console::style;
use deribit_adapter::dispatch::TradingLoopReport;
use deribit_adapter::{
    DeribitError, DispatchReport, OpenOrders, OperationOutput, OrderBook, Position, Reply,
};
use serde_json::Value;

fn latency_line(label: &str, latency: Duration) -> String {
    format!("{label} Latency: {:.6} seconds", latency.as_secs_f64())
}

fn field<T: Display>(name: &str, value: &Option<T>) -> String {
    match value {
        Some(value) => format!("{name}: {value}"),
        None => format!("{name}: {}", style("n/a").dim()),
    }
}

pub fn error(err: &DeribitError) -> Vec<String> {
    let mut rows = vec![format!(
        "{} [{}] {}",
        style("✗").red().bold(),
        err.kind().as_str(),
        err
    )];
    if let Some((message, Some(reason))) = err.exchange_message() {
        rows.push(format!("  message: {message}"));
        rows.push(format!("  reason:  {reason}"));
    }
    rows
}

/// Generic `result` object from the order endpoints
pub fn order_response(title: &str, reply: &Reply<Value>) -> Vec<String> {
    let mut rows = vec![format!("{} {title}", style("✓").green().bold())];
    if let Some(order) = reply.value.get("order") {
        for key in ["order_id", "order_state", "price", "amount", "filled_amount"] {
            if let Some(value) = order.get(key) {
                rows.push(format!("  {key}: {value}"));
            }
        }
    } else if let Some(id) = reply.value.get("order_id") {
        rows.push(format!("  order_id: {id}"));
    }
    rows.push(format!("  response: {}", reply.value));
    rows.push(latency_line("Order", reply.latency));
    rows
}

pub fn order_book(book: &OrderBook, latency: Duration) -> Vec<String> {
    let mut rows = vec![
        style(format!("Order Book for {}:", book.instrument_name))
            .bold()
            .to_string(),
        format!(
            "Best Bid Price: {}, Amount: {}",
            opt(&book.best_bid_price),
            opt(&book.best_bid_amount)
        ),
        format!(
            "Best Ask Price: {}, Amount: {}",
            opt(&book.best_ask_price),
            opt(&book.best_ask_amount)
        ),
        "Asks:".to_string(),
    ];
    rows.extend(
        book.asks
            .iter()
            .map(|level| format!("  Price: {}, Amount: {}", level.price(), level.amount())),
    );
    rows.push("Bids:".to_string());
    rows.extend(
        book.bids
            .iter()
            .map(|level| format!("  Price: {}, Amount: {}", level.price(), level.amount())),
    );
    rows.push(field("Mark Price", &book.mark_price));
    rows.push(field("Open Interest", &book.open_interest));
    rows.push(match book.timestamp_utc() {
        Some(ts) => format!("Timestamp: {}", ts.to_rfc3339()),
        None => field("Timestamp", &book.timestamp),
    });
    rows.push(latency_line("Market Data Processing", latency));
    rows
}

fn opt<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn position(position: &Position) -> Vec<String> {
    let title = match &position.instrument_name {
        Some(name) => format!("Position Details for {name}:"),
        None => "Position Details:".to_string(),
    };
    vec![
        style(title).bold().to_string(),
        field("Estimated Liquidation Price", &position.estimated_liquidation_price),
        field("Size Currency", &position.size_currency),
        field("Realized Funding", &position.realized_funding),
        field("Total Profit Loss", &position.total_profit_loss),
        field("Realized Profit Loss", &position.realized_profit_loss),
        field("Floating Profit Loss", &position.floating_profit_loss),
        field("Leverage", &position.leverage),
        field("Average Price", &position.average_price),
        field("Delta", &position.delta),
        field("Interest Value", &position.interest_value),
        field("Mark Price", &position.mark_price),
        field("Settlement Price", &position.settlement_price),
        field("Index Price", &position.index_price),
        field("Direction", &position.direction),
        field("Open Orders Margin", &position.open_orders_margin),
        field("Initial Margin", &position.initial_margin),
        field("Maintenance Margin", &position.maintenance_margin),
        field("Kind", &position.kind.map(|kind| kind.as_str())),
        field("Size", &position.size),
    ]
}

/// One row per entry, in order; unreadable entries get a diagnostic row
pub fn open_orders(orders: &OpenOrders) -> Vec<String> {
    orders
        .entries
        .iter()
        .map(|entry| match entry {
            Ok(order) => format!(
                "Instrument: {}, Order ID: {}, Price: {}, Amount: {}",
                order.instrument_name, order.order_id, order.price, order.amount
            ),
            Err(err) => format!("{} {err}: {}", style("!").yellow().bold(), err.raw),
        })
        .collect()
}

pub fn operation_output(output: &OperationOutput, latency: Duration) -> Vec<String> {
    match output {
        OperationOutput::OrderPlaced(value)
        | OperationOutput::OrderModified(value)
        | OperationOutput::OrderCancelled(value) => {
            vec![format!("response: {value}"), latency_line("Order", latency)]
        }
        OperationOutput::OrderBook(book) => order_book(book, latency),
        OperationOutput::Position(p) => position(p),
        OperationOutput::OpenOrders(orders) => open_orders(orders),
    }
}

pub fn dispatch_report(report: &DispatchReport) -> Vec<String> {
    let mut rows = Vec::new();
    for outcome in &report.joined {
        rows.push(
            style(format!("[{}] {}", outcome.label, outcome.method))
                .bold()
                .to_string(),
        );
        match &outcome.result {
            Ok(reply) => rows.extend(
                operation_output(&reply.value, reply.latency)
                    .into_iter()
                    .map(|row| format!("  {row}")),
            ),
            Err(err) => rows.extend(error(err).into_iter().map(|row| format!("  {row}"))),
        }
    }
    for task in &report.detached {
        rows.push(format!(
            "{} [{}] {} detached; result not collected",
            style("…").yellow(),
            task.label,
            task.method
        ));
    }
    rows
}

pub fn trading_loop(report: &TradingLoopReport) -> Vec<String> {
    let mut rows = Vec::new();
    match &report.order {
        Ok(reply) => rows.extend(operation_output(&reply.value, reply.latency)),
        Err(err) => rows.extend(error(err)),
    }
    match &report.book {
        Ok(reply) => rows.extend(operation_output(&reply.value, reply.latency)),
        Err(err) => rows.extend(error(err)),
    }
    rows.push(latency_line("End-to-End Trading Loop", report.end_to_end));
    rows
}

pub fn print(rows: &[String]) {
    for row in rows {
        println!("{row}");
    }
}
