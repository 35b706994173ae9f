/*
[INPUT]:  An order to place and an order book to read afterwards
[OUTPUT]: Both outcomes plus end-to-end latency
[POS]:    Dispatch layer - sequential place-then-observe round trip
[UPDATE]: When the loop gains steps
*/

use std::time::{Duration, Instant};

use crate::auth::Session;
use crate::http::Result;
use crate::http::rpc::Reply;
use crate::types::{OrderBookRequest, PlaceOrderRequest};

use super::plan::{Operation, OperationOutput};
use super::runner::OperationRunner;

#[derive(Debug)]
pub struct TradingLoopReport {
    pub order: Result<Reply<OperationOutput>>,
    pub book: Result<Reply<OperationOutput>>,
    pub end_to_end: Duration,
}

/// Place an order, then fetch the book, timing the pair.
///
/// The book is fetched even when placement fails.
pub async fn run_trading_loop<R>(
    runner: &R,
    session: &Session,
    order: PlaceOrderRequest,
    book: OrderBookRequest,
) -> TradingLoopReport
where
    R: OperationRunner + ?Sized,
{
    let started = Instant::now();
    let order = runner.run(session, &Operation::PlaceOrder(order)).await;
    let book = runner.run(session, &Operation::GetOrderBook(book)).await;
    let end_to_end = started.elapsed();

    tracing::info!(
        end_to_end_ms = end_to_end.as_secs_f64() * 1000.0,
        order_ok = order.is_ok(),
        book_ok = book.is_ok(),
        "trading loop finished"
    );

    TradingLoopReport {
        order,
        book,
        end_to_end,
    }
}
