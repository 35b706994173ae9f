/*
[INPUT]:  Instrument names and optional book depth
[OUTPUT]: Market data (order book snapshot)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::auth::Session;
use crate::http::rpc::{Reply, extract};
use crate::http::{DeribitClient, Result};
use crate::types::{OrderBook, OrderBookRequest};

pub const GET_ORDER_BOOK: &str = "public/get_order_book";

impl DeribitClient {
    /// Fetch an order book snapshot
    ///
    /// POST /public/get_order_book
    /// The bearer token is attached when a session is given, as private callers do.
    pub async fn get_order_book(
        &self,
        session: Option<&Session>,
        req: &OrderBookRequest,
    ) -> Result<Reply<OrderBook>> {
        let reply = self.call(GET_ORDER_BOOK, req, session).await?;
        reply.try_map(|result| extract(GET_ORDER_BOOK, result))
    }
}
