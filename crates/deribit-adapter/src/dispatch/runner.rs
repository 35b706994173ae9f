/*
[INPUT]:  An operation and the shared session
[OUTPUT]: Timed operation output
[POS]:    Dispatch layer - execution seam between dispatcher and transport
[UPDATE]: When adding operations or runner implementations
*/

use async_trait::async_trait;

use crate::auth::Session;
use crate::http::rpc::Reply;
use crate::http::{DeribitClient, Result};

use super::plan::{Operation, OperationOutput};

/// Executes one operation against the exchange
///
/// Implemented by [`DeribitClient`]; tests substitute scripted runners.
#[async_trait]
pub trait OperationRunner: Send + Sync {
    async fn run(&self, session: &Session, operation: &Operation) -> Result<Reply<OperationOutput>>;
}

#[async_trait]
impl OperationRunner for DeribitClient {
    async fn run(&self, session: &Session, operation: &Operation) -> Result<Reply<OperationOutput>> {
        match operation {
            Operation::PlaceOrder(req) => Ok(self
                .place_order(session, req)
                .await?
                .map(OperationOutput::OrderPlaced)),
            Operation::ModifyOrder(req) => Ok(self
                .modify_order(session, req)
                .await?
                .map(OperationOutput::OrderModified)),
            Operation::CancelOrder(req) => Ok(self
                .cancel_order(session, req)
                .await?
                .map(OperationOutput::OrderCancelled)),
            Operation::GetOrderBook(req) => Ok(self
                .get_order_book(Some(session), req)
                .await?
                .map(OperationOutput::OrderBook)),
            Operation::GetPosition(req) => Ok(self
                .get_position(session, req)
                .await?
                .map(OperationOutput::Position)),
            Operation::GetOpenOrders(req) => Ok(self
                .get_open_orders(session, req)
                .await?
                .map(OperationOutput::OpenOrders)),
        }
    }
}
