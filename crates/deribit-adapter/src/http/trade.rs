/*
[INPUT]:  Order requests and an authenticated session
[OUTPUT]: Order placement/modification/cancellation results
[POS]:    HTTP layer - trading endpoints (require bearer auth)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use serde_json::Value;

use crate::auth::Session;
use crate::http::rpc::Reply;
use crate::http::{DeribitClient, Result};
use crate::types::{CancelOrderRequest, ModifyOrderRequest, PlaceOrderRequest};

pub const BUY: &str = "private/buy";
pub const EDIT: &str = "private/edit";
pub const CANCEL: &str = "private/cancel";

impl DeribitClient {
    /// Place a limit buy order; the `result` object is returned unchanged
    ///
    /// POST /private/buy
    pub async fn place_order(
        &self,
        session: &Session,
        req: &PlaceOrderRequest,
    ) -> Result<Reply<Value>> {
        let reply = self.call(BUY, req, Some(session)).await?;
        tracing::info!(
            instrument = %req.instrument_name,
            price = %req.price,
            amount = %req.amount,
            latency_ms = reply.latency.as_secs_f64() * 1000.0,
            "order placed"
        );
        Ok(reply)
    }

    /// Change price and amount of an open order
    ///
    /// POST /private/edit
    /// An exchange error comes back as `DeribitError::Exchange` with message and reason.
    pub async fn modify_order(
        &self,
        session: &Session,
        req: &ModifyOrderRequest,
    ) -> Result<Reply<Value>> {
        self.call(EDIT, req, Some(session)).await
    }

    /// Cancel an order by id
    ///
    /// POST /private/cancel
    pub async fn cancel_order(
        &self,
        session: &Session,
        req: &CancelOrderRequest,
    ) -> Result<Reply<Value>> {
        self.call(CANCEL, req, Some(session)).await
    }
}
