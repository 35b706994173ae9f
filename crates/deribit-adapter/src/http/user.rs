/*
[INPUT]:  Query parameters and an authenticated session
[OUTPUT]: User account data (positions, open orders)
[POS]:    HTTP layer - user data endpoints (require bearer auth)
[UPDATE]: When adding new user endpoints or changing query parameters
*/

// ### User Endpoints

use serde_json::Value;

use crate::auth::Session;
use crate::http::rpc::{Reply, extract};
use crate::http::{DeribitClient, DeribitError, Result};
use crate::types::{OpenOrders, OpenOrdersRequest, Position, PositionRequest};

pub const GET_POSITION: &str = "private/get_position";
pub const GET_OPEN_ORDERS: &str = "private/get_open_orders";

impl DeribitClient {
    /// Query the position for one instrument
    ///
    /// POST /private/get_position
    pub async fn get_position(
        &self,
        session: &Session,
        req: &PositionRequest,
    ) -> Result<Reply<Position>> {
        let reply = self.call(GET_POSITION, req, Some(session)).await?;
        reply.try_map(|result| extract(GET_POSITION, result))
    }

    /// Query open orders; each array element is extracted on its own
    ///
    /// POST /private/get_open_orders
    pub async fn get_open_orders(
        &self,
        session: &Session,
        req: &OpenOrdersRequest,
    ) -> Result<Reply<OpenOrders>> {
        let reply = self.call(GET_OPEN_ORDERS, req, Some(session)).await?;
        let reply = reply.try_map(|result| match result {
            Value::Array(entries) => Ok(OpenOrders::from_entries(entries)),
            other => Err(DeribitError::InvalidResponse(format!(
                "{GET_OPEN_ORDERS} result is not an array: {other}"
            ))),
        })?;

        for failure in reply.value.failures() {
            tracing::warn!(index = failure.index, error = %failure.source, "skipping malformed open order");
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::Session;
    use crate::http::{ClientConfig, DeribitClient, DeribitError};
    use crate::types::{Direction, InstrumentKind, OpenOrdersRequest, PositionRequest};
    use rust_decimal::Decimal;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DeribitClient {
        DeribitClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
            .expect("client init")
    }

    #[tokio::test]
    async fn test_get_position() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/private/get_position"))
            .and(header("authorization", "Bearer tok"))
            .and(body_partial_json(json!({"params": {"instrument_name": "BTC-PERPETUAL"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "result": {
                    "average_price": 91000.0,
                    "delta": 0.0011,
                    "direction": "buy",
                    "estimated_liquidation_price": null,
                    "floating_profit_loss": 0.0000012,
                    "index_price": 92470.11,
                    "initial_margin": 0.000011,
                    "instrument_name": "BTC-PERPETUAL",
                    "interest_value": 0.5,
                    "kind": "future",
                    "leverage": 50,
                    "maintenance_margin": 0.0000055,
                    "mark_price": 92499.87,
                    "open_orders_margin": 0.0,
                    "realized_funding": 0.0,
                    "realized_profit_loss": 0.0,
                    "settlement_price": 92300.0,
                    "size": 100,
                    "size_currency": 0.0011,
                    "total_profit_loss": 0.0000012
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::new("tok").expect("session");
        let reply = client_for(&server)
            .get_position(
                &session,
                &PositionRequest {
                    instrument_name: "BTC-PERPETUAL".to_string(),
                },
            )
            .await
            .expect("get_position failed");

        let position = reply.value;
        assert_eq!(position.direction, Some(Direction::Buy));
        assert_eq!(position.kind, Some(InstrumentKind::Future));
        assert_eq!(position.size, Some(Decimal::from(100)));
        assert_eq!(position.leverage, Some(Decimal::from(50)));
        assert_eq!(position.estimated_liquidation_price, None);
        assert_eq!(position.settlement_price, Some(Decimal::from(92300)));
    }

    #[tokio::test]
    async fn test_get_position_missing_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/private/get_position"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.0"})))
            .mount(&server)
            .await;

        let session = Session::new("tok").expect("session");
        let err = client_for(&server)
            .get_position(
                &session,
                &PositionRequest {
                    instrument_name: "BTC-PERPETUAL".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DeribitError::MissingResult { .. }));
    }

    #[tokio::test]
    async fn test_get_open_orders_one_row_per_entry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/private/get_open_orders"))
            .and(body_partial_json(json!({"params": {"kind": "future", "type": "limit"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "result": [
                    {"instrument_name": "BTC-PERPETUAL", "order_id": "BTC-1", "price": 90000.0, "amount": 10.0, "order_state": "open"},
                    {"instrument_name": "ETH-PERPETUAL", "order_id": "ETH-2", "price": "3300", "amount": 1.0},
                    {"instrument_name": "ETH-PERPETUAL", "order_id": "ETH-3", "price": 3310.5, "amount": 2.0}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::new("tok").expect("session");
        let reply = client_for(&server)
            .get_open_orders(&session, &OpenOrdersRequest::default())
            .await
            .expect("get_open_orders failed");

        let orders = reply.value;
        assert_eq!(orders.len(), 3);
        assert_eq!(orders.orders().count(), 2);
        assert_eq!(orders.failures().next().map(|f| f.index), Some(1));

        let third = orders.entries[2].as_ref().expect("third entry");
        assert_eq!(third.order_id, "ETH-3");
        assert_eq!(third.price, Decimal::new(33105, 1));
    }

    #[tokio::test]
    async fn test_get_open_orders_rejects_non_array() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/private/get_open_orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"oops": 1}})))
            .mount(&server)
            .await;

        let session = Session::new("tok").expect("session");
        let err = client_for(&server)
            .get_open_orders(&session, &OpenOrdersRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DeribitError::InvalidResponse(_)));
    }
}
