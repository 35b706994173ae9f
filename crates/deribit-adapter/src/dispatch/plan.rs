/*
[INPUT]:  Operation requests chosen by the caller
[OUTPUT]: Task specs with an explicit join policy, per-task outcomes
[POS]:    Dispatch layer - what to run and whether to wait for it
[UPDATE]: When adding operations or join policies
*/

use serde_json::Value;

use crate::http::rpc::Reply;
use crate::http::{Result, public, trade, user};
use crate::types::{
    CancelOrderRequest, ModifyOrderRequest, OpenOrders, OpenOrdersRequest, OrderBook,
    OrderBookRequest, PlaceOrderRequest, Position, PositionRequest,
};

/// One RPC operation with its parameters
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    PlaceOrder(PlaceOrderRequest),
    ModifyOrder(ModifyOrderRequest),
    CancelOrder(CancelOrderRequest),
    GetOrderBook(OrderBookRequest),
    GetPosition(PositionRequest),
    GetOpenOrders(OpenOrdersRequest),
}

impl Operation {
    pub fn method(&self) -> &'static str {
        match self {
            Operation::PlaceOrder(_) => trade::BUY,
            Operation::ModifyOrder(_) => trade::EDIT,
            Operation::CancelOrder(_) => trade::CANCEL,
            Operation::GetOrderBook(_) => public::GET_ORDER_BOOK,
            Operation::GetPosition(_) => user::GET_POSITION,
            Operation::GetOpenOrders(_) => user::GET_OPEN_ORDERS,
        }
    }
}

/// Typed value produced by an [`Operation`]
#[derive(Debug)]
pub enum OperationOutput {
    OrderPlaced(Value),
    OrderModified(Value),
    OrderCancelled(Value),
    OrderBook(OrderBook),
    Position(Position),
    OpenOrders(OpenOrders),
}

/// Whether the dispatcher waits for a task before returning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinPolicy {
    #[default]
    Await,
    /// Fire and forget: the outcome is logged by the task, never returned.
    Detach,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskSpec {
    pub label: String,
    pub operation: Operation,
    pub policy: JoinPolicy,
}

impl TaskSpec {
    pub fn awaited(label: impl Into<String>, operation: Operation) -> Self {
        Self {
            label: label.into(),
            operation,
            policy: JoinPolicy::Await,
        }
    }

    pub fn detached(label: impl Into<String>, operation: Operation) -> Self {
        Self {
            label: label.into(),
            operation,
            policy: JoinPolicy::Detach,
        }
    }
}

/// Outcome of one joined task
#[derive(Debug)]
pub struct TaskOutcome {
    pub label: String,
    pub method: &'static str,
    pub result: Result<Reply<OperationOutput>>,
}
