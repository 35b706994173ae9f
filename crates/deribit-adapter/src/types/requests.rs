/*
[INPUT]:  Caller-supplied instrument names, order ids, decimal prices and amounts
[OUTPUT]: JSON-RPC `params` objects with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{InstrumentKind, OrderType};

// Prices and amounts are Decimal in memory and JSON numbers on the wire.

/// `private/buy`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub instrument_name: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PlaceOrderRequest {
    pub fn limit(instrument_name: impl Into<String>, price: Decimal, amount: Decimal) -> Self {
        Self {
            instrument_name: instrument_name.into(),
            order_type: OrderType::Limit,
            price,
            amount,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// `private/edit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyOrderRequest {
    pub order_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// `private/cancel`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    pub order_id: String,
}

/// `public/get_order_book`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookRequest {
    pub instrument_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

impl OrderBookRequest {
    pub fn new(instrument_name: impl Into<String>) -> Self {
        Self {
            instrument_name: instrument_name.into(),
            depth: None,
        }
    }
}

/// `private/get_position`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRequest {
    pub instrument_name: String,
}

/// `private/get_open_orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrdersRequest {
    pub kind: InstrumentKind,
    #[serde(rename = "type")]
    pub order_type: OrderType,
}

impl Default for OpenOrdersRequest {
    fn default() -> Self {
        Self {
            kind: InstrumentKind::Future,
            order_type: OrderType::Limit,
        }
    }
}

/// `public/auth` with the client_credentials grant
#[derive(Clone, PartialEq, Serialize)]
pub struct AuthRequest {
    pub grant_type: &'static str,
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
}

impl std::fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRequest")
            .field("grant_type", &self.grant_type)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}
