/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{Direction, InstrumentKind};

/// One `[price, amount]` ladder entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookLevel(pub Decimal, pub Decimal);

impl BookLevel {
    pub fn price(&self) -> Decimal {
        self.0
    }

    pub fn amount(&self) -> Decimal {
        self.1
    }
}

/// `public/get_order_book` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub instrument_name: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub best_bid_price: Option<Decimal>,
    #[serde(default)]
    pub best_bid_amount: Option<Decimal>,
    #[serde(default)]
    pub best_ask_price: Option<Decimal>,
    #[serde(default)]
    pub best_ask_amount: Option<Decimal>,
    #[serde(default)]
    pub bids: Vec<BookLevel>,
    #[serde(default)]
    pub asks: Vec<BookLevel>,
    #[serde(default)]
    pub mark_price: Option<Decimal>,
    #[serde(default)]
    pub index_price: Option<Decimal>,
    #[serde(default)]
    pub last_price: Option<Decimal>,
    #[serde(default)]
    pub open_interest: Option<Decimal>,
    #[serde(default)]
    pub change_id: Option<u64>,
}

impl OrderBook {
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(DateTime::from_timestamp_millis)
    }

    /// Best ask minus best bid, when both sides are quoted
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask_price? - self.best_bid_price?)
    }
}

/// `private/get_position` result.
///
/// Every field is optional: a missing or null field leaves only that
/// field empty instead of failing the whole position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub instrument_name: Option<String>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub kind: Option<InstrumentKind>,
    #[serde(default)]
    pub size: Option<Decimal>,
    #[serde(default)]
    pub size_currency: Option<Decimal>,
    #[serde(default)]
    pub average_price: Option<Decimal>,
    #[serde(default)]
    pub mark_price: Option<Decimal>,
    #[serde(default)]
    pub index_price: Option<Decimal>,
    #[serde(default)]
    pub settlement_price: Option<Decimal>,
    #[serde(default)]
    pub estimated_liquidation_price: Option<Decimal>,
    #[serde(default)]
    pub delta: Option<Decimal>,
    #[serde(default)]
    pub leverage: Option<Decimal>,
    #[serde(default)]
    pub interest_value: Option<Decimal>,
    #[serde(default)]
    pub open_orders_margin: Option<Decimal>,
    #[serde(default)]
    pub initial_margin: Option<Decimal>,
    #[serde(default)]
    pub maintenance_margin: Option<Decimal>,
    #[serde(default)]
    pub realized_funding: Option<Decimal>,
    #[serde(default)]
    pub realized_profit_loss: Option<Decimal>,
    #[serde(default)]
    pub floating_profit_loss: Option<Decimal>,
    #[serde(default)]
    pub total_profit_loss: Option<Decimal>,
}

/// Summary of one open order.
///
/// Identifiers must be JSON strings and price/amount JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub instrument_name: String,
    pub order_id: String,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_json_number",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub price: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_json_number",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub amount: Decimal,
}

mod serde_helpers {
    use super::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::str::FromStr;

    pub fn deserialize_json_number<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Number(number) => {
                let text = number.to_string();
                Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .map_err(serde::de::Error::custom)
            }
            other => Err(serde::de::Error::custom(format!(
                "expected a JSON number, found {other}"
            ))),
        }
    }
}
