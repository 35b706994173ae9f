/*
[INPUT]:  `result` members of JSON-RPC responses
[OUTPUT]: Typed response wrappers with per-entry extraction
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::models::OpenOrder;

/// An open-order entry whose fields did not have the expected JSON types
#[derive(Error, Debug)]
#[error("open order #{index} could not be read: {source}")]
pub struct EntryError {
    pub index: usize,
    pub raw: Value,
    #[source]
    pub source: serde_json::Error,
}

/// `private/get_open_orders` result, one entry per array element
#[derive(Debug, Default)]
pub struct OpenOrders {
    pub entries: Vec<Result<OpenOrder, EntryError>>,
}

impl OpenOrders {
    /// Extract every element on its own; a bad element never fails the others
    pub fn from_entries(values: Vec<Value>) -> Self {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                let parsed = OpenOrder::deserialize(&raw);
                parsed.map_err(|source| EntryError { index, raw, source })
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn orders(&self) -> impl Iterator<Item = &OpenOrder> {
        self.entries.iter().filter_map(|entry| entry.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryError> {
        self.entries.iter().filter_map(|entry| entry.as_ref().err())
    }
}

/// `public/auth` result; only `access_token` is required
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AuthResult {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}
