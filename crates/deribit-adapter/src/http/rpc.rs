/*
[INPUT]:  Method names, parameter objects, raw response bodies
[OUTPUT]: JSON-RPC 2.0 request envelopes, parsed responses, timed replies
[POS]:    HTTP layer - JSON-RPC envelope shared by every endpoint
[UPDATE]: When the envelope fields or result/error precedence change
*/

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{DeribitError, Result};

pub const JSONRPC_VERSION: &str = "2.0";

/// Outgoing JSON-RPC request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest<P> {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: P,
}

impl<P> RpcRequest<P> {
    pub fn new(id: u64, method: impl Into<String>, params: P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// `error` member of a JSON-RPC response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl RpcErrorObject {
    /// `data.reason`, rendered as text when it is not a string
    pub fn reason(&self) -> Option<String> {
        let reason = self.data.as_ref()?.get("reason")?;
        match reason {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl From<RpcErrorObject> for DeribitError {
    fn from(error: RpcErrorObject) -> Self {
        let reason = error.reason();
        DeribitError::Exchange {
            code: error.code,
            message: error.message,
            reason,
        }
    }
}

/// Incoming JSON-RPC response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
    #[serde(default, rename = "usIn")]
    pub us_in: Option<u64>,
    #[serde(default, rename = "usOut")]
    pub us_out: Option<u64>,
    #[serde(default, rename = "usDiff")]
    pub us_diff: Option<u64>,
    #[serde(default)]
    pub testnet: Option<bool>,
}

impl RpcResponse {
    /// Parse a raw body; malformed JSON is a `Parse` error
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Server-side processing time reported by the exchange
    pub fn server_time(&self) -> Option<Duration> {
        self.us_diff.map(Duration::from_micros)
    }

    /// `error` wins over `result`; neither is `MissingResult`
    pub fn into_result(self, method: &str) -> Result<Value> {
        if let Some(error) = self.error {
            return Err(error.into());
        }
        self.result.ok_or_else(|| DeribitError::MissingResult {
            method: method.to_string(),
        })
    }
}

/// One completed call: extracted value plus what was observed on the wire
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub value: T,
    pub raw: String,
    pub latency: Duration,
    pub request_id: u64,
    pub server_time: Option<Duration>,
}

impl<T> Reply<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        Reply {
            value: f(self.value),
            raw: self.raw,
            latency: self.latency,
            request_id: self.request_id,
            server_time: self.server_time,
        }
    }

    pub fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> Result<Reply<U>> {
        Ok(Reply {
            value: f(self.value)?,
            raw: self.raw,
            latency: self.latency,
            request_id: self.request_id,
            server_time: self.server_time,
        })
    }
}

/// Deserialize a `result` value, attributing shape errors to `method`
pub(crate) fn extract<T: serde::de::DeserializeOwned>(method: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| DeribitError::Extraction {
        method: method.to_string(),
        source,
    })
}
