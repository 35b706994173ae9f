/*
[INPUT]:  HTTP client configuration and JSON-RPC methods
[OUTPUT]: Raw responses and typed JSON-RPC results
[POS]:    HTTP layer - JSON-RPC over HTTPS communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod public;
pub mod rpc;
pub mod trade;
pub mod user;

pub use error::{AuthFailure, DeribitError, ErrorKind, Result};
pub use rpc::{Reply, RpcErrorObject, RpcRequest, RpcResponse};

pub use client::{ClientConfig, DeribitClient, MAINNET_BASE_URL, RawReply, TESTNET_BASE_URL};
