/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for deribit-adapter tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use deribit_adapter::{
    ClientConfig, Credentials, DeribitClient, Operation, OperationOutput, OperationRunner, Reply,
    Result, Session,
};
use serde_json::json;
use tokio::sync::Notify;
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client whose base URL is the mock server root
pub fn client_for(server: &MockServer) -> DeribitClient {
    DeribitClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

pub fn test_credentials() -> Credentials {
    Credentials::new("test-client-id", "test-client-secret").expect("credentials")
}

/// Mock bearer token for testing
pub fn mock_access_token() -> String {
    "1582628593469.1MbQ-J_4.CBP-OqOwm_FBdMYj4cRK2dMXyHPfBtXGpzLxhWg31nHu3H_Q60FpE5_vqUBEQGSiMrIGzw3nC37NDLMO1u".to_string()
}

pub fn mock_session() -> Arc<Session> {
    Arc::new(Session::new(mock_access_token()).expect("session"))
}

/// In-memory sink for a fmt subscriber
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer").clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Debug-level subscriber for the current thread, writing into `buffer`
pub fn capture_logs(buffer: &LogBuffer) -> tracing::subscriber::DefaultGuard {
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// How a scripted task behaves
#[derive(Clone)]
pub enum Script {
    /// Succeed after the delay
    After(Duration),
    /// Succeed once the gate is notified
    Gate(Arc<Notify>),
    /// Fail with an exchange error
    Fail(&'static str),
}

/// Runner keyed by the instrument (or order id) an operation targets
#[derive(Default)]
pub struct ScriptedRunner {
    scripts: HashMap<String, Script>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, key: &str, script: Script) -> Self {
        self.scripts.insert(key.to_string(), script);
        self
    }
}

pub fn operation_key(operation: &Operation) -> String {
    match operation {
        Operation::PlaceOrder(req) => req.instrument_name.clone(),
        Operation::GetOrderBook(req) => req.instrument_name.clone(),
        Operation::GetPosition(req) => req.instrument_name.clone(),
        Operation::ModifyOrder(req) => req.order_id.clone(),
        Operation::CancelOrder(req) => req.order_id.clone(),
        Operation::GetOpenOrders(_) => "open-orders".to_string(),
    }
}

#[async_trait]
impl OperationRunner for ScriptedRunner {
    async fn run(&self, _session: &Session, operation: &Operation) -> Result<Reply<OperationOutput>> {
        let key = operation_key(operation);
        match self.scripts.get(&key).cloned() {
            Some(Script::After(delay)) => tokio::time::sleep(delay).await,
            Some(Script::Gate(gate)) => gate.notified().await,
            Some(Script::Fail(message)) => {
                return Err(deribit_adapter::DeribitError::Exchange {
                    code: Some(10009),
                    message: message.to_string(),
                    reason: None,
                });
            }
            None => {}
        }

        Ok(Reply {
            value: OperationOutput::OrderPlaced(json!({"key": key})),
            raw: String::new(),
            latency: Duration::ZERO,
            request_id: 0,
            server_time: None,
        })
    }
}
