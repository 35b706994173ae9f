/*
[INPUT]:  HTTP configuration (base URL, connect timeout, keep-alive constants)
[OUTPUT]: Raw response bodies and timed JSON-RPC replies
[POS]:    HTTP layer - core client implementation (transport)
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;

use crate::auth::Session;
use crate::http::rpc::{Reply, RpcRequest, RpcResponse};
use crate::http::{DeribitError, Result};

/// Base URL for the Deribit test environment
pub const TESTNET_BASE_URL: &str = "https://test.deribit.com/api/v2/";
/// Base URL for the Deribit production environment
pub const MAINNET_BASE_URL: &str = "https://www.deribit.com/api/v2/";

const TCP_KEEPALIVE_IDLE: Duration = Duration::from_secs(60);
const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub tcp_keepalive: Duration,
    pub keepalive_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: TESTNET_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            tcp_keepalive: TCP_KEEPALIVE_IDLE,
            keepalive_interval: KEEPALIVE_INTERVAL,
        }
    }
}

/// Raw body of one call plus the id and latency it was sent with
#[derive(Debug, Clone)]
pub struct RawReply {
    pub request_id: u64,
    pub body: String,
    pub latency: Duration,
}

/// Main HTTP client for the Deribit JSON-RPC API
#[derive(Debug)]
pub struct DeribitClient {
    http_client: Client,
    base_url: Url,
    next_id: AtomicU64,
}

impl DeribitClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        // Idle connections are never kept: every call opens and tears down its own.
        let http_client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .tcp_keepalive(config.tcp_keepalive)
            .http2_keep_alive_interval(config.keepalive_interval)
            .http2_keep_alive_while_idle(true)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(&config.base_url)?,
            next_id: AtomicU64::new(1),
        })
    }

    /// Create a client pointed at an explicit base URL (mock servers, mainnet)
    pub fn with_config_and_base_url(mut config: ClientConfig, base_url: &str) -> Result<Self> {
        config.base_url = base_url.to_string();
        Self::with_config(config)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for a JSON-RPC method, e.g. `private/buy`
    fn method_url(&self, method: &str) -> Result<Url> {
        Ok(self.base_url.join(method.trim_start_matches('/'))?)
    }

    pub(crate) fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// POST one JSON body and return the response text as received.
    ///
    /// The bearer header is only attached for a non-empty token. Non-2xx
    /// statuses still return their body, which carries the JSON-RPC error.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: &str,
        body: &B,
        bearer_token: Option<&str>,
    ) -> Result<String> {
        let url = self.method_url(method)?;
        let payload = serde_json::to_vec(body)?;

        let mut builder = self
            .http_client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        if let Some(token) = bearer_token.filter(|token| !token.is_empty()) {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = builder.send().await.map_err(|err| {
            tracing::warn!(method, error = %err, "request failed");
            DeribitError::Transport(err)
        })?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::debug!(method, status = status.as_u16(), "non-success HTTP status");
        }
        Ok(text)
    }

    /// Build the envelope, send it and time the round trip.
    ///
    /// With `log_body` false only the body length is logged; auth replies
    /// carry tokens.
    pub(crate) async fn exchange<P: Serialize>(
        &self,
        method: &str,
        params: P,
        bearer_token: Option<&str>,
        log_body: bool,
    ) -> Result<RawReply> {
        let request_id = self.next_request_id();
        let request = RpcRequest::new(request_id, method, params);

        let started = Instant::now();
        let body = self.send(method, &request, bearer_token).await?;
        let latency = started.elapsed();

        let latency_ms = latency.as_secs_f64() * 1000.0;
        if log_body {
            tracing::debug!(method, request_id, latency_ms, response = %body, "rpc response received");
        } else {
            tracing::debug!(
                method,
                request_id,
                latency_ms,
                response_len = body.len(),
                "rpc response received"
            );
        }

        Ok(RawReply {
            request_id,
            body,
            latency,
        })
    }

    /// Full JSON-RPC call: send, parse, correlate, and split result from error
    pub(crate) async fn call<P: Serialize>(
        &self,
        method: &str,
        params: P,
        session: Option<&Session>,
    ) -> Result<Reply<Value>> {
        let raw = self
            .exchange(method, params, session.map(Session::access_token), true)
            .await?;
        let response = RpcResponse::parse(&raw.body)?;

        if let Some(id) = response.id {
            if id != raw.request_id {
                return Err(DeribitError::InvalidResponse(format!(
                    "response id {id} does not match request id {}",
                    raw.request_id
                )));
            }
        }

        let server_time = response.server_time();
        let value = response.into_result(method).inspect_err(|err| {
            tracing::warn!(
                method,
                request_id = raw.request_id,
                kind = err.kind().as_str(),
                error = %err,
                "rpc call failed"
            );
        })?;

        Ok(Reply {
            value,
            raw: raw.body,
            latency: raw.latency,
            request_id: raw.request_id,
            server_time,
        })
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    // Url::join drops the last segment unless the base ends with '/'.
    let mut base = base_url.trim().to_string();
    if base.is_empty() {
        return Err(DeribitError::Config("base URL must not be empty".to_string()));
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(Url::parse(&base)?)
}
