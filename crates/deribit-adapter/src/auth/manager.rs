/*
[INPUT]:  Client credentials and HTTP client
[OUTPUT]: Authenticated session (bearer token) or a classified AuthFailure
[POS]:    Auth layer - orchestrates the client_credentials flow
[UPDATE]: When auth endpoints or flow steps change
*/

use std::sync::Arc;

use serde_json::Value;

use crate::http::rpc::RpcErrorObject;
use crate::http::{AuthFailure, DeribitClient, DeribitError, Result};
use crate::types::{AuthRequest, AuthResult};

use super::{Credentials, Session};

pub const AUTH_METHOD: &str = "public/auth";
const DEFAULT_SESSION_NAME: &str = "apiconsole";
const DEFAULT_EXPIRES_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Requested token scope: `session:<name> expires:<seconds>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthScope {
    pub session_name: String,
    pub expires_seconds: u64,
}

impl Default for AuthScope {
    fn default() -> Self {
        Self {
            session_name: DEFAULT_SESSION_NAME.to_string(),
            expires_seconds: DEFAULT_EXPIRES_SECONDS,
        }
    }
}

impl std::fmt::Display for AuthScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "session:{} expires:{}",
            self.session_name, self.expires_seconds
        )
    }
}

/// Runs `public/auth` once and turns the answer into a [`Session`]
#[derive(Debug, Clone)]
pub struct AuthManager {
    client: Arc<DeribitClient>,
    scope: AuthScope,
}

impl AuthManager {
    pub fn new(client: Arc<DeribitClient>) -> Self {
        Self::with_scope(client, AuthScope::default())
    }

    pub fn with_scope(client: Arc<DeribitClient>, scope: AuthScope) -> Self {
        Self { client, scope }
    }

    pub fn scope(&self) -> &AuthScope {
        &self.scope
    }

    /// POST /public/auth with `grant_type=client_credentials`, no bearer token
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        let request = AuthRequest {
            grant_type: "client_credentials",
            client_id: credentials.client_id().to_string(),
            client_secret: credentials.client_secret().to_string(),
            scope: self.scope.to_string(),
        };

        let raw = self
            .client
            .exchange(AUTH_METHOD, request, None, false)
            .await
            .map_err(|err| match err {
                DeribitError::Transport(source) => AuthFailure::Transport(source).into(),
                other => other,
            })?;

        let session = session_from_response(&raw.body).inspect_err(|failure| {
            tracing::warn!(error = %failure, "authentication failed");
        })?;

        tracing::info!(
            client_id = credentials.client_id(),
            scope = session.scope.as_deref().unwrap_or_default(),
            latency_ms = raw.latency.as_secs_f64() * 1000.0,
            "session established"
        );
        Ok(session)
    }
}

/// Classify a `public/auth` body: not JSON is `MalformedResponse`, anything
/// without a non-empty `result.access_token` is `Rejected`.
pub fn session_from_response(body: &str) -> std::result::Result<Session, AuthFailure> {
    let value: Value = serde_json::from_str(body).map_err(AuthFailure::MalformedResponse)?;

    if let Some(error) = value.get("error").filter(|error| !error.is_null()) {
        let error: RpcErrorObject =
            serde_json::from_value(error.clone()).map_err(AuthFailure::MalformedResponse)?;
        let message = match error.reason() {
            Some(reason) => format!("{} ({reason})", error.message),
            None => error.message,
        };
        return Err(AuthFailure::Rejected { message });
    }

    let result = value
        .get("result")
        .filter(|result| result.is_object())
        .ok_or_else(|| AuthFailure::Rejected {
            message: "response carried no result".to_string(),
        })?;
    let result: AuthResult = serde_json::from_value(result.clone()).map_err(|_| {
        AuthFailure::Rejected {
            message: "result fields have unexpected types".to_string(),
        }
    })?;

    let access_token = result.access_token.ok_or_else(|| AuthFailure::Rejected {
        message: "result carried no access_token".to_string(),
    })?;

    let mut session = Session::new(access_token)?;
    if let Some(token_type) = result.token_type {
        session.token_type = token_type;
    }
    session.scope = result.scope;
    session.refresh_token = result.refresh_token;
    if let Some(expires_in) = result.expires_in {
        session = session.with_expiry(expires_in);
    }
    Ok(session)
}
