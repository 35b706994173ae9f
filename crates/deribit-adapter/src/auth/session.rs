/*
[INPUT]:  Access tokens and expiry returned by `public/auth`
[OUTPUT]: Immutable bearer session shared by concurrent operations
[POS]:    Auth layer - token lifetime
[UPDATE]: When adding token refresh or changing session contents
*/

use chrono::{DateTime, TimeDelta, Utc};

use crate::http::AuthFailure;

/// Authenticated session; read-only once established
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    access_token: String,
    pub token_type: String,
    pub scope: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A session can only exist with a non-empty token
    pub fn new(access_token: impl Into<String>) -> Result<Self, AuthFailure> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(AuthFailure::Rejected {
                message: "access_token is empty".to_string(),
            });
        }
        Ok(Self {
            access_token,
            token_type: "bearer".to_string(),
            scope: None,
            refresh_token: None,
            expires_at: None,
        })
    }

    /// A lifetime too large to represent leaves the session without expiry.
    pub fn with_expiry(mut self, expires_in_seconds: u64) -> Self {
        self.expires_at = i64::try_from(expires_in_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));
        self
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Check if token is expired; sessions without expiry never expire
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() > expires_at,
            None => false,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
