/*
[INPUT]:  Client id and secret resolved by the caller at startup
[OUTPUT]: Immutable credentials with a redacted Debug representation
[POS]:    Auth layer - client_credentials grant input
[UPDATE]: When adding grant types or credential sources
*/

use crate::http::{DeribitError, Result};

/// API key pair for the `client_credentials` grant
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.trim().is_empty() {
            return Err(DeribitError::Config("client_id must not be empty".to_string()));
        }
        if client_secret.trim().is_empty() {
            return Err(DeribitError::Config(
                "client_secret must not be empty".to_string(),
            ));
        }
        Ok(Self {
            client_id,
            client_secret,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
