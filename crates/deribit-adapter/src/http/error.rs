/*
[INPUT]:  Error sources (transport, JSON parsing, auth, exchange-reported errors, task joins)
[OUTPUT]: Structured error types with a diagnostic classification
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the Deribit adapter
#[derive(Error, Debug)]
pub enum DeribitError {
    /// No response body could be obtained (DNS, TLS, reset, connect timeout)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body is not valid JSON
    #[error("Malformed JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthFailure),

    /// Exchange answered with a JSON-RPC `error` object
    #[error("{}", exchange_display(.code, .message, .reason))]
    Exchange {
        code: Option<i64>,
        message: String,
        reason: Option<String>,
    },

    /// Well-formed response carrying neither `result` nor `error`
    #[error("Response to {method} carried neither result nor error")]
    MissingResult { method: String },

    /// `result` present but not of the expected shape
    #[error("Unexpected result shape for {method}: {source}")]
    Extraction {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    /// Response violates the JSON-RPC envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A dispatched task panicked or was aborted before producing an outcome
    #[error("Dispatched task failed: {0}")]
    TaskJoin(String),
}

/// Reasons `public/auth` did not yield a usable session
#[derive(Error, Debug)]
pub enum AuthFailure {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("malformed auth response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("rejected: {message}")]
    Rejected { message: String },
}

/// Coarse classification used for diagnostics and log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TransportFailure,
    ParseFailure,
    AuthRejected,
    ExchangeError,
    MissingResult,
    Config,
    TaskFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::TransportFailure => "transport_failure",
            ErrorKind::ParseFailure => "parse_failure",
            ErrorKind::AuthRejected => "auth_rejected",
            ErrorKind::ExchangeError => "exchange_error",
            ErrorKind::MissingResult => "missing_result",
            ErrorKind::Config => "config",
            ErrorKind::TaskFailure => "task_failure",
        }
    }
}

impl DeribitError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeribitError::Transport(_) => ErrorKind::TransportFailure,
            DeribitError::Parse(_)
            | DeribitError::Extraction { .. }
            | DeribitError::InvalidResponse(_) => ErrorKind::ParseFailure,
            DeribitError::Auth(failure) => match failure {
                AuthFailure::Transport(_) => ErrorKind::TransportFailure,
                AuthFailure::MalformedResponse(_) => ErrorKind::ParseFailure,
                AuthFailure::Rejected { .. } => ErrorKind::AuthRejected,
            },
            DeribitError::Exchange { .. } => ErrorKind::ExchangeError,
            DeribitError::MissingResult { .. } => ErrorKind::MissingResult,
            DeribitError::UrlParse(_) | DeribitError::Config(_) => ErrorKind::Config,
            DeribitError::TaskJoin(_) => ErrorKind::TaskFailure,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, DeribitError::Auth(_))
    }

    /// Exchange-reported message and optional reason, if this is an exchange error
    pub fn exchange_message(&self) -> Option<(&str, Option<&str>)> {
        match self {
            DeribitError::Exchange {
                message, reason, ..
            } => Some((message.as_str(), reason.as_deref())),
            _ => None,
        }
    }
}

fn exchange_display(code: &Option<i64>, message: &str, reason: &Option<String>) -> String {
    let mut text = match code {
        Some(code) => format!("Exchange error (code {code}): {message}"),
        None => format!("Exchange error: {message}"),
    };
    if let Some(reason) = reason {
        text.push_str(&format!(" (reason: {reason})"));
    }
    text
}

/// Result type alias for Deribit operations
pub type Result<T> = std::result::Result<T, DeribitError>;
