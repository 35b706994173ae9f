/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Deribit adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod dispatch;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{AuthManager, AuthScope, Credentials, Session};

// Re-export commonly used types from http
pub use http::{
    AuthFailure,
    ClientConfig,
    DeribitClient,
    DeribitError,
    ErrorKind,
    Reply,
    Result,
};

// Re-export commonly used types from dispatch
pub use dispatch::{
    DispatchReport,
    Dispatcher,
    JoinPolicy,
    Operation,
    OperationOutput,
    OperationRunner,
    TaskOutcome,
    TaskSpec,
};

// Re-export all types
pub use types::*;
