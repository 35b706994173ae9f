/*
[INPUT]:  Client credentials and requested scope
[OUTPUT]: Bearer sessions and auth errors
[POS]:    Auth layer - handles Deribit API authentication
[UPDATE]: When auth flow or grant types change
*/

pub mod credentials;
pub mod manager;
pub mod session;

pub use credentials::Credentials;
pub use manager::{AuthManager, AuthScope, session_from_response};
pub use session::Session;
