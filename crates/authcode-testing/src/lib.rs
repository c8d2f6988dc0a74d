//! Testing utilities for authcode
//!
//! # Mock provider
//!
//! [`MockProvider`] runs a local OAuth2 token endpoint on a random port so
//! the HTTP grant can be exercised end to end without a real provider.
//!
//! ```rust,no_run
//! use authcode_testing::{MockProvider, MockResponse};
//!
//! # async fn run() {
//! let provider = MockProvider::start().await;
//! provider.respond_with(MockResponse::token("access-123"));
//!
//! // point the client's token URL at `provider.token_url()` ...
//!
//! provider.verify_calls(1);
//! # }
//! ```

pub mod provider;
pub mod response;

pub use provider::{MockProvider, TokenRequest, AUTHORIZE_PATH, TOKEN_PATH};
pub use response::MockResponse;
