//! # authcode-core
//!
//! OAuth2 authorization-code client that binds the `state` parameter to a
//! caller-supplied session identifier and normalizes every outcome of the
//! token exchange into a uniform success/error envelope.
//!
//! The protocol exchange itself sits behind [`AuthorizationCodeGrant`]. The
//! crate ships an HTTP implementation ([`HttpGrant`], feature `http-grant`)
//! and anything else implementing the trait can be injected with
//! [`AuthClient::with_grant`].
//!
//! ## Features
//!
//! - `http-grant` - [`HttpGrant`], the default collaborator built on `reqwest`
//! - `config` - environment and `.env` configuration loading
//!
//! ## Example
//!
//! ```rust,no_run
//! use authcode_core::{AuthClient, CallbackParams, ClientConfig, Credentials};
//!
//! # async fn run() -> Result<(), authcode_core::TokenError> {
//! let credentials = Credentials::new(
//!     "client_id",
//!     "client_secret",
//!     "https://github.com/login/oauth/authorize",
//!     "https://github.com/login/oauth/access_token",
//! );
//! let config = ClientConfig::new(
//!     "github",
//!     credentials,
//!     "https://myapp.com/auth/callback",
//!     "read:user",
//! );
//! let client = AuthClient::new(config)?;
//!
//! // Redirect the user here; `session_id` must be stable across both steps.
//! let url = client.authorize_url("session-id");
//!
//! // Later, on the callback route:
//! let params = CallbackParams::from_query("code=abc&state=...");
//! let envelope = client.access_token("session-id", &params).await;
//! if envelope.is_success() {
//!     // hand the token to the caller
//! }
//! # let _ = url;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod callback;
mod client;
mod envelope;
mod error;
mod grant;
mod settings;
mod state;
mod tokens;

#[cfg(feature = "http-grant")]
mod http;

// Environment configuration loading
#[cfg(feature = "config")]
pub mod config;

pub use callback::CallbackParams;
pub use client::AuthClient;
pub use envelope::{ErrorContent, ResponseEnvelope, SuccessContent, CSRF_DETECTED};
pub use error::TokenError;
pub use grant::{AuthorizationCodeGrant, AuthorizeParams, TokenParams};
pub use settings::{ClientConfig, Credentials, DEFAULT_TIMEOUT};
pub use state::{hash_session_id, StateToken};
pub use tokens::TokenResponse;

#[cfg(feature = "http-grant")]
pub use http::HttpGrant;
