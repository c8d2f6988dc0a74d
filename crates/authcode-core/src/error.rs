//! Errors produced while talking to the authorization server

use thiserror::Error;

/// Errors that can occur during the authorization-code flow.
///
/// These never cross [`AuthClient::access_token`](crate::AuthClient::access_token);
/// the client folds them into error envelopes. Grant implementations and the
/// lower-level helpers return them directly.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The callback state does not match the state issued for the session.
    #[error("CSRF detected")]
    InvalidState,

    /// The provider reported an error (on the redirect or in the token response).
    #[error("{0}")]
    Provider(String),

    /// Token exchange was rejected by the authorization server.
    #[error("Token exchange failed: {0}")]
    ExchangeFailed(String),

    /// Network or transport error.
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid response from the authorization server.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing required field in a response or callback.
    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[cfg(feature = "http-grant")]
impl From<reqwest::Error> for TokenError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TokenError::InvalidResponse(err.to_string())
        } else {
            TokenError::Network(err.to_string())
        }
    }
}
