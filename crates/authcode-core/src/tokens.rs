//! Token response returned by a successful exchange

use crate::error::TokenError;
use std::fmt;

/// Access token issued by the authorization server.
#[derive(Clone)]
pub struct TokenResponse {
    access_token: String,
    token_type: String,
}

impl TokenResponse {
    /// Create a new token response.
    pub fn new(access_token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
        }
    }

    /// Parse the JSON body of a token endpoint response.
    ///
    /// `access_token` is required; `token_type` defaults to `Bearer`. A body
    /// carrying an `error` field is a provider error even on HTTP 200, which
    /// some providers (GitHub among them) do.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, TokenError> {
        if let Some(err) = provider_error(json) {
            return Err(TokenError::Provider(err));
        }

        let access_token = json
            .get("access_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| TokenError::MissingField("access_token".to_string()))?;

        let token_type = json
            .get("token_type")
            .and_then(|v| v.as_str())
            .unwrap_or("Bearer");

        Ok(TokenResponse::new(access_token, token_type))
    }

    /// Get the access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Get the token type.
    pub fn token_type(&self) -> &str {
        &self.token_type
    }
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"***")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Extract `error_description` (preferred) or `error` from a provider payload.
pub(crate) fn provider_error(json: &serde_json::Value) -> Option<String> {
    let error = json.get("error").and_then(|v| v.as_str())?;
    let description = json
        .get("error_description")
        .and_then(|v| v.as_str())
        .filter(|d| !d.is_empty());
    Some(description.unwrap_or(error).to_string())
}
