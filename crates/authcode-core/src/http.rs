//! Authorization-code grant over plain HTTP

use crate::error::TokenError;
use crate::grant::{AuthorizationCodeGrant, AuthorizeParams, TokenParams};
use crate::settings::Credentials;
use crate::tokens::{provider_error, TokenResponse};
use async_trait::async_trait;

/// Default [`AuthorizationCodeGrant`] talking to the provider's endpoints.
///
/// Client credentials travel in the form body of the token request
/// (`client_secret_post`).
#[derive(Debug, Clone)]
pub struct HttpGrant {
    credentials: Credentials,
    http: reqwest::Client,
}

impl HttpGrant {
    /// Create a grant for the given credentials.
    pub fn new(credentials: Credentials) -> Result<Self, TokenError> {
        let http = reqwest::Client::builder()
            .timeout(credentials.timeout)
            .build()
            .map_err(|e| TokenError::Network(e.to_string()))?;

        Ok(Self { credentials, http })
    }

    /// Get the credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[async_trait]
impl AuthorizationCodeGrant for HttpGrant {
    fn authorize_url(&self, params: &AuthorizeParams<'_>) -> String {
        let mut query = vec![
            ("response_type", "code"),
            ("client_id", self.credentials.client_id.as_str()),
            ("redirect_uri", params.redirect_uri),
        ];
        if !params.scope.is_empty() {
            query.push(("scope", params.scope));
        }
        query.push(("state", params.state));

        let base = &self.credentials.auth_url;
        let separator = if base.contains('?') { '&' } else { '?' };
        format!("{}{}{}", base, separator, encode_pairs(&query))
    }

    async fn exchange_code(&self, params: &TokenParams<'_>) -> Result<TokenResponse, TokenError> {
        let form = encode_pairs(&[
            ("grant_type", "authorization_code"),
            ("code", params.code),
            ("redirect_uri", params.redirect_uri),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ]);

        let response = self
            .http
            .post(&self.credentials.token_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .body(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|json| provider_error(&json));

            return Err(match error {
                Some(message) => TokenError::Provider(message),
                None if body.trim().is_empty() => TokenError::ExchangeFailed(status.to_string()),
                None => TokenError::ExchangeFailed(body),
            });
        }

        let json: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| TokenError::InvalidResponse(e.to_string()))?;

        TokenResponse::from_json(&json)
    }
}

fn encode_pairs(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
