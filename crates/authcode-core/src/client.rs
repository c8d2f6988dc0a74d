//! Authorization-code client

use crate::callback::CallbackParams;
use crate::envelope::ResponseEnvelope;
use crate::error::TokenError;
use crate::grant::{AuthorizationCodeGrant, AuthorizeParams, TokenParams};
use crate::settings::ClientConfig;
use crate::state::{hash_session_id, StateToken};
use crate::tokens::TokenResponse;
use std::fmt;

/// OAuth2 authorization-code client with session-bound CSRF state.
///
/// The client holds no per-flow state. CSRF protection relies on the caller
/// passing the same session identifier to [`authorize_url`](Self::authorize_url)
/// and [`access_token`](Self::access_token).
#[derive(Debug, Clone)]
pub struct AuthClient<G> {
    config: ClientConfig,
    grant: G,
}

#[cfg(feature = "http-grant")]
impl AuthClient<crate::http::HttpGrant> {
    /// Create a client backed by [`HttpGrant`](crate::HttpGrant) built from
    /// the configured credentials.
    pub fn new(config: ClientConfig) -> Result<Self, TokenError> {
        let grant = crate::http::HttpGrant::new(config.credentials.clone())?;
        Ok(Self::with_grant(config, grant))
    }
}

impl<G: AuthorizationCodeGrant> AuthClient<G> {
    /// Create a client using any grant implementation.
    pub fn with_grant(config: ClientConfig, grant: G) -> Self {
        Self { config, grant }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the grant implementation.
    pub fn grant(&self) -> &G {
        &self.grant
    }

    /// Get the configured provider name.
    pub fn provider(&self) -> &str {
        &self.config.provider
    }

    /// Hash a session identifier into the state sent to the provider.
    pub fn hash_session_id(&self, session_id: &str) -> String {
        hash_session_id(session_id)
    }

    /// Build the authorization URL for a session.
    ///
    /// The state parameter is the hash of `session_id`; redirect URI and
    /// scope are passed through exactly as configured.
    pub fn authorize_url(&self, session_id: &str) -> String {
        let state = StateToken::for_session(session_id);

        tracing::debug!(provider = %self.config.provider, "Building authorization URL");

        self.grant.authorize_url(&AuthorizeParams {
            redirect_uri: &self.config.redirect_uri,
            scope: &self.config.scope,
            state: state.as_str(),
        })
    }

    /// Handle the provider's callback and exchange the code for a token.
    ///
    /// Never fails: every outcome is folded into a [`ResponseEnvelope`].
    /// Checks run in order and the first match wins:
    ///
    /// 1. state mismatch: `CSRF detected`, the grant is not called
    /// 2. provider error on the redirect: its description (or code)
    /// 3. otherwise the code is exchanged; failures carry the error message
    pub async fn access_token(&self, session_id: &str, params: &CallbackParams) -> ResponseEnvelope {
        match self.exchange(session_id, params).await {
            Ok(token) => {
                tracing::info!(provider = %self.config.provider, "Authorization code exchanged");
                self.construct_success_response(&token)
            }
            Err(err) => {
                match &err {
                    TokenError::InvalidState => tracing::warn!(
                        provider = %self.config.provider,
                        "Callback state does not match session, possible CSRF"
                    ),
                    TokenError::Provider(message) => tracing::warn!(
                        provider = %self.config.provider,
                        error = %message,
                        "Provider reported an error"
                    ),
                    other => tracing::warn!(
                        provider = %self.config.provider,
                        error = %other,
                        "Token exchange failed"
                    ),
                }
                self.construct_error_response(err)
            }
        }
    }

    async fn exchange(&self, session_id: &str, params: &CallbackParams) -> Result<TokenResponse, TokenError> {
        let expected = StateToken::for_session(session_id);
        if !expected.verify(params.state.as_deref()) {
            return Err(TokenError::InvalidState);
        }

        if let Some(message) = params.provider_error() {
            return Err(TokenError::Provider(message.to_string()));
        }

        let code = params
            .code
            .as_deref()
            .ok_or_else(|| TokenError::MissingField("code".to_string()))?;

        tracing::debug!(provider = %self.config.provider, "Exchanging authorization code");

        self.grant
            .exchange_code(&TokenParams {
                redirect_uri: &self.config.redirect_uri,
                code,
            })
            .await
    }

    /// Wrap an exchange result's access token in a success envelope.
    pub fn construct_success_response(&self, token: &TokenResponse) -> ResponseEnvelope {
        ResponseEnvelope::success(token.access_token(), self.config.provider.as_str())
    }

    /// Normalize a string or error value into an error envelope.
    pub fn construct_error_response(&self, err: impl fmt::Display) -> ResponseEnvelope {
        ResponseEnvelope::error(err)
    }
}
