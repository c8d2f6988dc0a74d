//! Seam between the client and whatever performs the OAuth2 exchange

use crate::error::TokenError;
use crate::tokens::TokenResponse;
use async_trait::async_trait;

/// Parameters for building the authorization URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizeParams<'a> {
    /// Where the provider redirects back to.
    pub redirect_uri: &'a str,
    /// Requested scope, passed through as configured.
    pub scope: &'a str,
    /// CSRF state bound to the caller's session.
    pub state: &'a str,
}

/// Parameters for exchanging an authorization code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenParams<'a> {
    /// Must match the redirect URI used when authorizing.
    pub redirect_uri: &'a str,
    /// Authorization code from the callback.
    pub code: &'a str,
}

/// The two capabilities the client needs from an OAuth2 implementation.
#[async_trait]
pub trait AuthorizationCodeGrant: Send + Sync {
    /// Build the URL the user is redirected to.
    fn authorize_url(&self, params: &AuthorizeParams<'_>) -> String;

    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, params: &TokenParams<'_>) -> Result<TokenResponse, TokenError>;
}

#[async_trait]
impl<G> AuthorizationCodeGrant for std::sync::Arc<G>
where
    G: AuthorizationCodeGrant + ?Sized,
{
    fn authorize_url(&self, params: &AuthorizeParams<'_>) -> String {
        (**self).authorize_url(params)
    }

    async fn exchange_code(&self, params: &TokenParams<'_>) -> Result<TokenResponse, TokenError> {
        (**self).exchange_code(params).await
    }
}
