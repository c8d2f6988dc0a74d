//! Client configuration

use std::fmt;
use std::time::Duration;

/// Default timeout for requests to the token endpoint.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials and endpoints handed to the grant implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Client ID issued by the provider.
    pub(crate) client_id: String,
    /// Client secret issued by the provider.
    pub(crate) client_secret: String,
    /// Authorization endpoint URL.
    pub(crate) auth_url: String,
    /// Token endpoint URL.
    pub(crate) token_url: String,
    /// Timeout for HTTP requests.
    pub(crate) timeout: Duration,
}

impl Credentials {
    /// Create credentials for a provider's endpoints.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        auth_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_url: auth_url.into(),
            token_url: token_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the client ID.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Get the client secret.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Get the authorization endpoint.
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Get the token endpoint.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Get the request timeout.
    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Immutable configuration of an [`AuthClient`](crate::AuthClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub(crate) provider: String,
    pub(crate) credentials: Credentials,
    pub(crate) redirect_uri: String,
    pub(crate) scope: String,
}

impl ClientConfig {
    /// Create a configuration.
    ///
    /// `scope` is passed to the provider verbatim, so use the provider's own
    /// separator (usually a space).
    pub fn new(
        provider: impl Into<String>,
        credentials: Credentials,
        redirect_uri: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            credentials,
            redirect_uri: redirect_uri.into(),
            scope: scope.into(),
        }
    }

    /// Get the provider name.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Get the credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get the redirect URI.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Get the scope.
    pub fn scope(&self) -> &str {
        &self.scope
    }
}
