//! Query parameters the provider sends back on redirect

use serde::{Deserialize, Serialize};

/// Parameters of the provider's redirect back to the client.
///
/// All fields are optional: a successful redirect carries `code` and
/// `state`, a failed one `error` (and usually `error_description`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackParams {
    /// Authorization code to exchange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// OAuth2 error code reported by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable error description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    /// Echoed CSRF state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl CallbackParams {
    /// Parameters of a successful redirect.
    pub fn with_code(code: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            state: Some(state.into()),
            ..Default::default()
        }
    }

    /// Parse a raw query string, e.g. `code=abc&state=xyz`.
    ///
    /// A leading `?` is skipped and unknown keys are ignored. A query that
    /// does not parse (e.g. a repeated key) yields empty parameters, which
    /// the state check then rejects.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        serde_urlencoded::from_str(query).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "Malformed callback query");
            Self::default()
        })
    }

    /// Parse the query part of a full callback URL.
    ///
    /// Input without a `?` is treated as a bare query string. Any fragment
    /// is dropped.
    pub fn from_url(url: &str) -> Self {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        match url.split_once('?') {
            Some((_, query)) => Self::from_query(query),
            None => Self::from_query(url),
        }
    }

    /// Provider error message, preferring the description over the code.
    pub fn provider_error(&self) -> Option<&str> {
        let error = self.error.as_deref()?;
        Some(
            self.error_description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(error),
        )
    }
}
