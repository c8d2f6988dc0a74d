use bytes::Bytes;
use http::{HeaderValue, StatusCode};
use std::time::Duration;

/// A scripted token endpoint response
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub(crate) status: StatusCode,
    pub(crate) content_type: Option<HeaderValue>,
    pub(crate) body: Bytes,
    pub(crate) delay: Option<Duration>,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::token("mock-access-token")
    }
}

impl MockResponse {
    /// A successful bearer token response carrying `access_token`
    pub fn token(access_token: &str) -> Self {
        Self::json(
            StatusCode::OK,
            serde_json::json!({
                "access_token": access_token,
                "token_type": "Bearer",
                "expires_in": 3600,
            }),
        )
    }

    /// An OAuth2 error response (RFC 6749 section 5.2)
    pub fn oauth_error(status: StatusCode, error: &str, description: Option<&str>) -> Self {
        let mut body = serde_json::json!({ "error": error });
        if let Some(description) = description {
            body["error_description"] = serde_json::Value::from(description);
        }
        Self::json(status, body)
    }

    /// A JSON response with any status
    pub fn json(status: StatusCode, body: impl serde::Serialize) -> Self {
        Self {
            status,
            content_type: Some(HeaderValue::from_static("application/json")),
            body: serde_json::to_vec(&body).unwrap().into(),
            delay: None,
        }
    }

    /// A plain text response with any status
    pub fn text(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: Some(HeaderValue::from_static("text/plain")),
            body: body.into(),
            delay: None,
        }
    }

    /// Hold the response back, e.g. to trip a client timeout
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}
