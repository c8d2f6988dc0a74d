//! Uniform success/error envelope
//!
//! Serializes to the wire shape existing callers branch on:
//!
//! ```json
//! {"message": "success", "content": {"token": "...", "provider": "..."}}
//! {"message": "error", "content": {"message": "..."}}
//! ```

use serde::{Deserialize, Serialize};

/// Message carried by the envelope when the callback state does not match.
pub const CSRF_DETECTED: &str = "CSRF detected";

/// Outcome of an authorization-code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "message", content = "content")]
pub enum ResponseEnvelope {
    /// The exchange produced an access token.
    #[serde(rename = "success")]
    Success(SuccessContent),
    /// The flow failed; `content.message` says why.
    #[serde(rename = "error")]
    Error(ErrorContent),
}

/// Payload of a success envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessContent {
    /// The access token.
    pub token: String,
    /// Name of the provider that issued it.
    pub provider: String,
}

/// Payload of an error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorContent {
    /// Human-readable error message.
    pub message: String,
}

impl ResponseEnvelope {
    /// Build a success envelope.
    pub fn success(token: impl Into<String>, provider: impl Into<String>) -> Self {
        Self::Success(SuccessContent {
            token: token.into(),
            provider: provider.into(),
        })
    }

    /// Build an error envelope from anything displayable.
    ///
    /// Plain strings and error values normalize the same way: their
    /// `Display` output becomes `content.message`.
    pub fn error(err: impl std::fmt::Display) -> Self {
        Self::Error(ErrorContent {
            message: err.to_string(),
        })
    }

    /// Build the CSRF mismatch envelope.
    pub fn csrf_detected() -> Self {
        Self::error(CSRF_DETECTED)
    }

    /// Check whether this is a success envelope.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The `message` discriminator: `"success"` or `"error"`.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }

    /// Access token of a success envelope.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Success(content) => Some(&content.token),
            Self::Error(_) => None,
        }
    }

    /// Error message of an error envelope.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error(content) => Some(&content.message),
        }
    }

    /// Serialize to the JSON wire shape.
    pub fn to_json(&self) -> serde_json::Value {
        // Both variants are plain string structs.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl From<crate::TokenError> for ResponseEnvelope {
    fn from(err: crate::TokenError) -> Self {
        Self::error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_wire_shape() {
        let envelope = ResponseEnvelope::success("foo", "mock-provider");
        assert_eq!(
            envelope.to_json(),
            json!({
                "message": "success",
                "content": { "token": "foo", "provider": "mock-provider" }
            })
        );
        assert_eq!(envelope.message(), "success");
        assert_eq!(envelope.token(), Some("foo"));
        assert_eq!(envelope.error_message(), None);
    }

    #[test]
    fn test_error_wire_shape() {
        let envelope = ResponseEnvelope::csrf_detected();
        assert_eq!(
            envelope.to_json(),
            json!({ "message": "error", "content": { "message": "CSRF detected" } })
        );
        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), "error");
    }

    #[test]
    fn test_deserialize_existing_payload() {
        let payload = r#"{"message":"error","content":{"message":"bar"}}"#;
        let envelope: ResponseEnvelope = serde_json::from_str(payload).unwrap();
        assert_eq!(envelope.error_message(), Some("bar"));
    }

    #[test]
    fn test_unknown_message_rejected() {
        let payload = r#"{"message":"pending","content":{"message":"bar"}}"#;
        assert!(serde_json::from_str::<ResponseEnvelope>(payload).is_err());
    }

    #[test]
    fn test_from_token_error() {
        let envelope = ResponseEnvelope::from(crate::TokenError::InvalidState);
        assert_eq!(envelope.error_message(), Some(CSRF_DETECTED));
    }
}
