//! Session-bound CSRF state

use std::fmt;

/// Hash a session identifier into the opaque `state` value sent to the provider.
///
/// The digest is the lowercase hex MD5 of the UTF-8 bytes, so existing
/// deployments comparing against stored states keep working:
///
/// ```
/// assert_eq!(
///     authcode_core::hash_session_id("foobar"),
///     "3858f62230ac3c915f300c664312c63f"
/// );
/// ```
pub fn hash_session_id(session_id: &str) -> String {
    format!("{:x}", md5::compute(session_id.as_bytes()))
}

/// CSRF state token derived from a session identifier.
///
/// Only ever compared for equality; it is never reversed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StateToken(String);

impl StateToken {
    /// Derive the state token for a session.
    pub fn for_session(session_id: &str) -> Self {
        Self(hash_session_id(session_id))
    }

    /// Get the state value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check a state value received on the callback.
    ///
    /// A missing value never matches.
    pub fn verify(&self, received: Option<&str>) -> bool {
        match received {
            Some(received) => constant_time_eq(self.0.as_bytes(), received.as_bytes()),
            None => false,
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl fmt::Debug for StateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateToken").field(&self.0).finish()
    }
}

impl fmt::Display for StateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for StateToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
