//! Configuration loading from the environment and `.env` files.
//!
//! Variables are read with a prefix (`OAUTH_` by default):
//!
//! | Variable               | Required | Default |
//! |------------------------|----------|---------|
//! | `OAUTH_PROVIDER`       | yes      |         |
//! | `OAUTH_CLIENT_ID`      | yes      |         |
//! | `OAUTH_CLIENT_SECRET`  | yes      |         |
//! | `OAUTH_AUTH_URL`       | yes      |         |
//! | `OAUTH_TOKEN_URL`      | yes      |         |
//! | `OAUTH_REDIRECT_URI`   | yes      |         |
//! | `OAUTH_SCOPE`          | no       | empty   |
//! | `OAUTH_TIMEOUT_SECS`   | no       | 30      |
//!
//! # Example
//!
//! ```ignore
//! use authcode_core::config::load_dotenv;
//! use authcode_core::ClientConfig;
//!
//! load_dotenv();
//! let config = ClientConfig::from_env()?;
//! ```

use crate::settings::{ClientConfig, Credentials, DEFAULT_TIMEOUT};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Prefix used by [`ClientConfig::from_env`].
pub const DEFAULT_ENV_PREFIX: &str = "OAUTH";

/// Error type for configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable deserialization failed.
    #[error("Configuration error: {0}")]
    Envy(#[from] envy::Error),
    /// A variable is present but unusable.
    #[error("Invalid value for {var}: {reason}")]
    Invalid {
        /// Full variable name.
        var: String,
        /// What is wrong with it.
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct EnvClientConfig {
    provider: String,
    client_id: String,
    client_secret: String,
    auth_url: String,
    token_url: String,
    redirect_uri: String,
    #[serde(default)]
    scope: String,
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Load the client configuration from `OAUTH_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_prefixed(DEFAULT_ENV_PREFIX)
    }

    /// Load the client configuration from `<prefix>_*` variables.
    pub fn from_env_prefixed(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = format!("{}_", prefix.trim_end_matches('_'));
        let raw: EnvClientConfig = envy::prefixed(prefix.as_str()).from_env()?;

        for (name, value) in [
            ("PROVIDER", &raw.provider),
            ("AUTH_URL", &raw.auth_url),
            ("TOKEN_URL", &raw.token_url),
            ("REDIRECT_URI", &raw.redirect_uri),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    var: format!("{}{}", prefix, name),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        let timeout = match raw.timeout_secs {
            Some(0) => {
                return Err(ConfigError::Invalid {
                    var: format!("{}TIMEOUT_SECS", prefix),
                    reason: "must be greater than zero".to_string(),
                })
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        let credentials = Credentials::new(raw.client_id, raw.client_secret, raw.auth_url, raw.token_url)
            .timeout(timeout);

        tracing::debug!(provider = %raw.provider, prefix = %prefix, "Loaded client configuration from environment");

        Ok(ClientConfig::new(raw.provider, credentials, raw.redirect_uri, raw.scope))
    }
}

/// Load variables from a `.env` file in the current directory.
///
/// A missing file is not an error and existing variables are never
/// overridden.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

/// Load variables from a specific file.
pub fn load_dotenv_from<P: AsRef<std::path::Path>>(path: P) -> Result<(), dotenvy::Error> {
    dotenvy::from_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "PROVIDER",
        "CLIENT_ID",
        "CLIENT_SECRET",
        "AUTH_URL",
        "TOKEN_URL",
        "REDIRECT_URI",
        "SCOPE",
        "TIMEOUT_SECS",
    ];

    fn clear(prefix: &str) {
        for var in VARS {
            std::env::remove_var(format!("{}_{}", prefix, var));
        }
    }

    fn set_required(prefix: &str) {
        std::env::set_var(format!("{}_PROVIDER", prefix), "github");
        std::env::set_var(format!("{}_CLIENT_ID", prefix), "id");
        std::env::set_var(format!("{}_CLIENT_SECRET", prefix), "secret");
        std::env::set_var(
            format!("{}_AUTH_URL", prefix),
            "https://github.com/login/oauth/authorize",
        );
        std::env::set_var(
            format!("{}_TOKEN_URL", prefix),
            "https://github.com/login/oauth/access_token",
        );
        std::env::set_var(
            format!("{}_REDIRECT_URI", prefix),
            "https://myapp.com/callback",
        );
    }

    #[test]
    #[serial]
    fn test_from_env_prefixed_defaults() {
        let prefix = "AUTHCODE_TEST_A";
        clear(prefix);
        set_required(prefix);

        let config = ClientConfig::from_env_prefixed(prefix).unwrap();
        assert_eq!(config.provider(), "github");
        assert_eq!(config.scope(), "");
        assert_eq!(config.redirect_uri(), "https://myapp.com/callback");
        assert_eq!(config.credentials().client_id(), "id");
        assert_eq!(config.credentials().get_timeout(), DEFAULT_TIMEOUT);

        clear(prefix);
    }

    #[test]
    #[serial]
    fn test_from_env_prefixed_optional_values() {
        let prefix = "AUTHCODE_TEST_B";
        clear(prefix);
        set_required(prefix);
        std::env::set_var(format!("{}_SCOPE", prefix), "read:user repo");
        std::env::set_var(format!("{}_TIMEOUT_SECS", prefix), "5");

        // Trailing underscore in the prefix is tolerated.
        let config = ClientConfig::from_env_prefixed("AUTHCODE_TEST_B_").unwrap();
        assert_eq!(config.scope(), "read:user repo");
        assert_eq!(config.credentials().get_timeout(), Duration::from_secs(5));

        clear(prefix);
    }

    #[test]
    #[serial]
    fn test_from_env_missing_variable() {
        let prefix = "AUTHCODE_TEST_C";
        clear(prefix);
        set_required(prefix);
        std::env::remove_var(format!("{}_CLIENT_SECRET", prefix));

        let result = ClientConfig::from_env_prefixed(prefix);
        assert!(matches!(result, Err(ConfigError::Envy(_))));

        clear(prefix);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_empty_and_zero() {
        let prefix = "AUTHCODE_TEST_D";
        clear(prefix);
        set_required(prefix);
        std::env::set_var(format!("{}_TIMEOUT_SECS", prefix), "0");

        let err = ClientConfig::from_env_prefixed(prefix).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for AUTHCODE_TEST_D_TIMEOUT_SECS: must be greater than zero"
        );

        std::env::remove_var(format!("{}_TIMEOUT_SECS", prefix));
        std::env::set_var(format!("{}_TOKEN_URL", prefix), " ");
        assert!(matches!(
            ClientConfig::from_env_prefixed(prefix),
            Err(ConfigError::Invalid { var, .. }) if var == "AUTHCODE_TEST_D_TOKEN_URL"
        ));

        clear(prefix);
    }
}
