//! Client configuration.
//!
//! Provides the configuration object for the API client: base URL, API key,
//! account identifier, and request timeout. The configuration is constructed
//! once at startup and passed by reference to every request-issuing
//! component; there is no process-wide mutable state.

use std::time::Duration;
use thiserror::Error;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the account identifier on every request.
pub const ACCOUNT_HEADER: &str = "Harness-Account";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration value is empty.
    #[error("Missing required configuration value: {0}")]
    MissingValue(&'static str),
}

/// Configuration for the access-control API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL for the service (e.g., "https://app.harness.io").
    pub base_url: String,

    /// API key (PAT or SAT token) sent in the `x-api-key` header.
    pub api_key: String,

    /// Account identifier, sent in the `Harness-Account` header and as the
    /// `accountIdentifier` query parameter on every scoped request.
    pub account_identifier: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Create a configuration with the default timeout.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        account_identifier: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            account_identifier: account_identifier.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Build a full URL by appending a path to the base URL.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate that all required configuration is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("base_url"));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingValue("api_key"));
        }
        if self.account_identifier.trim().is_empty() {
            return Err(ConfigError::MissingValue("account_identifier"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ApiConfig::new("https://app.example.io", "key", "acct");
        assert_eq!(config.url("/v1/orgs"), "https://app.example.io/v1/orgs");
        assert_eq!(config.url("v1/orgs"), "https://app.example.io/v1/orgs");
    }

    #[test]
    fn test_url_joining_trailing_slash() {
        let config = ApiConfig::new("https://app.example.io/", "key", "acct");
        assert_eq!(config.url("/v1/orgs"), "https://app.example.io/v1/orgs");
    }

    #[test]
    fn test_default_timeout() {
        let config = ApiConfig::new("https://app.example.io", "key", "acct");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validate() {
        let config = ApiConfig::new("https://app.example.io", "key", "acct");
        assert!(config.validate().is_ok());

        let missing_key = ApiConfig::new("https://app.example.io", "", "acct");
        assert!(missing_key.validate().is_err());

        let missing_account = ApiConfig::new("https://app.example.io", "key", "  ");
        assert!(missing_account.validate().is_err());
    }
}
