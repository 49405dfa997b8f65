//! Configuration for Novita clients.
//!
//! This module resolves the API key (explicit value first, then the
//! `NOVITA_API_KEY` environment variable) and validates the endpoint and
//! timeout settings shared by the blocking and asynchronous transports.

use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Environment variable consulted when no API key is passed explicitly.
pub const API_KEY_ENV: &str = "NOVITA_API_KEY";

/// Default base URL of the GPU instance API.
pub const DEFAULT_BASE_URL: &str = "https://api.novita.ai/gpu-instance/openapi/v1";

/// Configuration for a Novita client instance.
///
/// The API key is wrapped in a [`SecretString`]; it is redacted from `Debug`
/// output and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientConfig {
    /// Bearer credential sent on every request
    #[serde(skip_serializing)]
    pub api_key: SecretString,

    /// Base URL every request path is joined onto
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 600))]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

impl ClientConfig {
    /// Create a configuration with an explicit API key and default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::missing_api_key());
        }

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        })
    }

    /// Create a configuration from the `NOVITA_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::resolve(None)
    }

    /// Use `api_key` when given, otherwise fall back to the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if neither source yields a key.
    pub fn resolve(api_key: Option<&str>) -> Result<Self> {
        Self::from_lookup(api_key, |name| std::env::var(name).ok())
    }

    /// Resolve the API key with a custom variable lookup.
    ///
    /// An explicit key always wins, even when the lookup would return one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if neither source yields a key.
    pub fn from_lookup<F>(api_key: Option<&str>, lookup: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match api_key {
            Some(key) => Self::new(key),
            None => lookup(API_KEY_ENV)
                .map_or_else(|| Err(Error::missing_api_key()), Self::new),
        }
    }

    /// Point the client at a different base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Value of the `Authorization` header.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }

    /// Validate the settings and parse the base URL.
    ///
    /// Transports call this before building a client, so a configuration
    /// deserialized with a blank key is caught here as well.
    /// The returned URL always ends with `/` so request paths join beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the API key is blank, and
    /// [`Error::Config`] if validation fails or the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(Error::missing_api_key());
        }
        self.validate()
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;

        let mut base = self.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base).map_err(|e| Error::Config(format!("Invalid base URL: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("sk-test").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.bearer(), "Bearer sk-test");
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let err = ClientConfig::new("  ").unwrap_err();
        assert!(matches!(err, Error::Authentication { .. }));
        assert!(err.to_string().contains("No API key provided"));
    }

    #[test]
    fn test_explicit_key_wins_over_lookup() {
        let config =
            ClientConfig::from_lookup(Some("explicit"), |_| Some("env".to_string())).unwrap();
        assert_eq!(config.api_key.expose_secret(), "explicit");
    }

    #[test]
    fn test_lookup_used_when_no_explicit_key() {
        let config = ClientConfig::from_lookup(None, |name| {
            assert_eq!(name, API_KEY_ENV);
            Some("from-env".to_string())
        })
        .unwrap();
        assert_eq!(config.api_key.expose_secret(), "from-env");
    }

    #[test]
    fn test_missing_everywhere() {
        let err = ClientConfig::from_lookup(None, |_| None).unwrap_err();
        assert!(matches!(err, Error::Authentication { payload: None, .. }));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var(API_KEY_ENV, "sk-env");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_key.expose_secret(), "sk-env");

        std::env::remove_var(API_KEY_ENV);
        assert!(ClientConfig::from_env().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("sk-very-secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-very-secret"));
    }

    #[test]
    fn test_serialize_skips_key() {
        let config = ClientConfig::new("sk-very-secret").unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-very-secret"));
        assert!(json.contains("\"timeout_secs\":60"));
    }

    #[test]
    fn test_parse_base_url_appends_slash() {
        let config = ClientConfig::new("k")
            .unwrap()
            .with_base_url("http://localhost:8080/openapi/v1");
        let url = config.parse_base_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/openapi/v1/");
        assert_eq!(
            url.join("gpu/instances").unwrap().as_str(),
            "http://localhost:8080/openapi/v1/gpu/instances"
        );
    }

    #[test]
    fn test_validation_rejects_bad_settings() {
        let config = ClientConfig::new("k").unwrap().with_base_url("not a url");
        assert!(matches!(config.parse_base_url(), Err(Error::Config(_))));

        let config = ClientConfig::new("k").unwrap().with_timeout(0);
        assert!(matches!(config.parse_base_url(), Err(Error::Config(_))));
    }

    #[test]
    fn test_deserialized_blank_key_is_rejected() {
        let config: ClientConfig = serde_json::from_str(r#"{"api_key": " "}"#).unwrap();
        let err = config.parse_base_url().unwrap_err();
        assert!(matches!(err, Error::Authentication { .. }));
        assert!(err.to_string().contains("No API key provided"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"api_key": "sk-json"}"#).unwrap();
        assert_eq!(config.api_key.expose_secret(), "sk-json");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
