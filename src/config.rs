//! Catalog service configuration.
//!
//! The credential pair is opaque to this crate: it is handed to the
//! token endpoint as-is and never validated locally.

// Use 3rd party
use thiserror::Error;

// Use built-in library
use std::env;
use std::fmt;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_MARKET: &str = "US";

pub const ENV_CLIENT_ID: &str = "TRACKPROBE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "TRACKPROBE_CLIENT_SECRET";
pub const ENV_MARKET: &str = "TRACKPROBE_MARKET";
pub const ENV_API_URL: &str = "TRACKPROBE_API_URL";
pub const ENV_ACCOUNTS_URL: &str = "TRACKPROBE_ACCOUNTS_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
}

#[derive(Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub client_id: String,
    pub client_secret: String,
    pub market: String,
    pub api_url: String,
    pub accounts_url: String,
}

impl CatalogConfig {
    #[must_use]
    pub fn new(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            market: DEFAULT_MARKET.to_owned(),
            api_url: DEFAULT_API_URL.to_owned(),
            accounts_url: DEFAULT_ACCOUNTS_URL.to_owned(),
        }
    }

    pub fn market(mut self, market: &str) -> Self {
        self.market = market.to_owned();
        self
    }

    pub fn api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_owned();
        self
    }

    pub fn accounts_url(mut self, accounts_url: &str) -> Self {
        self.accounts_url = accounts_url.trim_end_matches('/').to_owned();
        self
    }

    /// Reads the `TRACKPROBE_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup(ENV_CLIENT_ID).ok_or(ConfigError::MissingVar(ENV_CLIENT_ID))?;
        let client_secret =
            lookup(ENV_CLIENT_SECRET).ok_or(ConfigError::MissingVar(ENV_CLIENT_SECRET))?;

        let mut config = Self::new(&client_id, &client_secret);
        if let Some(market) = lookup(ENV_MARKET) {
            config = config.market(&market);
        }
        if let Some(api_url) = lookup(ENV_API_URL) {
            config = config.api_url(&api_url);
        }
        if let Some(accounts_url) = lookup(ENV_ACCOUNTS_URL) {
            config = config.accounts_url(&accounts_url);
        }
        Ok(config)
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("market", &self.market)
            .field("api_url", &self.api_url)
            .field("accounts_url", &self.accounts_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in<'a>(vars: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| vars.get(key).map(|value| value.to_string())
    }

    #[test]
    fn new_uses_defaults() {
        let config = CatalogConfig::new("some_id", "some_secret");
        assert_eq!(config.market, "US");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.accounts_url, DEFAULT_ACCOUNTS_URL);
    }

    #[test]
    fn builder_trims_trailing_slash() {
        let config = CatalogConfig::new("some_id", "some_secret")
            .api_url("http://127.0.0.1:1234/")
            .accounts_url("http://127.0.0.1:1234/");
        assert_eq!(config.api_url, "http://127.0.0.1:1234");
        assert_eq!(config.accounts_url, "http://127.0.0.1:1234");
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let mut vars = HashMap::new();
        vars.insert(ENV_CLIENT_ID, "some_id");
        vars.insert(ENV_CLIENT_SECRET, "some_secret");
        vars.insert(ENV_MARKET, "GB");
        vars.insert(ENV_API_URL, "http://localhost:8080/v1");

        let config = CatalogConfig::from_lookup(lookup_in(&vars)).unwrap();
        assert_eq!(config.client_id, "some_id");
        assert_eq!(config.client_secret, "some_secret");
        assert_eq!(config.market, "GB");
        assert_eq!(config.api_url, "http://localhost:8080/v1");
        assert_eq!(config.accounts_url, DEFAULT_ACCOUNTS_URL);
    }

    #[test]
    fn from_lookup_requires_credentials() {
        let mut vars = HashMap::new();
        vars.insert(ENV_CLIENT_ID, "some_id");

        let result = CatalogConfig::from_lookup(lookup_in(&vars));
        assert_eq!(result, Err(ConfigError::MissingVar(ENV_CLIENT_SECRET)));
    }

    #[test]
    fn debug_hides_secret() {
        let config = CatalogConfig::new("some_id", "some_secret");
        let debug = format!("{:?}", config);
        assert!(debug.contains("some_id"));
        assert!(!debug.contains("some_secret"));
    }
}
