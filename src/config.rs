//! Client configuration
//!
//! Configuration is read from YAML, optionally overridden from the
//! environment, and validated before an [`HttpClient`](crate::http::HttpClient)
//! is built from it.
//!
//! ```yaml
//! base_url: https://api.github.com
//! timeout_secs: 30
//! per_page: 100
//! headers:
//!   X-GitHub-Api-Version: "2022-11-28"
//! ```

use crate::error::{Error, Result};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment variable overriding `base_url`
pub const ENV_BASE_URL: &str = "FORGE_REST_BASE_URL";
/// Environment variable overriding `timeout_secs`
pub const ENV_TIMEOUT_SECS: &str = "FORGE_REST_TIMEOUT_SECS";
/// Environment variable overriding `user_agent`
pub const ENV_USER_AGENT: &str = "FORGE_REST_USER_AGENT";

/// Default API entry point
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
/// Default media type requested from the API
pub const DEFAULT_ACCEPT: &str = "application/vnd.github.v3+json";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API entry point
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Accept header sent with every request
    #[serde(default = "default_accept")]
    pub accept: String,

    /// Page size requested from list endpoints
    #[serde(default)]
    pub per_page: Option<u32>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("forge-rest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_accept() -> String {
    DEFAULT_ACCEPT.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            accept: default_accept(),
            per_page: None,
            headers: StringMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parse a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = secs
                .trim()
                .parse()
                .map_err(|_| Error::invalid_config("timeout_secs", format!("'{secs}'")))?;
        }
        if let Some(agent) = lookup(ENV_USER_AGENT) {
            self.user_agent = agent;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::invalid_config("base_url", "must not be empty"));
        }
        let url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::invalid_config(
                "base_url",
                format!("'{}' cannot be used as a base", self.base_url),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_config("timeout_secs", "must be positive"));
        }
        if self.per_page == Some(0) {
            return Err(Error::invalid_config("per_page", "must be positive"));
        }
        Ok(())
    }

    /// Parsed base URL
    pub fn base(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the page size for list endpoints
    pub fn per_page(mut self, size: u32) -> Self {
        self.config.per_page = Some(size);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
