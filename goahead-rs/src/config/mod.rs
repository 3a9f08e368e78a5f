//! Configuration for the go-ahead client
//!
//! Settings come from a [`ConfigProvider`]; the default provider reads
//! `GOAHEAD_*` environment variables:
//!
//! | variable              | meaning                                  |
//! |-----------------------|------------------------------------------|
//! | `GOAHEAD_URL`         | base URL of the go-ahead service         |
//! | `GOAHEAD_URL_CA_FILE` | optional PEM bundle used to verify TLS   |
//! | `GOAHEAD_TIMEOUT`     | request timeout (`30`, `30s`, `500ms`)   |
//! | `GOAHEAD_USER_AGENT`  | user agent sent with every inquiry       |

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{InquiryError, Result};
use crate::util::parse_duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("goahead-rs/", env!("CARGO_PKG_VERSION"));

/// Prefix of the environment variables read by [`GoAheadConfig::from_env`]
pub const ENV_PREFIX: &str = "GOAHEAD";

/// Base trait for configuration providers
pub trait ConfigProvider: Send + Sync {
    /// Get a string configuration value
    fn get_string(&self, key: &str) -> Result<String>;

    /// Get a string configuration value, treating absent and blank the same
    fn get_optional(&self, key: &str) -> Option<String> {
        self.get_string(key)
            .ok()
            .filter(|value| !value.trim().is_empty())
    }
}

/// Environment variable based configuration provider
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    /// Optional prefix for environment variables
    prefix: Option<String>,
}

impl EnvConfigProvider {
    /// Create a new environment variable config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prefix for environment variables
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Format a configuration key as an environment variable
    pub fn format_key(&self, key: &str) -> String {
        let key = key
            .to_uppercase()
            .replace(|c: char| !c.is_ascii_alphanumeric(), "_");

        match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key),
            None => key,
        }
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let env_key = self.format_key(key);

        env::var(&env_key).map_err(|e| match e {
            env::VarError::NotPresent => {
                InquiryError::configuration(format!("Environment variable not set: {}", env_key))
            }
            env::VarError::NotUnicode(_) => InquiryError::configuration(format!(
                "Environment variable is not valid unicode: {}",
                env_key
            )),
        })
    }
}

/// In-memory config provider for testing or static configuration
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    /// Create a new empty memory config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a configuration value
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.values.insert(key.into(), value.to_string());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| InquiryError::configuration(format!("Configuration key not found: {}", key)))
    }
}

/// Everything needed to reach the go-ahead service
#[derive(Debug, Clone, PartialEq)]
pub struct GoAheadConfig {
    /// Base URL, without the inquiry path
    pub goahead_url: String,

    /// PEM bundle with the CA certificates used to verify the service
    pub ca_file: Option<PathBuf>,

    /// Per-request timeout
    pub timeout: Duration,

    /// User agent sent with every inquiry
    pub user_agent: String,
}

impl GoAheadConfig {
    /// Config for `goahead_url` with default timeout and no extra CA bundle
    pub fn new(goahead_url: impl Into<String>) -> Self {
        Self {
            goahead_url: goahead_url.into(),
            ca_file: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set or clear the CA bundle
    pub fn with_ca_file<P: Into<PathBuf>>(mut self, ca_file: Option<P>) -> Self {
        self.ca_file = ca_file.map(Into::into);
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load from `GOAHEAD_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_provider(&EnvConfigProvider::new().with_prefix(ENV_PREFIX))
    }

    /// Load from any provider; only `URL` is required
    pub fn from_provider<P: ConfigProvider>(provider: &P) -> Result<Self> {
        let goahead_url = provider.get_string("URL")?;

        let timeout = match provider.get_optional("TIMEOUT") {
            Some(raw) => parse_duration(&raw).ok_or_else(|| {
                InquiryError::configuration(format!("Invalid timeout: {}", raw))
            })?,
            None => DEFAULT_TIMEOUT,
        };

        let config = Self::new(goahead_url)
            .with_ca_file(provider.get_optional("URL_CA_FILE"))
            .with_timeout(timeout)
            .with_user_agent(
                provider
                    .get_optional("USER_AGENT")
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            );

        config.validate()?;
        Ok(config)
    }

    /// Check that the URL is usable as a base for inquiry paths
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.goahead_url).map_err(|e| {
            InquiryError::configuration(format!("Invalid go-ahead URL {}: {}", self.goahead_url, e))
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(InquiryError::configuration(format!(
                    "Unsupported scheme {} in go-ahead URL {}",
                    other, self.goahead_url
                )))
            }
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InquiryError::configuration(format!(
                "Go-ahead URL {} must not carry a query or fragment",
                self.goahead_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(InquiryError::configuration("Timeout must be greater than zero"));
        }

        Ok(())
    }
}
