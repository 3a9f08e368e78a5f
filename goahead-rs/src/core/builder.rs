//! Client builder implementation
//!
//! Builds the reqwest client used to talk to the go-ahead service, including
//! the optional CA bundle for TLS verification.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Certificate, Client as ReqwestClient};

use crate::config::{GoAheadConfig, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::error::{InquiryError, Result};
use crate::inquiry::HttpTransport;

/// Builder for the HTTP client behind [`HttpTransport`]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    /// PEM bundle with the CA certificates to trust
    ca_file: Option<PathBuf>,

    /// Request timeout
    timeout: Option<Duration>,

    /// User agent
    user_agent: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            ca_file: None,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl ClientBuilder {
    /// Create a new client builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Take CA bundle, timeout and user agent from a config
    pub fn from_config(config: &GoAheadConfig) -> Self {
        Self {
            ca_file: config.ca_file.clone(),
            timeout: Some(config.timeout),
            user_agent: Some(config.user_agent.clone()),
        }
    }

    /// Trust the CA certificates in this PEM file in addition to the platform roots
    pub fn ca_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_file = Some(path.into());
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an HTTP client with the configured settings
    pub fn build_http_client(&self) -> Result<ReqwestClient> {
        let mut builder = ReqwestClient::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(ref user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        if let Some(ref path) = self.ca_file {
            for certificate in load_ca_bundle(path)? {
                builder = builder.add_root_certificate(certificate);
            }
        }

        builder
            .build()
            .map_err(|e| InquiryError::configuration(format!("Failed to build HTTP client: {}", e)))
    }

    /// Build the default transport
    pub fn build_transport(&self) -> Result<HttpTransport> {
        Ok(HttpTransport::new(self.build_http_client()?))
    }
}

/// Read every certificate from a PEM bundle
fn load_ca_bundle(path: &Path) -> Result<Vec<Certificate>> {
    let pem = std::fs::read(path).map_err(|e| {
        InquiryError::configuration(format!("Failed to read CA file {}: {}", path.display(), e))
    })?;

    let certificates = Certificate::from_pem_bundle(&pem).map_err(|e| {
        InquiryError::configuration(format!("Invalid CA file {}: {}", path.display(), e))
    })?;

    if certificates.is_empty() {
        return Err(InquiryError::configuration(format!(
            "CA file {} contains no certificates",
            path.display()
        )));
    }

    Ok(certificates)
}
