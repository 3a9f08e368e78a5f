//! Core abstractions for the go-ahead client
//!
//! This module provides the seams the decision engine is built on:
//!
//! - `Transport`: carries an inquiry to the arbiter and returns the raw response
//! - `Diagnostics`: receives warnings and errors about failed inquiries
//! - `ClientBuilder`: builder for the default reqwest-backed transport

pub mod builder;
pub use builder::ClientBuilder;

use async_trait::async_trait;
use log::{error, warn};

use crate::error::{Result, Severity};
use crate::inquiry::{InquiryRequest, RawResponse};

/// Log target used by [`LogDiagnostics`]
pub const LOG_TARGET: &str = "goahead";

/// Trait responsible for getting an inquiry to the arbiter
///
/// Implementations return `Ok` for every complete HTTP exchange, whatever its
/// status code. Only a failure to obtain a response at all is an `Err`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue the inquiry and return status and body
    async fn send(&self, request: &InquiryRequest) -> Result<RawResponse>;
}

/// Sink for inquiry diagnostics
pub trait Diagnostics: Send + Sync {
    /// Report a protocol or data problem
    fn warning(&self, message: &str);

    /// Report an operational problem
    fn error(&self, message: &str);

    /// Report with the given severity
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Warning => self.warning(message),
            Severity::Error => self.error(message),
        }
    }
}

/// Diagnostics forwarded to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warning(&self, message: &str) {
        warn!(target: LOG_TARGET, "{}", message);
    }

    fn error(&self, message: &str) {
        error!(target: LOG_TARGET, "{}", message);
    }
}
