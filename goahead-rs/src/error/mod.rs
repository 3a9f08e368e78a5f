//! Error handling for the go-ahead client
//!
//! Every way an inquiry can fail has its own variant so the diagnostic
//! channel can say exactly what went wrong. None of these ever reach the
//! caller of [`crate::decide`]: they are reported and then collapsed into a
//! negative answer.

use std::fmt;
use thiserror::Error;

use crate::inquiry::EXPECTED_KEYS;

pub mod mapping;

/// Result type for go-ahead operations
pub type Result<T> = std::result::Result<T, InquiryError>;

/// How loudly a failure is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Protocol or data problems on the arbiter's side of the contract
    Warning,
    /// Operational problems: the arbiter could not be reached at all
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for go-ahead inquiries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InquiryError {
    /// The request could not be sent or no response came back
    #[error("Received error {cause} while contacting {endpoint}")]
    Transport { endpoint: String, cause: String },

    /// A response arrived with something other than 200 OK
    #[error("Received status code {code}{}", reason_suffix(.reason))]
    Status { code: u16, reason: Option<String> },

    /// The body is not a JSON object
    #[error("The go-ahead service did not return valid json: {0}")]
    Parse(String),

    /// The JSON object lacks one or more required keys
    #[error(
        "Expected keys [{}] are not all present in the returned keys [{}] (missing: {})",
        EXPECTED_KEYS.join(", "),
        .received.join(", "),
        .missing.join(", ")
    )]
    Schema {
        missing: Vec<String>,
        received: Vec<String>,
    },

    /// The client could not be set up (bad URL, unreadable CA bundle, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(" ({})", reason),
        None => String::new(),
    }
}

impl InquiryError {
    /// Create a transport error for the given endpoint
    pub fn transport(endpoint: impl Into<String>, cause: impl fmt::Display) -> Self {
        InquiryError::Transport {
            endpoint: endpoint.into(),
            cause: cause.to_string(),
        }
    }

    /// Create a status error, filling in the canonical reason phrase
    pub fn status(code: u16) -> Self {
        InquiryError::Status {
            code,
            reason: mapping::canonical_reason(code).map(str::to_string),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        InquiryError::Parse(message.into())
    }

    /// Create a schema error from the keys that are missing and the keys
    /// that were actually received
    pub fn schema(missing: Vec<String>, received: Vec<String>) -> Self {
        InquiryError::Schema { missing, received }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        InquiryError::Configuration(message.into())
    }

    /// Severity the failure is reported with
    pub fn severity(&self) -> Severity {
        match self {
            InquiryError::Transport { .. } | InquiryError::Configuration(_) => Severity::Error,
            InquiryError::Status { .. } | InquiryError::Parse(_) | InquiryError::Schema { .. } => {
                Severity::Warning
            }
        }
    }

    /// Short machine-friendly name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            InquiryError::Transport { .. } => "transport",
            InquiryError::Status { .. } => "status",
            InquiryError::Parse(_) => "parse",
            InquiryError::Schema { .. } => "schema",
            InquiryError::Configuration(_) => "configuration",
        }
    }

    /// The HTTP status code if the failure carries one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            InquiryError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
