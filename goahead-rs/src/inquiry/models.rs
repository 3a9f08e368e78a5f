//! Wire and domain types for go-ahead inquiries

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::parse_duration;

/// Path asked for service-level restart permission
pub const SERVICE_RESTART_PATH: &str = "/v1/inquire/restart/";

/// Path asked for OS-level restart permission
pub const OS_RESTART_PATH: &str = "/v1/inquire/restart/os";

/// Keys every answer must carry
pub const EXPECTED_KEYS: [&str; 9] = [
    "error",
    "timestamp",
    "go_ahead",
    "unknown_host",
    "ask_again_in",
    "request_id",
    "found_cluster",
    "requesting_fqdn",
    "message",
];

/// Which permission an inquiry asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Restart of the service running on the node
    ServiceRestart,
    /// Reboot of the node's operating system
    OsRestart,
}

impl TargetKind {
    /// Endpoint path for this kind
    pub fn path(self) -> &'static str {
        match self {
            TargetKind::ServiceRestart => SERVICE_RESTART_PATH,
            TargetKind::OsRestart => OS_RESTART_PATH,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::ServiceRestart => write!(f, "service restart"),
            TargetKind::OsRestart => write!(f, "OS restart"),
        }
    }
}

/// Uptime of the asking node
///
/// The arbiter decides what it means; the client forwards it unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uptime(Value);

impl Uptime {
    /// The value as it goes on the wire
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Uptime {
    fn from(value: Value) -> Self {
        Uptime(value)
    }
}

impl From<String> for Uptime {
    fn from(value: String) -> Self {
        Uptime(Value::String(value))
    }
}

impl From<&str> for Uptime {
    fn from(value: &str) -> Self {
        Uptime(Value::String(value.to_string()))
    }
}

impl From<u64> for Uptime {
    fn from(seconds: u64) -> Self {
        Uptime(Value::from(seconds))
    }
}

impl From<Duration> for Uptime {
    /// Whole seconds
    fn from(uptime: Duration) -> Self {
        Uptime(Value::from(uptime.as_secs()))
    }
}

/// Facts about the asking node
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    fqdn: String,
    uptime: Uptime,
}

impl Identity {
    pub fn new(fqdn: impl Into<String>, uptime: impl Into<Uptime>) -> Self {
        Self {
            fqdn: fqdn.into(),
            uptime: uptime.into(),
        }
    }

    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    pub fn uptime(&self) -> &Uptime {
        &self.uptime
    }
}

/// Body sent with every inquiry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InquiryPayload {
    pub fqdn: String,
    pub uptime: Uptime,
}

/// A fully resolved inquiry, ready for a transport
#[derive(Debug, Clone, PartialEq)]
pub struct InquiryRequest {
    kind: TargetKind,
    url: String,
    payload: InquiryPayload,
}

impl InquiryRequest {
    pub(crate) fn new(kind: TargetKind, url: String, payload: InquiryPayload) -> Self {
        Self { kind, url, payload }
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Base URL joined with the kind's path
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn payload(&self) -> &InquiryPayload {
        &self.payload
    }
}

/// What came back from the arbiter, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A validated answer from the go-ahead service
///
/// Only `go_ahead` and `unknown_host` have a fixed type; the remaining
/// fields are kept as the service sent them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoAheadAnswer {
    pub error: Value,
    pub timestamp: Value,
    pub go_ahead: bool,
    pub unknown_host: bool,
    pub ask_again_in: Value,
    pub request_id: Value,
    pub found_cluster: Value,
    pub requesting_fqdn: Value,
    pub message: Value,
}

impl GoAheadAnswer {
    /// Suggested wait before asking again
    ///
    /// Accepts a number of seconds or a duration string like `"90s"`.
    pub fn ask_again_in(&self) -> Option<Duration> {
        match &self.ask_again_in {
            Value::Number(n) => n.as_u64().map(Duration::from_secs).or_else(|| {
                n.as_f64()
                    .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            }),
            Value::String(s) => parse_duration(s),
            _ => None,
        }
    }

    /// The fqdn the service saw, for messages
    pub fn requesting_fqdn(&self) -> String {
        display_value(&self.requesting_fqdn)
    }
}

/// Strings without quotes, everything else as JSON
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
