//! Tests for the go-ahead client
//!
//! Shared fixtures live here; the test modules use them.

pub mod config_tests;

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::core::Diagnostics;
use crate::error::Severity;
use crate::inquiry::RawResponse;

/// Diagnostics sink that remembers everything it was told
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, message)| message)
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warning(&self, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((Severity::Warning, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((Severity::Error, message.to_string()));
    }
}

/// A complete, valid answer body
pub fn answer_body(go_ahead: bool) -> Value {
    json!({
        "error": null,
        "timestamp": "t1",
        "go_ahead": go_ahead,
        "unknown_host": false,
        "ask_again_in": 0,
        "request_id": "r1",
        "found_cluster": true,
        "requesting_fqdn": "a.example.com",
        "message": "ok"
    })
}

/// A 200 response carrying `body`
pub fn ok_response(body: &Value) -> RawResponse {
    RawResponse::new(200, serde_json::to_vec(body).unwrap())
}
