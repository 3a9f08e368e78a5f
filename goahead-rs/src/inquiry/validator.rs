//! Response validation
//!
//! Checks, in order: the transport delivered a response, the status is 200,
//! the body is a JSON object, and the object carries every expected key.
//! The first failing check ends validation. An answer flagging the host as
//! unknown is still valid; it only earns a warning.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::core::Diagnostics;
use crate::error::{InquiryError, Result};
use crate::util::truncate_string;

use super::models::{GoAheadAnswer, RawResponse, EXPECTED_KEYS};

/// Longest body excerpt quoted in a parse diagnostic
const BODY_EXCERPT_CHARS: usize = 200;

/// Validates raw responses and reports why unusable ones were rejected
#[derive(Clone)]
pub struct ResponseValidator {
    diagnostics: Arc<dyn Diagnostics>,
}

impl ResponseValidator {
    pub fn new(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self { diagnostics }
    }

    /// Validate what the transport produced
    ///
    /// Returns `None` for anything unusable, after reporting it with the
    /// failure's severity.
    pub fn validate(&self, received: Result<RawResponse>) -> Option<GoAheadAnswer> {
        match received.and_then(|raw| Self::parse(&raw)) {
            Ok(answer) => {
                if answer.unknown_host {
                    self.diagnostics.warning(&format!(
                        "The host {} is not known to the go-ahead service",
                        answer.requesting_fqdn()
                    ));
                }
                Some(answer)
            }
            Err(err) => {
                self.diagnostics.report(err.severity(), &err.to_string());
                None
            }
        }
    }

    /// Interpret a raw response without reporting anything
    pub fn parse(raw: &RawResponse) -> Result<GoAheadAnswer> {
        if raw.status != StatusCode::OK.as_u16() {
            return Err(InquiryError::status(raw.status));
        }

        let document: Value = serde_json::from_slice(&raw.body)
            .map_err(|e| InquiryError::parse(format!("{} in body {:?}", e, excerpt(&raw.body))))?;

        let object = document.as_object().ok_or_else(|| {
            InquiryError::parse(format!("expected a JSON object, got {}", json_type(&document)))
        })?;

        check_keys(object)?;

        // Keys are all there; what can still fail is a wrongly typed flag
        serde_json::from_value(document).map_err(|e| InquiryError::parse(e.to_string()))
    }
}

/// Every expected key must be present; extra keys are fine
fn check_keys(object: &Map<String, Value>) -> Result<()> {
    let missing: Vec<String> = EXPECTED_KEYS
        .iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| key.to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    let mut received: Vec<String> = object.keys().cloned().collect();
    received.sort();
    Err(InquiryError::schema(missing, received))
}

fn excerpt(body: &[u8]) -> String {
    truncate_string(&String::from_utf8_lossy(body), BODY_EXCERPT_CHARS)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_answer() -> Value {
        json!({
            "error": null,
            "timestamp": "t1",
            "go_ahead": true,
            "unknown_host": false,
            "ask_again_in": 0,
            "request_id": "r1",
            "found_cluster": true,
            "requesting_fqdn": "a.example.com",
            "message": "ok"
        })
    }

    fn ok(body: &Value) -> RawResponse {
        RawResponse::new(200, serde_json::to_vec(body).unwrap())
    }

    #[test]
    fn test_parse_valid_answer() {
        let answer = ResponseValidator::parse(&ok(&full_answer())).unwrap();
        assert!(answer.go_ahead);
        assert!(!answer.unknown_host);
        assert_eq!(answer.request_id, json!("r1"));
    }

    #[test]
    fn test_extra_keys_are_tolerated() {
        let mut body = full_answer();
        body["cluster_name"] = json!("db-eu");
        body["protocol_version"] = json!(2);

        assert!(ResponseValidator::parse(&ok(&body)).unwrap().go_ahead);
    }

    #[test]
    fn test_non_200_is_rejected_whatever_the_body() {
        let raw = RawResponse::new(201, serde_json::to_vec(&full_answer()).unwrap());
        let err = ResponseValidator::parse(&raw).unwrap_err();
        assert_eq!(err.status_code(), Some(201));
    }

    #[test]
    fn test_invalid_json() {
        let raw = RawResponse::new(200, "<html>maintenance</html>");
        match ResponseValidator::parse(&raw).unwrap_err() {
            InquiryError::Parse(message) => assert!(message.contains("<html>maintenance</html>")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_json() {
        let err = ResponseValidator::parse(&ok(&json!([1, 2, 3]))).unwrap_err();
        assert_eq!(err.kind(), "parse");
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_missing_key_is_schema_error() {
        let mut body = full_answer();
        body.as_object_mut().unwrap().remove("request_id");

        match ResponseValidator::parse(&ok(&body)).unwrap_err() {
            InquiryError::Schema { missing, received } => {
                assert_eq!(missing, vec!["request_id".to_string()]);
                assert_eq!(received.len(), 8);
                assert!(!received.contains(&"request_id".to_string()));
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrongly_typed_go_ahead_is_parse_error() {
        let mut body = full_answer();
        body["go_ahead"] = json!("yes");

        assert_eq!(ResponseValidator::parse(&ok(&body)).unwrap_err().kind(), "parse");
    }
}
