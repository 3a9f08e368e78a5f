//! Error mapping for the HTTP transport
//!
//! Converts reqwest failures into transport errors with a short
//! classification in front, so a timeout reads differently from a refused
//! connection or a TLS failure in the logs.

use std::error::Error as StdError;

use reqwest::StatusCode;

use super::InquiryError;

/// Map a reqwest failure for `endpoint` to a transport error
pub fn map_transport_error(error: &reqwest::Error, endpoint: &str) -> InquiryError {
    let class = classify_transport_error(error);
    InquiryError::transport(endpoint, format!("{}: {}", class, describe_chain(error)))
}

/// Helper function to classify transport failures by category
pub fn classify_transport_error(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_body() || error.is_decode() {
        "incomplete response"
    } else if error.is_request() {
        "request failed"
    } else {
        "transport failure"
    }
}

/// Canonical reason phrase for a status code, if it has one
pub fn canonical_reason(code: u16) -> Option<&'static str> {
    StatusCode::from_u16(code).ok().and_then(|status| status.canonical_reason())
}

/// Render an error and its sources on one line
///
/// reqwest keeps the interesting part (refused, certificate, ...) in the
/// source chain, not in the top-level message.
fn describe_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_reason() {
        assert_eq!(canonical_reason(200), Some("OK"));
        assert_eq!(canonical_reason(503), Some("Service Unavailable"));
        assert_eq!(canonical_reason(599), None);
    }

    #[tokio::test]
    async fn test_connection_refused_is_classified() {
        // Nothing listens on a port we just released
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = format!("http://{}/v1/inquire/restart/", addr);
        let error = reqwest::Client::new().get(&endpoint).send().await.unwrap_err();
        let mapped = map_transport_error(&error, &endpoint);

        match mapped {
            InquiryError::Transport { endpoint: e, cause } => {
                assert_eq!(e, endpoint);
                assert!(cause.starts_with("connection failed"), "unexpected cause: {}", cause);
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
