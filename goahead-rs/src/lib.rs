//! # goahead
//!
//! Client for asking a go-ahead service whether a node may restart.
//!
//! A node asks two questions: may the service restart, and may the operating
//! system restart. Service-level permission wins; the OS-level question is
//! only asked when the service-level answer is not a yes. Every failure
//! (unreachable service, bad status, malformed answer) counts as "not yet",
//! so [`decide`] is safe to call from a polling loop.
//!
//! ## Architecture
//!
//! - `InquiryBuilder`: identity + target kind to request
//! - `ResponseValidator`: raw response to a validated `GoAheadAnswer`, or nothing
//! - `DecisionCombiner`: both inquiries to one decision
//! - `Transport`: seam for the HTTP layer, `HttpTransport` by default
//! - `Diagnostics`: injected sink for warnings and errors, `LogDiagnostics` by default

use std::path::Path;
use std::sync::Arc;

pub mod core;
pub use self::core::{ClientBuilder, Diagnostics, LogDiagnostics, Transport};

pub mod inquiry;
pub use inquiry::{
    DecisionCombiner, GoAheadAnswer, HttpTransport, Identity, InquiryBuilder, InquiryOutcome,
    InquiryRequest, RawResponse, ResponseValidator, TargetKind, Uptime, Verdict,
};

pub mod error;
pub use error::{InquiryError, Result, Severity};

pub mod resilience;
pub use resilience::{PollConfig, Poller};

pub mod config;
pub use config::{ConfigProvider, GoAheadConfig};

mod util;
pub use util::parse_duration;

#[cfg(test)]
mod tests;

/// Ask the go-ahead service at `goahead_url` whether `fqdn` may restart
///
/// Returns `true` only when the service grants a service-level or, failing
/// that, an OS-level restart. Any failure is logged and yields `false`.
pub async fn decide(
    fqdn: &str,
    uptime: impl Into<Uptime>,
    goahead_url: &str,
    goahead_url_ca_file: Option<&Path>,
) -> bool {
    let config = GoAheadConfig::new(goahead_url).with_ca_file(goahead_url_ca_file);
    decide_with(&config, &Identity::new(fqdn, uptime), Arc::new(LogDiagnostics)).await
}

/// [`decide`] with an explicit config and diagnostics sink
pub async fn decide_with(
    config: &GoAheadConfig,
    identity: &Identity,
    diagnostics: Arc<dyn Diagnostics>,
) -> bool {
    match DecisionCombiner::from_config(config, Arc::clone(&diagnostics)) {
        Ok(combiner) => combiner.decide(identity).await,
        Err(err) => {
            diagnostics.report(err.severity(), &err.to_string());
            false
        }
    }
}
