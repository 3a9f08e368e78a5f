//! Combines the service-level and OS-level inquiries into one decision
//!
//! Service-level permission wins. The OS-level inquiry is only sent when
//! the service-level one did not grant a restart.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::config::GoAheadConfig;
use crate::core::{ClientBuilder, Diagnostics, Transport};
use crate::error::Result;

use super::models::{GoAheadAnswer, Identity, TargetKind};
use super::request::InquiryBuilder;
use super::validator::ResponseValidator;

/// Result of a single inquiry
#[derive(Debug, Clone, PartialEq)]
pub enum InquiryOutcome {
    /// Valid answer with `go_ahead: true`
    Granted(GoAheadAnswer),
    /// Valid answer with `go_ahead: false`
    Denied(GoAheadAnswer),
    /// Transport, status, parse or schema failure
    Unusable,
}

impl InquiryOutcome {
    pub fn from_answer(answer: Option<GoAheadAnswer>) -> Self {
        match answer {
            Some(answer) if answer.go_ahead => InquiryOutcome::Granted(answer),
            Some(answer) => InquiryOutcome::Denied(answer),
            None => InquiryOutcome::Unusable,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, InquiryOutcome::Granted(_))
    }

    pub fn answer(&self) -> Option<&GoAheadAnswer> {
        match self {
            InquiryOutcome::Granted(answer) | InquiryOutcome::Denied(answer) => Some(answer),
            InquiryOutcome::Unusable => None,
        }
    }

    pub fn ask_again_in(&self) -> Option<Duration> {
        self.answer().and_then(GoAheadAnswer::ask_again_in)
    }
}

/// Final decision plus the service's hint on when to ask again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verdict {
    pub granted: bool,
    pub ask_again_in: Option<Duration>,
}

impl Verdict {
    /// Reduce the service-level outcome and, if it was asked, the OS-level one
    pub fn combine(service: &InquiryOutcome, os: Option<&InquiryOutcome>) -> Self {
        if service.is_granted() {
            return Verdict {
                granted: true,
                ask_again_in: service.ask_again_in(),
            };
        }

        match os {
            Some(os) => Verdict {
                granted: os.is_granted(),
                ask_again_in: os.ask_again_in().or_else(|| service.ask_again_in()),
            },
            None => Verdict {
                granted: false,
                ask_again_in: service.ask_again_in(),
            },
        }
    }
}

/// Asks the go-ahead service and reduces the answers to one decision
#[derive(Clone)]
pub struct DecisionCombiner {
    builder: InquiryBuilder,
    transport: Arc<dyn Transport>,
    validator: ResponseValidator,
    diagnostics: Arc<dyn Diagnostics>,
}

impl DecisionCombiner {
    pub fn new(
        goahead_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            builder: InquiryBuilder::new(goahead_url),
            transport,
            validator: ResponseValidator::new(Arc::clone(&diagnostics)),
            diagnostics,
        }
    }

    /// Combiner over the default HTTP transport
    pub fn from_config(config: &GoAheadConfig, diagnostics: Arc<dyn Diagnostics>) -> Result<Self> {
        config.validate()?;
        let transport = ClientBuilder::from_config(config).build_transport()?;

        Ok(Self::new(config.goahead_url.clone(), Arc::new(transport), diagnostics))
    }

    /// Ask about one kind of restart
    pub async fn inquire(&self, identity: &Identity, kind: TargetKind) -> InquiryOutcome {
        let request = self.builder.build(identity, kind);
        debug!("Asking {} for {} permission of {}", request.url(), kind, identity.fqdn());

        let received = self.transport.send(&request).await;
        let outcome = InquiryOutcome::from_answer(self.validator.validate(received));

        debug!("{} inquiry for {}: {}", kind, identity.fqdn(), outcome_label(&outcome));
        outcome
    }

    /// Full decision, including the service's hint on when to ask again
    pub async fn evaluate(&self, identity: &Identity) -> Verdict {
        if identity.fqdn().trim().is_empty() {
            self.diagnostics
                .error("Refusing to ask the go-ahead service for an empty fqdn");
            return Verdict::default();
        }

        let service = self.inquire(identity, TargetKind::ServiceRestart).await;
        if service.is_granted() {
            return Verdict::combine(&service, None);
        }

        let os = self.inquire(identity, TargetKind::OsRestart).await;
        Verdict::combine(&service, Some(&os))
    }

    /// True only when the service grants a service-level or OS-level restart
    pub async fn decide(&self, identity: &Identity) -> bool {
        self.evaluate(identity).await.granted
    }
}

fn outcome_label(outcome: &InquiryOutcome) -> &'static str {
    match outcome {
        InquiryOutcome::Granted(_) => "granted",
        InquiryOutcome::Denied(_) => "denied",
        InquiryOutcome::Unusable => "unusable",
    }
}
