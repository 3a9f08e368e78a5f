//! Turns an identity and a target kind into a request

use super::models::{Identity, InquiryPayload, InquiryRequest, TargetKind};

/// Builds inquiries against one go-ahead service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryBuilder {
    base_url: String,
}

impl InquiryBuilder {
    /// Trailing slashes on `base_url` are dropped; inquiry paths bring their own.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the inquiry for `kind`
    ///
    /// Never fails. An empty fqdn is the caller's mistake and is passed
    /// through; the combiner refuses such identities before getting here.
    pub fn build(&self, identity: &Identity, kind: TargetKind) -> InquiryRequest {
        let url = format!("{}{}", self.base_url, kind.path());
        let payload = InquiryPayload {
            fqdn: identity.fqdn().to_string(),
            uptime: identity.uptime().clone(),
        };

        InquiryRequest::new(kind, url, payload)
    }
}
