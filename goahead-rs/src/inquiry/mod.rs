//! Inquiries to the go-ahead service
//!
//! - `request`: `InquiryBuilder`, identity + kind to request
//! - `validator`: `ResponseValidator`, raw response to answer or nothing
//! - `combiner`: `DecisionCombiner`, two inquiries to one decision
//! - `http`: `HttpTransport`, the default reqwest transport

mod combiner;
mod http;
mod models;
mod request;
mod validator;

pub use combiner::{DecisionCombiner, InquiryOutcome, Verdict};
pub use http::HttpTransport;
pub use models::*;
pub use request::InquiryBuilder;
pub use validator::ResponseValidator;
