//! Default HTTP transport backed by reqwest

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::core::Transport;
use crate::error::mapping::map_transport_error;
use crate::error::Result;

use super::models::{InquiryRequest, RawResponse};

/// Sends inquiries as `GET` requests with a JSON body
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
}

impl HttpTransport {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &InquiryRequest) -> Result<RawResponse> {
        let url = request.url();
        debug!("Sending request to go-ahead service: GET {}", url);

        let response = self
            .http_client
            .get(url)
            .json(request.payload())
            .send()
            .await
            .map_err(|e| map_transport_error(&e, url))?;

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            // Non-200 bodies are never inspected
            Err(e) if status != 200 => {
                debug!("Dropping unreadable {} body from {}: {}", status, url, e);
                Vec::new()
            }
            Err(e) => return Err(map_transport_error(&e, url)),
        };

        debug!("Go-ahead service answered {} with {} bytes", status, body.len());
        Ok(RawResponse::new(status, body))
    }
}
