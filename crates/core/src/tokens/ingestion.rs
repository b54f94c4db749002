//! Downstream ingestion dispatcher.
//!
//! Builds and fires the analysis job payload. The call itself is
//! synchronous; the downstream service runs its analysis asynchronously and
//! the caller never waits for it. A non-success response fails the whole
//! admission - unlike the best-effort market-cap probes, an ingestion
//! failure is never swallowed.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::tokens_model::{IngestionReceipt, IngestionRequest};
use super::tokens_traits::IngestionClientTrait;
use crate::errors::{Error, Result};

/// How much of a failed ingestion response body is echoed back to the caller.
const ERROR_EXCERPT_CHARS: usize = 200;

/// HTTP client for the downstream ingestion endpoint.
pub struct IngestionClient {
    client: Client,
    endpoint_url: String,
    service_key: String,
}

impl IngestionClient {
    pub fn new(endpoint_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint_url: endpoint_url.into(),
            service_key: service_key.into(),
        }
    }
}

#[async_trait]
impl IngestionClientTrait for IngestionClient {
    async fn dispatch(&self, request: &IngestionRequest) -> Result<IngestionReceipt> {
        debug!(
            "Dispatching ingestion for {} on {}",
            request.contract_address, request.network
        );

        let response = self
            .client
            .post(&self.endpoint_url)
            .bearer_auth(&self.service_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(ERROR_EXCERPT_CHARS).collect();
            return Err(Error::Upstream(format!("HTTP {} - {}", status, excerpt)));
        }

        response
            .json::<IngestionReceipt>()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse ingestion response: {}", e)))
    }
}
