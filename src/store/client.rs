//! HTTP client for fetching raw cost records from the dashboard backend.

use crate::utils::config::DEFAULT_HTTP_TIMEOUT;
use crate::utils::error::StoreError;
use log::{debug, info};
use reqwest::blocking::Client;
use std::time::Duration;

/// Blocking client for the records endpoint
pub struct RecordsClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RecordsClient {
    /// Create a new client with the default timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        Self::with_timeout(base_url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a client with custom timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(StoreError::RequestFailed)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Fetch the raw record payload
    ///
    /// # Arguments
    /// * `period` - Optional reporting period (e.g. `2024-03`), sent as `?month=`
    ///
    /// # Returns
    /// The undecoded JSON body; shape checks happen in the parser
    pub fn fetch_records(&self, period: Option<&str>) -> Result<serde_json::Value, StoreError> {
        let url = build_url(&self.base_url, period);
        info!("Fetching cost records from: {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(StoreError::RequestFailed)?;

        // Check HTTP status
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::InvalidResponse(format!(
                "HTTP {}: {}",
                status,
                response.text().unwrap_or_default()
            )));
        }

        let body: serde_json::Value = response.json().map_err(StoreError::RequestFailed)?;
        debug!("Received records payload from {}", url);

        Ok(body)
    }
}

/// Append the period query parameter, respecting an existing query string
fn build_url(base_url: &str, period: Option<&str>) -> String {
    match period {
        Some(period) => {
            let separator = if base_url.contains('?') { '&' } else { '?' };
            format!("{}{}month={}", base_url, separator, period)
        }
        None => base_url.to_string(),
    }
}
