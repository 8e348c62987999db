//! BrasilAPI client
//!
//! `GET {base}/cep/v1/{cep}` → `{ state, city, street, ... }`.
//! Errors come back as `{ "message": "...", ... }` with a non-2xx status.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::{CepError, CepInfo, CepLookup};

/// Default public endpoint
pub const DEFAULT_BASE_URL: &str = "https://brasilapi.com.br/api";

#[derive(Debug, Clone)]
pub struct BrasilApiClient {
    client: reqwest::Client,
    base_url: Url,
}

/// Error body returned by BrasilAPI on failures
#[derive(Debug, Deserialize)]
struct UpstreamError {
    #[serde(default)]
    message: Option<String>,
}

/// Client construction errors
#[derive(Debug, thiserror::Error)]
pub enum CepClientError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl BrasilApiClient {
    /// Create a client for `base_url`. Every lookup is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CepClientError> {
        let base_url = Url::parse(base_url).map_err(|e| CepClientError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(CepClientError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    fn cep_url(&self, cep: &str) -> Result<Url, CepError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CepError::new(None, Some(format!("Invalid base URL: {}", self.base_url))))?
            .pop_if_empty()
            .extend(["cep", "v1", cep]);
        Ok(url)
    }
}

#[async_trait]
impl CepLookup for BrasilApiClient {
    async fn lookup(&self, cep: &str) -> Result<CepInfo, CepError> {
        let url = self.cep_url(cep)?;
        tracing::debug!(url = %url, "Requesting BrasilAPI");

        let response = self.client.get(url).send().await.map_err(|e| {
            CepError::new(e.status().map(|s| s.as_u16()), Some(e.to_string()))
        })?;

        let status = response.status();
        tracing::debug!(status = %status, "BrasilAPI response");

        if status.is_success() {
            return response
                .json::<CepInfo>()
                .await
                .map_err(|e| CepError::new(None, Some(format!("Failed to parse CEP response: {e}"))));
        }

        let message = response
            .json::<UpstreamError>()
            .await
            .ok()
            .and_then(|body| body.message);

        Err(CepError::new(Some(status.as_u16()), message))
    }
}
