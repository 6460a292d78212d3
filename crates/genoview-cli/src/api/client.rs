//! HTTP client shared by all adapters

use crate::config::Config;
use crate::error::{CliError, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Client for the UCSC, NCBI and prediction services
#[derive(Debug, Clone)]
pub struct GenomeClient {
    pub(crate) client: Client,
    pub(crate) config: Config,
}

impl GenomeClient {
    /// Create a new client with the configured request timeout
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `GET` a URL and decode the JSON body.
    ///
    /// A non-success status becomes [`CliError::Upstream`] naming `service`.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str, service: &str) -> Result<T> {
        debug!(url = %url, service = service, "GET");

        let response = self.client.get(url).send().await?;
        let response = ensure_success(response, service).await?;

        Ok(response.json().await?)
    }
}

/// Turn a non-success response into an upstream error carrying the status and body.
pub(crate) async fn ensure_success(response: Response, service: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    Err(CliError::upstream(if body.is_empty() {
        format!("{} returned {}", service, status)
    } else {
        format!("{} returned {}: {}", service, status, body)
    }))
}
