//! HTTP adapter for the cycle-listing API.
//!
//! Calls `GET {base_url}/cycles` and decodes either a bare JSON array of
//! cycles or a `{ "data": [...] }` envelope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::cycle::CycleListEntry;
use crate::ports::{CycleListError, CycleLister};

/// Configuration for the HTTP cycle lister.
#[derive(Debug, Clone)]
pub struct HttpCycleListerConfig {
    /// Base URL of the assessment API (e.g., "https://api.example.com/v1").
    pub base_url: String,
    /// Bearer token sent with each request, if any.
    api_token: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpCycleListerConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the bearer token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Secret::new(token.into()));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of the cycle listing endpoint.
    pub fn cycles_url(&self) -> String {
        format!("{}/cycles", self.base_url.trim_end_matches('/'))
    }
}

/// Accepted response bodies.
#[derive(Deserialize)]
#[serde(untagged)]
enum CycleListBody {
    List(Vec<CycleListEntry>),
    Envelope { data: Vec<CycleListEntry> },
}

impl CycleListBody {
    fn into_entries(self) -> Vec<CycleListEntry> {
        match self {
            CycleListBody::List(entries) => entries,
            CycleListBody::Envelope { data } => data,
        }
    }
}

/// Decodes a cycle listing response body.
pub fn decode_cycle_list(body: &str) -> Result<Vec<CycleListEntry>, CycleListError> {
    serde_json::from_str::<CycleListBody>(body)
        .map(CycleListBody::into_entries)
        .map_err(|e| CycleListError::InvalidResponse(e.to_string()))
}

/// Cycle lister backed by the assessment REST API.
pub struct HttpCycleLister {
    config: HttpCycleListerConfig,
    client: Client,
}

impl HttpCycleLister {
    /// Creates a lister with its own HTTP client.
    pub fn new(config: HttpCycleListerConfig) -> Result<Self, CycleListError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CycleListError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn map_transport_error(e: reqwest::Error) -> CycleListError {
        if e.is_timeout() {
            CycleListError::Timeout
        } else {
            CycleListError::Unavailable(e.to_string())
        }
    }
}

#[async_trait]
impl CycleLister for HttpCycleLister {
    async fn list_cycles(&self) -> Result<Vec<CycleListEntry>, CycleListError> {
        let url = self.config.cycles_url();

        tracing::debug!("Fetching cycle list from {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to fetch cycle list: {}", e);
            Self::map_transport_error(e)
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Cycle list endpoint returned {}", status);
            return Err(CycleListError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(Self::map_transport_error)?;
        let entries = decode_cycle_list(&body)?;

        tracing::debug!("Fetched {} cycles", entries.len());

        Ok(entries)
    }
}
