//! REST client for the case backend.
//!
//! Wraps `GET /cases`, `GET /cases/stats` and `GET /api/episode` using
//! [`reqwest`]. Non-2xx responses become [`SourceError::Api`].

use std::time::Duration;

use async_trait::async_trait;
use coldcase_core::episode::EpisodePayload;
use coldcase_core::stats::CaseStats;
use coldcase_core::CaseRecord;
use serde::Deserialize;

use crate::error::SourceError;
use crate::source::{CaseSource, EpisodeSource, StatsSource};

/// `GET /cases` answers either `{ "cases": [...] }` or a bare array.
///
/// Entries are decoded one by one so a single unreadable record does not
/// discard the rest of the list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CasesResponse {
    Wrapped { cases: Vec<serde_json::Value> },
    Bare(Vec<serde_json::Value>),
}

impl CasesResponse {
    pub fn into_records(self) -> Vec<CaseRecord> {
        let entries = match self {
            CasesResponse::Wrapped { cases } => cases,
            CasesResponse::Bare(cases) => cases,
        };
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(position, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(position, error = %e, "Skipping unreadable case record");
                    None
                }
            })
            .collect()
    }
}

/// HTTP client for one backend instance.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    case_limit: u32,
}

impl ApiClient {
    /// Build a client with its own connection pool and request timeout.
    ///
    /// * `base_url` - e.g. `http://localhost:8000`, without trailing slash.
    pub fn new(base_url: impl Into<String>, case_limit: u32, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, case_limit))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>, case_limit: u32) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            case_limit,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /cases?limit=N`.
    pub async fn list_cases(&self) -> Result<Vec<CaseRecord>, SourceError> {
        let response = self
            .client
            .get(format!("{}/cases", self.base_url))
            .query(&[("limit", self.case_limit)])
            .send()
            .await?;

        let body: CasesResponse = Self::parse_response(response).await?;
        Ok(body.into_records())
    }

    /// `GET /cases/stats`.
    pub async fn get_stats(&self) -> Result<CaseStats, SourceError> {
        let response = self
            .client
            .get(format!("{}/cases/stats", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /api/episode`.
    pub async fn get_episode(&self) -> Result<EpisodePayload, SourceError> {
        let response = self
            .client
            .get(format!("{}/api/episode", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Pass a success response through; turn anything else into
    /// [`SourceError::Api`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SourceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SourceError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SourceError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CaseSource for ApiClient {
    fn name(&self) -> &'static str {
        "api"
    }

    async fn fetch_cases(&self) -> Result<Vec<CaseRecord>, SourceError> {
        self.list_cases().await
    }
}

#[async_trait]
impl StatsSource for ApiClient {
    fn name(&self) -> &'static str {
        "api"
    }

    async fn fetch_stats(&self) -> Result<CaseStats, SourceError> {
        self.get_stats().await
    }
}

#[async_trait]
impl EpisodeSource for ApiClient {
    fn name(&self) -> &'static str {
        "api"
    }

    async fn fetch_episode(&self) -> Result<EpisodePayload, SourceError> {
        self.get_episode().await
    }
}
