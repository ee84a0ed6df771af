//! Source traits consumed by the loaders.

use async_trait::async_trait;
use coldcase_core::episode::EpisodePayload;
use coldcase_core::stats::CaseStats;
use coldcase_core::CaseRecord;

use crate::error::SourceError;

/// Anything that can produce the full case list.
#[async_trait]
pub trait CaseSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn fetch_cases(&self) -> Result<Vec<CaseRecord>, SourceError>;
}

/// Backend-side aggregate statistics.
#[async_trait]
pub trait StatsSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_stats(&self) -> Result<CaseStats, SourceError>;
}

/// Anything that can produce an episode document.
#[async_trait]
pub trait EpisodeSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_episode(&self) -> Result<EpisodePayload, SourceError>;
}
