//! Static JSON exports read from disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use coldcase_core::episode::EpisodePayload;
use coldcase_core::CaseRecord;

use crate::api::CasesResponse;
use crate::error::SourceError;
use crate::source::{CaseSource, EpisodeSource};

async fn read(path: &Path) -> Result<String, SourceError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// `cases.json`, in either the wrapped or the bare-array shape.
#[derive(Debug, Clone)]
pub struct StaticCases {
    path: PathBuf,
}

impl StaticCases {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CaseSource for StaticCases {
    fn name(&self) -> &'static str {
        "static_file"
    }

    async fn fetch_cases(&self) -> Result<Vec<CaseRecord>, SourceError> {
        let raw = read(&self.path).await?;
        let body: CasesResponse = serde_json::from_str(&raw)?;
        Ok(body.into_records())
    }
}

/// `episode_data.json` written by the episode generator.
#[derive(Debug, Clone)]
pub struct StaticEpisode {
    path: PathBuf,
}

impl StaticEpisode {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EpisodeSource for StaticEpisode {
    fn name(&self) -> &'static str {
        "static_file"
    }

    async fn fetch_episode(&self) -> Result<EpisodePayload, SourceError> {
        let raw = read(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}
