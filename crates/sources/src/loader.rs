//! Fallback chains.
//!
//! Each loader walks its sources in order and keeps the first usable
//! answer. A failed or empty source is logged and skipped. When every
//! source is exhausted the loader falls back to data built in memory, so
//! these functions cannot fail.

use coldcase_core::episode::Episode;
use coldcase_core::stats::CaseStats;
use coldcase_core::synthetic::{CaseGenerator, SAMPLE_CASE_COUNT};
use coldcase_core::CaseRecord;

use crate::error::SourceError;
use crate::source::{CaseSource, EpisodeSource, StatsSource};

/// Where a loaded value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The named source answered.
    Source(&'static str),
    /// Built in memory after every source failed.
    Builtin,
}

impl Origin {
    pub fn label(&self) -> &'static str {
        match self {
            Origin::Source(name) => name,
            Origin::Builtin => "builtin",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedCases {
    pub records: Vec<CaseRecord>,
    pub origin: Origin,
}

/// Load the case list: each source in order, then `generator`.
///
/// The result always holds at least one record.
pub async fn load_cases(sources: &[&dyn CaseSource], generator: &dyn CaseGenerator) -> LoadedCases {
    for source in sources {
        let result = source
            .fetch_cases()
            .await
            .and_then(|records| if records.is_empty() { Err(SourceError::Empty) } else { Ok(records) });

        match result {
            Ok(records) => {
                tracing::info!(source = source.name(), count = records.len(), "Loaded cases");
                return LoadedCases {
                    records,
                    origin: Origin::Source(source.name()),
                };
            }
            Err(e) => {
                tracing::warn!(source = source.name(), error = %e, "Case source unavailable, falling back");
            }
        }
    }

    let records = generator.generate(SAMPLE_CASE_COUNT);
    tracing::warn!(count = records.len(), "Using synthetic sample cases");
    LoadedCases {
        records,
        origin: Origin::Builtin,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedStats {
    pub stats: CaseStats,
    pub origin: Origin,
}

/// Backend stats, or the same numbers recomputed from `records`.
pub async fn load_stats(source: &dyn StatsSource, records: &[CaseRecord]) -> LoadedStats {
    match source.fetch_stats().await {
        Ok(stats) => {
            tracing::info!(source = source.name(), total = stats.total_cases, "Loaded stats");
            LoadedStats {
                stats,
                origin: Origin::Source(source.name()),
            }
        }
        Err(e) => {
            tracing::warn!(source = source.name(), error = %e, "Stats unavailable, computing locally");
            LoadedStats {
                stats: CaseStats::from_records(records),
                origin: Origin::Builtin,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedEpisode {
    pub episode: Episode,
    pub origin: Origin,
}

/// Load the episode: each source in order, then [`Episode::demo`].
pub async fn load_episode(sources: &[&dyn EpisodeSource]) -> LoadedEpisode {
    for source in sources {
        match source.fetch_episode().await {
            Ok(payload) => {
                let episode = Episode::from_payload(payload);
                tracing::info!(
                    source = source.name(),
                    cues = episode.visual_cues.len(),
                    demo_cues = episode.demo_cues,
                    "Loaded episode"
                );
                return LoadedEpisode {
                    episode,
                    origin: Origin::Source(source.name()),
                };
            }
            Err(e) => {
                tracing::warn!(source = source.name(), error = %e, "Episode source unavailable, falling back");
            }
        }
    }

    tracing::warn!("Using built-in demo episode");
    LoadedEpisode {
        episode: Episode::demo(),
        origin: Origin::Builtin,
    }
}
