//! Data sources for the cold-case catalog and episode player.
//!
//! The backend API is tried first, then a static JSON export, then data
//! built in memory. See [`loader`] for the chains.

pub mod api;
pub mod config;
pub mod error;
pub mod loader;
pub mod markers;
pub mod source;
pub mod static_files;

pub use api::ApiClient;
pub use config::SourceConfig;
pub use error::SourceError;
pub use loader::{load_cases, load_episode, load_stats, LoadedCases, LoadedEpisode, LoadedStats, Origin};
pub use markers::FileMarkerStore;
pub use static_files::{StaticCases, StaticEpisode};
