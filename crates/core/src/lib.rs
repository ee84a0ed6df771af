//! Cold-case catalog and episode cue engine.
//!
//! Everything in this crate is pure: no network, no filesystem, no clock
//! reads. Data sources live in `coldcase-sources` and the timer-driven
//! player runtime in `coldcase-player`; both feed values into the
//! functions exported here.

pub mod card;
pub mod case;
pub mod catalog;
pub mod cue;
pub mod debounce;
pub mod episode;
pub mod error;
pub mod facets;
pub mod filter;
pub mod pagination;
pub mod playback;
pub mod quality;
pub mod scene;
pub mod session;
pub mod stats;
pub mod synthetic;

pub use case::CaseRecord;
pub use catalog::Catalog;
pub use cue::VisualCue;
pub use episode::Episode;
pub use error::CoreError;
pub use filter::FilterState;
