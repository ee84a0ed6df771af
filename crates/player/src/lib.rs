//! Episode player runtime.
//!
//! - [`CueSynchronizer`] turns playback positions into scene changes.
//! - [`PlayerDriver`] runs it on the tokio clock and fires its timers.
//! - [`SceneBus`] broadcasts the resulting [`SceneEvent`]s.
//! - [`PlaybackControls`] maps buttons and keys onto a [`MediaClock`].

pub mod bus;
pub mod controls;
pub mod driver;
pub mod error;
pub mod synchronizer;
pub mod timers;

pub use bus::{SceneBus, SceneEvent};
pub use controls::{MediaClock, PlaybackControls, SimulatedClock};
pub use driver::PlayerDriver;
pub use error::PlayerError;
pub use synchronizer::{CueSynchronizer, SceneState};
