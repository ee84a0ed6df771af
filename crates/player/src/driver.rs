//! Async loop that feeds the synchronizer.
//!
//! [`PlayerDriver`] receives playback positions on an mpsc channel, sleeps
//! until the next timer deadline in between, and publishes every resulting
//! [`SceneEvent`] on its [`SceneBus`]. The loop exits when cancelled, or
//! once the position channel is closed and no timers remain.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::bus::SceneBus;
use crate::synchronizer::CueSynchronizer;

pub struct PlayerDriver {
    sync: CueSynchronizer,
    bus: Arc<SceneBus>,
}

impl PlayerDriver {
    pub fn new(sync: CueSynchronizer, bus: Arc<SceneBus>) -> Self {
        Self { sync, bus }
    }

    /// Run until cancelled or drained. Returns the synchronizer so its
    /// final state can be inspected.
    pub async fn run(mut self, mut positions: mpsc::Receiver<f64>, cancel: CancellationToken) -> CueSynchronizer {
        let mut positions_open = true;

        loop {
            let deadline = self.sync.next_deadline();
            if !positions_open && deadline.is_none() {
                tracing::debug!("Position stream closed and no timers pending");
                break;
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Player driver cancelled");
                    break;
                }
                position = positions.recv(), if positions_open => {
                    match position {
                        Some(t) => {
                            let events = self.sync.on_position(t, Instant::now());
                            self.bus.publish_all(events);
                        }
                        None => positions_open = false,
                    }
                }
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    let events = self.sync.on_timers(Instant::now());
                    self.bus.publish_all(events);
                }
            }
        }

        self.sync
    }
}
