//! Scene events and the broadcast bus that fans them out.
//!
//! [`SceneBus`] is shared by the driver and any number of presentation
//! layers. Each subscriber sees every [`SceneEvent`] in order.

use coldcase_core::cue::Speaker;
use coldcase_core::scene::Mood;
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// SceneEvent
// ---------------------------------------------------------------------------

/// One visible change to the player scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneEvent {
    CueActivated { index: usize, time: f64 },
    SpeakerChanged { speaker: Speaker },
    DialogueChanged { text: String },
    LocationShown { location: String, date: Option<String> },
    LocationHidden,
    EvidenceShown { text: String },
    EvidenceHidden,
    /// The current image started fading out; `index` will replace it.
    ImageFading { index: usize },
    ImageShown { index: usize, path: String },
    MoodChanged { mood: Mood, filter: &'static str },
    CaptionShown { text: String },
    CaptionHidden,
}

// ---------------------------------------------------------------------------
// SceneBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 256;

pub struct SceneBus {
    sender: broadcast::Sender<SceneEvent>,
}

impl SceneBus {
    /// Slow receivers observe `RecvError::Lagged` once `capacity` events
    /// are buffered.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers; dropped if there are none.
    pub fn publish(&self, event: SceneEvent) {
        let _ = self.sender.send(event);
    }

    pub fn publish_all(&self, events: impl IntoIterator<Item = SceneEvent>) {
        for event in events {
            self.publish(event);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SceneEvent> {
        self.sender.subscribe()
    }
}

impl Default for SceneBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
