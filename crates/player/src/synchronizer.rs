//! Maps playback position to scene state.
//!
//! [`CueSynchronizer`] is edge-triggered: [`CueSynchronizer::on_position`]
//! only produces events when the resolved cue index differs from the
//! previous one. Delayed effects (popup hides, image swaps) are held in
//! [`Timers`] and applied by [`CueSynchronizer::on_timers`]. Neither method
//! reads a clock; the caller passes `now`.

use coldcase_core::case::UNKNOWN_LOCATION;
use coldcase_core::cue::{find_active_cue, truncate_dialogue, Speaker, VisualCue};
use coldcase_core::episode::Episode;
use coldcase_core::scene::{CaseImage, ImageSelector, Mood};
use tokio::time::Instant;

use crate::bus::SceneEvent;
use crate::timers::{TimerKind, Timers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationStamp {
    pub location: String,
    pub date: Option<String>,
}

/// Everything currently visible in the player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneState {
    pub speaker: Option<Speaker>,
    pub dialogue: String,
    pub location: Option<LocationStamp>,
    pub evidence: Option<String>,
    /// Index of the image on screen.
    pub image: Option<usize>,
    pub image_visible: bool,
    /// Image waiting for the fade-out to finish.
    pub pending_image: Option<usize>,
    pub mood: Mood,
    pub caption: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CueSynchronizer {
    cues: Vec<VisualCue>,
    images: Vec<CaseImage>,
    case_location: Option<String>,
    case_date: Option<String>,
    active: Option<usize>,
    selector: ImageSelector,
    timers: Timers,
    scene: SceneState,
    evidence_generation: Option<u64>,
    caption_generation: Option<u64>,
}

impl CueSynchronizer {
    pub fn new(episode: &Episode) -> Self {
        Self::from_parts(
            episode.visual_cues.clone(),
            episode.case.images.clone(),
            episode.case.location.clone(),
            episode.case.date.clone(),
        )
    }

    /// `cues` must already be sorted by time.
    pub fn from_parts(
        cues: Vec<VisualCue>,
        images: Vec<CaseImage>,
        case_location: Option<String>,
        case_date: Option<String>,
    ) -> Self {
        Self {
            cues,
            images,
            case_location,
            case_date,
            active: None,
            selector: ImageSelector::new(),
            timers: Timers::new(),
            scene: SceneState::default(),
            evidence_generation: None,
            caption_generation: None,
        }
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn cues(&self) -> &[VisualCue] {
        &self.cues
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Resolve the cue for position `t` and apply it if it changed.
    pub fn on_position(&mut self, t: f64, now: Instant) -> Vec<SceneEvent> {
        if self.cues.is_empty() {
            return Vec::new();
        }

        let index = find_active_cue(&self.cues, t);
        if self.active == Some(index) {
            return Vec::new();
        }
        self.active = Some(index);

        let cue = self.cues[index].clone();
        tracing::debug!(cue_index = index, time = cue.time, speaker = %cue.speaker, "Cue activated");
        self.apply_cue(index, &cue, now)
    }

    /// Fire every timer due at `now`.
    pub fn on_timers(&mut self, now: Instant) -> Vec<SceneEvent> {
        let mut events = Vec::new();

        for kind in TimerKind::ALL {
            let Some(fired) = self.timers.take_due(kind, now) else {
                continue;
            };

            match kind {
                TimerKind::ImageSwap => self.finish_swap(fired.deadline, &mut events),
                TimerKind::EvidenceHide => {
                    if self.evidence_generation == Some(fired.generation) {
                        self.evidence_generation = None;
                        self.scene.evidence = None;
                        events.push(SceneEvent::EvidenceHidden);
                    }
                }
                TimerKind::CaptionHide => {
                    if self.caption_generation == Some(fired.generation) {
                        self.caption_generation = None;
                        self.scene.caption = None;
                        events.push(SceneEvent::CaptionHidden);
                    }
                }
            }
        }

        events
    }

    fn apply_cue(&mut self, index: usize, cue: &VisualCue, now: Instant) -> Vec<SceneEvent> {
        let mut events = vec![SceneEvent::CueActivated { index, time: cue.time }];

        self.scene.speaker = Some(cue.speaker);
        events.push(SceneEvent::SpeakerChanged { speaker: cue.speaker });

        let text = truncate_dialogue(&cue.text).into_owned();
        self.scene.dialogue = text.clone();
        events.push(SceneEvent::DialogueChanged { text });

        if cue.show_location {
            let stamp = LocationStamp {
                location: cue
                    .location
                    .clone()
                    .or_else(|| self.case_location.clone())
                    .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
                date: cue.date.clone().or_else(|| self.case_date.clone()),
            };
            events.push(SceneEvent::LocationShown {
                location: stamp.location.clone(),
                date: stamp.date.clone(),
            });
            self.scene.location = Some(stamp);
        } else if self.scene.location.take().is_some() {
            events.push(SceneEvent::LocationHidden);
        }

        if let Some(text) = cue.evidence_popup() {
            self.scene.evidence = Some(text.to_string());
            self.evidence_generation = Some(self.timers.schedule(TimerKind::EvidenceHide, now));
            events.push(SceneEvent::EvidenceShown { text: text.to_string() });
        }

        if let Some(next) = self.selector.select(cue, &self.images) {
            let already_there = self.scene.pending_image.is_none() && self.scene.image == Some(next);
            if !already_there && self.scene.pending_image != Some(next) {
                self.scene.image_visible = false;
                self.scene.pending_image = Some(next);
                self.timers.schedule(TimerKind::ImageSwap, now);
                events.push(SceneEvent::ImageFading { index: next });
            }
        }

        let mood = Mood::for_text(&cue.text);
        self.scene.mood = mood;
        events.push(SceneEvent::MoodChanged {
            mood,
            filter: mood.filter(),
        });

        events
    }

    fn finish_swap(&mut self, swapped_at: Instant, events: &mut Vec<SceneEvent>) {
        let Some(index) = self.scene.pending_image.take() else {
            return;
        };
        let Some(image) = self.images.get(index) else {
            return;
        };

        self.scene.image = Some(index);
        self.scene.image_visible = true;
        events.push(SceneEvent::ImageShown {
            index,
            path: image.path.clone(),
        });

        match image.credit_line() {
            Some(text) => {
                self.scene.caption = Some(text.clone());
                self.caption_generation = Some(self.timers.schedule(TimerKind::CaptionHide, swapped_at));
                events.push(SceneEvent::CaptionShown { text });
            }
            None => {
                // The previous image's credit must not outlive it.
                self.timers.cancel(TimerKind::CaptionHide);
                self.caption_generation = None;
                if self.scene.caption.take().is_some() {
                    events.push(SceneEvent::CaptionHidden);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
