//! Playback controls over an abstract media clock.

use coldcase_core::playback::{next_speed, seek_fraction, skip, KEY_SKIP_SECONDS, SKIP_SECONDS};
use tokio::time::Instant;

use crate::error::PlayerError;

/// The audio element, or anything else that keeps playback time.
pub trait MediaClock {
    /// Current position in seconds.
    fn position(&self) -> f64;
    /// Total length in seconds; `0.0` while unknown.
    fn duration(&self) -> f64;
    fn is_paused(&self) -> bool;
    /// Start playback. The host may refuse.
    fn play(&mut self) -> Result<(), PlayerError>;
    fn pause(&mut self);
    fn seek(&mut self, t: f64);
    fn set_rate(&mut self, rate: f64);
}

/// Button and keyboard handling for the player.
#[derive(Debug)]
pub struct PlaybackControls<C> {
    clock: C,
    speed: f64,
}

impl<C: MediaClock> PlaybackControls<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, speed: 1.0 }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Play when paused, pause when playing. Returns whether playback is
    /// running afterwards; a refused start leaves the player paused.
    pub fn toggle_play(&mut self) -> bool {
        if !self.clock.is_paused() {
            self.clock.pause();
            return false;
        }
        match self.clock.play() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Playback start rejected");
                false
            }
        }
    }

    pub fn skip_forward(&mut self) {
        self.skip_by(SKIP_SECONDS);
    }

    pub fn skip_back(&mut self) {
        self.skip_by(-SKIP_SECONDS);
    }

    pub fn key_forward(&mut self) {
        self.skip_by(KEY_SKIP_SECONDS);
    }

    pub fn key_back(&mut self) {
        self.skip_by(-KEY_SKIP_SECONDS);
    }

    /// Seek to a click at `fraction` of the progress bar.
    pub fn seek_click(&mut self, fraction: f64) {
        let target = seek_fraction(fraction, self.clock.duration());
        self.clock.seek(target);
    }

    /// Advance to the next speed step and return it.
    pub fn cycle_speed(&mut self) -> f64 {
        self.speed = next_speed(self.speed);
        self.clock.set_rate(self.speed);
        self.speed
    }

    fn skip_by(&mut self, delta: f64) {
        let target = skip(self.clock.position(), delta, self.clock.duration());
        self.clock.seek(target);
    }
}

/// A media clock that advances with tokio time. Used to play an episode
/// without an audio backend.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    duration: f64,
    rate: f64,
    /// Position at `anchor`.
    base: f64,
    /// Set while playing.
    anchor: Option<Instant>,
    autoplay_blocked: bool,
}

impl SimulatedClock {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            rate: 1.0,
            base: 0.0,
            anchor: None,
            autoplay_blocked: false,
        }
    }

    /// Make every `play` call fail, as a browser blocking autoplay would.
    pub fn with_autoplay_blocked(mut self) -> Self {
        self.autoplay_blocked = true;
        self
    }

    pub fn is_finished(&self) -> bool {
        self.position() >= self.duration
    }

    fn position_at(&self, now: Instant) -> f64 {
        let elapsed = self
            .anchor
            .map(|anchor| now.saturating_duration_since(anchor).as_secs_f64() * self.rate)
            .unwrap_or(0.0);
        (self.base + elapsed).min(self.duration)
    }

    /// Fold elapsed time into `base` and restart the anchor.
    fn rebase(&mut self) {
        let now = Instant::now();
        self.base = self.position_at(now);
        if self.anchor.is_some() {
            self.anchor = Some(now);
        }
    }
}

impl MediaClock for SimulatedClock {
    fn position(&self) -> f64 {
        self.position_at(Instant::now())
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn is_paused(&self) -> bool {
        self.anchor.is_none()
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        if self.autoplay_blocked {
            return Err(PlayerError::PlaybackRejected("autoplay is blocked".into()));
        }
        if self.anchor.is_none() {
            self.anchor = Some(Instant::now());
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.rebase();
        self.anchor = None;
    }

    fn seek(&mut self, t: f64) {
        self.base = t.clamp(0.0, self.duration);
        if self.anchor.is_some() {
            self.anchor = Some(Instant::now());
        }
    }

    fn set_rate(&mut self, rate: f64) {
        self.rebase();
        self.rate = rate;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;

    use super::*;

    // -- toggle_play ---------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn rejected_play_stays_paused() {
        let mut blocked = SimulatedClock::new(60.0).with_autoplay_blocked();
        assert_matches!(blocked.play(), Err(PlayerError::PlaybackRejected(_)));

        let mut controls = PlaybackControls::new(SimulatedClock::new(60.0).with_autoplay_blocked());
        assert!(!controls.toggle_play());
        assert!(controls.clock().is_paused());
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_play_pauses_and_resumes() {
        let mut controls = PlaybackControls::new(SimulatedClock::new(60.0));
        assert!(controls.toggle_play());
        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(!controls.toggle_play());
        assert_eq!(controls.clock().position(), 4.0);

        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(controls.clock().position(), 4.0);
    }

    // -- skips and seeks -----------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn skips_are_clamped() {
        let mut controls = PlaybackControls::new(SimulatedClock::new(60.0));
        controls.skip_back();
        assert_eq!(controls.clock().position(), 0.0);

        controls.skip_forward();
        controls.key_forward();
        assert_eq!(controls.clock().position(), 25.0);

        controls.seek_click(0.9);
        controls.skip_forward();
        assert_eq!(controls.clock().position(), 60.0);

        controls.key_back();
        assert_eq!(controls.clock().position(), 50.0);
    }

    // -- cycle_speed ---------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn speed_changes_clock_rate() {
        let mut controls = PlaybackControls::new(SimulatedClock::new(120.0));
        assert_eq!(controls.cycle_speed(), 1.25);
        assert_eq!(controls.cycle_speed(), 1.5);
        assert_eq!(controls.cycle_speed(), 1.75);
        assert_eq!(controls.cycle_speed(), 2.0);

        controls.toggle_play();
        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(controls.clock().position(), 6.0);

        assert_eq!(controls.cycle_speed(), 1.0);
    }
}
