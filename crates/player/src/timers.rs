//! Auto-hide and swap deadlines.
//!
//! Each timer slot holds at most one pending deadline. Scheduling into an
//! occupied slot replaces the old deadline, and every schedule carries a
//! fresh generation so a stale firing can be recognized and ignored.

use std::time::Duration;

use tokio::time::Instant;

/// Evidence popups stay up this long after being shown.
pub const EVIDENCE_HIDE_DELAY: Duration = Duration::from_millis(4000);
/// Image attribution captions stay up this long.
pub const CAPTION_HIDE_DELAY: Duration = Duration::from_millis(3000);
/// Fade-out time before the new image source is swapped in.
pub const IMAGE_SWAP_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    EvidenceHide,
    CaptionHide,
    ImageSwap,
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [TimerKind::ImageSwap, TimerKind::EvidenceHide, TimerKind::CaptionHide];

    pub fn delay(&self) -> Duration {
        match self {
            TimerKind::EvidenceHide => EVIDENCE_HIDE_DELAY,
            TimerKind::CaptionHide => CAPTION_HIDE_DELAY,
            TimerKind::ImageSwap => IMAGE_SWAP_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub deadline: Instant,
    pub generation: u64,
}

#[derive(Debug, Default, Clone)]
pub struct Timers {
    evidence_hide: Option<Scheduled>,
    caption_hide: Option<Scheduled>,
    image_swap: Option<Scheduled>,
    next_generation: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire `kind.delay()` after `from`, replacing any
    /// pending deadline of the same kind. Returns the new generation.
    pub fn schedule(&mut self, kind: TimerKind, from: Instant) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        *self.slot_mut(kind) = Some(Scheduled {
            deadline: from + kind.delay(),
            generation,
        });
        generation
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        *self.slot_mut(kind) = None;
    }

    pub fn pending(&self, kind: TimerKind) -> Option<Scheduled> {
        match kind {
            TimerKind::EvidenceHide => self.evidence_hide,
            TimerKind::CaptionHide => self.caption_hide,
            TimerKind::ImageSwap => self.image_swap,
        }
    }

    /// Earliest pending deadline across all slots.
    pub fn next_deadline(&self) -> Option<Instant> {
        TimerKind::ALL
            .iter()
            .filter_map(|kind| self.pending(*kind))
            .map(|s| s.deadline)
            .min()
    }

    /// Take `kind` out of its slot if it is due at `now`.
    pub fn take_due(&mut self, kind: TimerKind, now: Instant) -> Option<Scheduled> {
        let slot = self.slot_mut(kind);
        if slot.is_some_and(|s| s.deadline <= now) {
            slot.take()
        } else {
            None
        }
    }

    fn slot_mut(&mut self, kind: TimerKind) -> &mut Option<Scheduled> {
        match kind {
            TimerKind::EvidenceHide => &mut self.evidence_hide,
            TimerKind::CaptionHide => &mut self.caption_hide,
            TimerKind::ImageSwap => &mut self.image_swap,
        }
    }
}
