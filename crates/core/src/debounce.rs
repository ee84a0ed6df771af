//! Deadline-driven debouncing.
//!
//! The debouncer never reads a clock; callers pass `now`. A runtime polls
//! [`Debouncer::deadline`] to know when to wake up.

use std::time::{Duration, Instant};

/// Quiet window for the search box.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds the most recent value until no newer one arrives for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// Replace any pending value and restart the quiet window.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// When the pending value becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    /// Take the pending value if its quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((due, _)) if *due <= now => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_quiet_window() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.push("min", t0);

        assert_eq!(debouncer.poll(t0 + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(300)), Some("min"));
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn only_last_keystroke_takes_effect() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        debouncer.push("m", t0);
        debouncer.push("mi", t0 + Duration::from_millis(100));
        debouncer.push("min", t0 + Duration::from_millis(250));

        // The first keystroke's window has passed, but it was replaced.
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(320)), None);
        assert_eq!(debouncer.deadline(), Some(t0 + Duration::from_millis(550)));
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(550)), Some("min"));
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(900)), None);
    }
}
