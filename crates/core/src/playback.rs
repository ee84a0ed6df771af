//! Playback control arithmetic: skips, seeks, and the speed cycle.

/// Speeds offered by the speed button, in cycle order.
pub const SPEED_STEPS: [f64; 5] = [1.0, 1.25, 1.5, 1.75, 2.0];

/// Skip buttons move this many seconds.
pub const SKIP_SECONDS: f64 = 15.0;
/// Arrow keys move this many seconds.
pub const KEY_SKIP_SECONDS: f64 = 10.0;

/// The speed after `current`. Unknown speeds restart the cycle.
pub fn next_speed(current: f64) -> f64 {
    let next = SPEED_STEPS
        .iter()
        .position(|&step| step == current)
        .map_or(0, |i| (i + 1) % SPEED_STEPS.len());
    SPEED_STEPS[next]
}

/// Move `position` by `delta` seconds, clamped to `[0, duration]`.
pub fn skip(position: f64, delta: f64, duration: f64) -> f64 {
    clamp_time(position + delta, duration)
}

/// Absolute time for a click at `fraction` of the progress bar width.
pub fn seek_fraction(fraction: f64, duration: f64) -> f64 {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    clamp_time(fraction * duration, duration)
}

pub fn clamp_time(t: f64, duration: f64) -> f64 {
    let upper = if duration.is_finite() && duration > 0.0 { duration } else { 0.0 };
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(0.0, upper)
}

/// `m:ss` clock text for a position in seconds.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 { seconds.floor() as u64 } else { 0 };
    format!("{}:{:02}", total / 60, total % 60)
}
