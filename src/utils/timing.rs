//! Timing helpers for probe measurements and jittered scheduling.

use std::time::Duration;

use rand::Rng;

/// Converts a duration to whole milliseconds, rounding to the nearest millisecond.
///
/// Saturates at `u64::MAX` for durations that do not fit.
pub fn duration_to_ms(duration: Duration) -> u64 {
    let micros = duration.as_micros();
    u64::try_from((micros + 500) / 1000).unwrap_or(u64::MAX)
}

/// Picks a delay uniformly at random in `[min, max]` (inclusive, millisecond
/// granularity).
///
/// If the bounds are inverted, `min` is returned.
pub fn jittered_delay(min: Duration, max: Duration) -> Duration {
    let min_ms = duration_to_ms(min);
    let max_ms = duration_to_ms(max);
    if max_ms <= min_ms {
        return min;
    }
    Duration::from_millis(rand::rng().random_range(min_ms..=max_ms))
}
