use crate::TimeSource;
use std::time::Instant;

/// A monotonic time source that returns the milliseconds elapsed since it was
/// constructed.
///
/// Backed by [`Instant`], so wall-clock adjustments (e.g., NTP or daylight
/// savings changes) can neither shorten nor stretch a running cooldown.
/// Clones share the same origin.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pickup_registry::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::default();
/// std::thread::sleep(Duration::from_millis(5));
///
/// assert!(clock.current_millis() >= 5);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Constructs a clock whose origin (t = 0) is now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Constructs a clock anchored to an earlier instant.
    pub const fn with_origin(start: Instant) -> Self {
        Self { start }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        // ~584 million years before this saturates
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn never_goes_backwards() {
        let clock = MonotonicClock::default();
        let mut last = clock.current_millis();
        for _ in 0..1_000 {
            let now = clock.current_millis();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn origin_is_respected() {
        let origin = Instant::now();
        std::thread::sleep(Duration::from_millis(20));
        let clock = MonotonicClock::with_origin(origin);
        assert!(clock.current_millis() >= 20);
    }
}
