//! Animation clock
//!
//! A free-running stopwatch started at scene mount. It is the single time
//! source every animated part reads from, so the nucleus and shells can
//! never drift apart: all transforms are pure functions of one elapsed
//! value per frame.

use std::time::Instant;

/// Monotonic elapsed-time source, advanced once per rendered frame.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    elapsed: f32,
    frames: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Advance to the current wall-clock time. Call once per frame.
    ///
    /// Returns the elapsed seconds since the clock was created.
    pub fn tick(&mut self) -> f32 {
        // max() guards against platform clock quirks; elapsed never rewinds
        self.elapsed = self.start.elapsed().as_secs_f32().max(self.elapsed);
        self.frames += 1;
        self.elapsed
    }

    /// Elapsed seconds at the last tick
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of ticks since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_new_clock_is_at_zero() {
        let clock = Clock::new();
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.frames(), 0);
    }

    #[test]
    fn test_tick_advances_elapsed_and_frames() {
        let mut clock = Clock::new();
        thread::sleep(Duration::from_millis(5));
        let t = clock.tick();
        assert!(t > 0.0);
        assert_eq!(clock.frames(), 1);
        assert_eq!(clock.elapsed(), t);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let mut clock = Clock::new();
        let mut last = 0.0;
        for _ in 0..10 {
            let t = clock.tick();
            assert!(t >= last);
            last = t;
        }
        assert_eq!(clock.frames(), 10);
    }
}
