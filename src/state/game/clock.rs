//! Pausable play clock.
//!
//! The clock never subtracts paused durations. Pausing stores how far play
//! had progressed; resuming forgets the reference point, and the next tick
//! re-derives it as `now - offset`. Any number of pause/resume cycles
//! therefore leaves elapsed time continuous.

#[derive(Debug, Clone, Default)]
pub struct PlayClock {
    /// Source timestamp corresponding to elapsed zero. Unset until a tick.
    reference_ms: Option<f64>,
    /// Elapsed time captured at the last pause.
    pause_offset_ms: f64,
    /// Last elapsed value handed out, keeps readings non-decreasing.
    last_elapsed_ms: f64,
    paused: bool,
}

impl PlayClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the clock for a fresh session. The reference is fixed on the first tick.
    pub fn start(&mut self) {
        *self = Self::default();
    }

    /// Freezes elapsed time at its value for `now_ms`.
    pub fn pause(&mut self, now_ms: f64) {
        if self.paused {
            return;
        }
        self.pause_offset_ms = self.elapsed(now_ms);
        self.last_elapsed_ms = self.pause_offset_ms;
        self.paused = true;
    }

    /// Lets the next tick re-derive the reference. No-op unless paused.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.reference_ms = None;
        self.paused = false;
    }

    /// Fixes the reference if needed and returns the elapsed time.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        if self.paused {
            return self.pause_offset_ms;
        }
        let raw = match self.reference_ms {
            Some(reference) => now_ms - reference,
            None => {
                self.reference_ms = Some(now_ms - self.pause_offset_ms);
                self.pause_offset_ms
            }
        };
        let elapsed = raw.max(self.last_elapsed_ms).max(0.0);
        self.last_elapsed_ms = elapsed;
        elapsed
    }

    /// Reads elapsed time without fixing the reference.
    pub fn elapsed(&self, now_ms: f64) -> f64 {
        if self.paused {
            return self.pause_offset_ms;
        }
        match self.reference_ms {
            Some(reference) => (now_ms - reference).max(self.last_elapsed_ms).max(0.0),
            None => self.pause_offset_ms.max(self.last_elapsed_ms),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reference_is_fixed_on_first_tick() {
        let mut clock = PlayClock::new();
        clock.start();
        assert_eq!(clock.elapsed(5000.0), 0.0);
        assert_eq!(clock.tick(5000.0), 0.0);
        assert_eq!(clock.tick(5250.0), 250.0);
    }

    #[test]
    fn pause_then_resume_keeps_elapsed() {
        let mut clock = PlayClock::new();
        clock.start();
        clock.tick(100.0);
        let before = clock.tick(900.0);
        clock.pause(900.0);
        clock.resume();
        assert_eq!(clock.tick(900.0), before);
    }

    #[test]
    fn paused_duration_is_not_counted() {
        let mut clock = PlayClock::new();
        clock.start();
        clock.tick(0.0);
        clock.tick(1000.0);
        clock.pause(1000.0);
        assert_eq!(clock.elapsed(60_000.0), 1000.0);
        clock.resume();
        assert_eq!(clock.tick(61_000.0), 1000.0);
        assert_eq!(clock.tick(61_500.0), 1500.0);
    }

    #[test]
    fn survives_many_pause_cycles() {
        let mut clock = PlayClock::new();
        clock.start();
        clock.tick(0.0);
        let mut now = 0.0;
        for cycle in 1..=5 {
            now += 200.0;
            assert_eq!(clock.tick(now), 200.0 * cycle as f64);
            clock.pause(now);
            now += 10_000.0;
            clock.resume();
            assert_eq!(clock.tick(now), 200.0 * cycle as f64);
        }
    }

    #[test]
    fn resume_without_pause_is_noop() {
        let mut clock = PlayClock::new();
        clock.start();
        clock.tick(0.0);
        clock.tick(400.0);
        clock.resume();
        assert_eq!(clock.tick(500.0), 500.0);
    }

    #[test]
    fn double_pause_keeps_first_capture() {
        let mut clock = PlayClock::new();
        clock.start();
        clock.tick(0.0);
        clock.pause(300.0);
        clock.pause(900.0);
        assert_eq!(clock.elapsed(1200.0), 300.0);
    }

    #[test]
    fn never_negative_or_backwards() {
        let mut clock = PlayClock::new();
        clock.start();
        clock.tick(1000.0);
        assert_eq!(clock.tick(400.0), 0.0);
        clock.tick(1600.0);
        assert_eq!(clock.tick(1500.0), 600.0);
    }

    proptest! {
        #[test]
        fn elapsed_is_monotonic_across_pauses(
            steps in prop::collection::vec((0.0f64..500.0, any::<bool>()), 1..40),
        ) {
            let mut clock = PlayClock::new();
            clock.start();
            let mut now = 0.0;
            let mut last = clock.tick(now);
            for (delta, toggle) in steps {
                now += delta;
                if toggle {
                    let before = clock.elapsed(now);
                    clock.pause(now);
                    now += delta * 3.0;
                    clock.resume();
                    prop_assert_eq!(clock.tick(now), before);
                }
                let elapsed = clock.tick(now);
                prop_assert!(elapsed >= last);
                prop_assert!(elapsed >= 0.0);
                last = elapsed;
            }
        }
    }
}
