//! Non-pausable time sources the play clock is built on.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Abstraction over monotonic time sources.
pub trait TimeSource {
    /// Current time in milliseconds from an arbitrary epoch.
    fn now_ms(&self) -> f64;
}

/// Wall-clock source backed by `Instant`.
pub struct SystemTimeSource {
    start: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven source for deterministic tests and simulations.
#[derive(Default)]
pub struct ManualTimeSource {
    current_ms: Cell<f64>,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: f64) {
        self.current_ms.set(ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.current_ms.set(self.current_ms.get() + delta_ms);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_ms(&self) -> f64 {
        self.current_ms.get()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn now_ms(&self) -> f64 {
        (**self).now_ms()
    }
}
