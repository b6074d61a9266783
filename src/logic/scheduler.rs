//! Cancelable frame requests.
//!
//! Works like a display-refresh callback: the session requests a frame,
//! the driver hands the pending token back on the next refresh, and the
//! session only runs a tick if the token is still current. Cancelling bumps
//! the generation, so a token taken before the cancel can never fire.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken {
    generation: u64,
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    generation: u64,
    pending: Option<FrameToken>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the next frame. Requesting twice before it fires is a no-op.
    pub fn request(&mut self) -> FrameToken {
        *self.pending.get_or_insert(FrameToken {
            generation: self.generation,
        })
    }

    /// Drops any pending frame and invalidates tokens already handed out.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    /// Takes the pending frame, if any, for the driver to fire.
    pub fn take_due(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }

    /// Whether a token may still run.
    pub fn accepts(&self, token: FrameToken) -> bool {
        token.generation == self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
