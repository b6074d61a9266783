use super::SessionState;
use thiserror::Error;

/// Reasons a lifecycle command is refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Session already active ({0:?}); reset or end it before starting another")]
    SessionActive(SessionState),

    #[error("No key table for {0} lanes")]
    UnsupportedLaneCount(usize),

    #[error("Speed multiplier must be positive and finite, got {0}")]
    InvalidSpeed(f64),

    #[error("Chart horizon must be positive and finite, got {0}")]
    InvalidHorizon(f64),
}
