//! State management module.
//!
//! `GameSession` holds all state for one play, from start to reset.

pub mod game;

pub use game::{ActiveNote, GameSession, PlayClock, SessionError, SessionState};
