//! Falling-note rhythm game engine.
//!
//! The crate holds the timing and judgement core: chart generation, a
//! pausable play clock, the per-frame motion update and miss sweep, hit
//! judgement and score keeping. Rendering and menus live outside and talk
//! to the core through [`system::bus::SystemBus`] or directly through
//! [`state::GameSession`].

pub mod core;
pub mod logic;
pub mod models;
pub mod shared;
pub mod state;
pub mod system;
