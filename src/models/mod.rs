//! Plain data: notes, charts, judgement windows, stats and configuration.

pub mod engine;
pub mod settings;
pub mod stats;
