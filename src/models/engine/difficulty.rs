//! Difficulty presets driving chart density, pattern richness and scroll speed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                min_gap_ms: 600.0,
                max_gap_ms: 1000.0,
                complexity: 0.2,
                speed_factor: 0.8,
                single_bias: Some(0.7),
            },
            Difficulty::Normal => DifficultyProfile {
                min_gap_ms: 350.0,
                max_gap_ms: 700.0,
                complexity: 0.5,
                speed_factor: 1.0,
                single_bias: None,
            },
            Difficulty::Hard => DifficultyProfile {
                min_gap_ms: 200.0,
                max_gap_ms: 450.0,
                complexity: 0.9,
                speed_factor: 1.25,
                single_bias: None,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Parameters consumed by the chart generator and the motion model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Smallest step between two pattern timestamps.
    pub min_gap_ms: f64,
    /// Largest step between two pattern timestamps.
    pub max_gap_ms: f64,
    /// Gates which multi-lane patterns are eligible, in `[0, 1]`.
    pub complexity: f64,
    /// Scroll speed factor applied on top of the player's multiplier.
    pub speed_factor: f64,
    /// Probability of restricting a draw to single-lane patterns.
    pub single_bias: Option<f64>,
}
