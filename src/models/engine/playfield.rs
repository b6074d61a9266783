//! Playfield geometry and the note motion model.

use serde::{Deserialize, Serialize};

/// Configuration for the playfield layout.
///
/// Positions grow downward: a note spawns at `-line_offset` and travels
/// toward `judgment_line`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    /// Units travelled per second at speed multiplier 1.0.
    pub base_speed: f64,
    /// Position of the judgment line.
    pub judgment_line: f64,
    /// Distance above position zero where notes spawn.
    pub line_offset: f64,
    /// How far below the judgment line a note is still reported as visible.
    pub despawn_margin: f64,
}

impl PlayfieldConfig {
    pub fn new() -> Self {
        Self {
            base_speed: 600.0,
            judgment_line: 500.0,
            line_offset: 50.0,
            despawn_margin: 150.0,
        }
    }

    /// Derives a note's position from the elapsed play time.
    ///
    /// The result is a continuous value; callers must not round it before
    /// judging.
    pub fn position_of(
        &self,
        scheduled_ms: f64,
        elapsed_ms: f64,
        speed_multiplier: f64,
        difficulty_speed_factor: f64,
    ) -> f64 {
        (elapsed_ms - scheduled_ms) / 1000.0
            * self.base_speed
            * speed_multiplier
            * difficulty_speed_factor
            - self.line_offset
    }

    /// Elapsed time at which a note scheduled at `scheduled_ms` sits exactly
    /// on the judgment line.
    pub fn arrival_ms(
        &self,
        scheduled_ms: f64,
        speed_multiplier: f64,
        difficulty_speed_factor: f64,
    ) -> f64 {
        let velocity = self.base_speed * speed_multiplier * difficulty_speed_factor;
        scheduled_ms + (self.judgment_line + self.line_offset) / velocity * 1000.0
    }

    /// Signed distance from the judgment line (positive once past it).
    pub fn distance_to_line(&self, position: f64) -> f64 {
        position - self.judgment_line
    }

    /// True while a note is between its spawn point and the despawn margin.
    pub fn is_on_screen(&self, position: f64) -> bool {
        position >= -self.line_offset && position <= self.judgment_line + self.despawn_margin
    }
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self::new()
    }
}
