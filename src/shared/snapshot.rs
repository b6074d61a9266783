//! Snapshots for the presentation layer.
//!
//! Snapshots are immutable captures of session state sent from the logic
//! thread to whatever draws the playfield. They carry positions as data and
//! never reference rendering resources.

use crate::models::engine::{Difficulty, NoteCategory, NoteId};
use crate::models::stats::{Judgement, Stats};
use crate::state::game::SessionState;

/// Transient judgement text shown for a short time after a hit or miss.
#[derive(Clone, Debug, PartialEq)]
pub struct JudgementLabel {
    pub text: &'static str,
    pub judgement: Judgement,
    /// Elapsed play time when the label appeared.
    pub shown_at_ms: f64,
    pub lifetime_ms: f64,
}

impl JudgementLabel {
    pub fn new(judgement: Judgement, shown_at_ms: f64, lifetime_ms: f64) -> Self {
        Self {
            text: judgement.label(),
            judgement,
            shown_at_ms,
            lifetime_ms,
        }
    }

    pub fn is_expired(&self, elapsed_ms: f64) -> bool {
        elapsed_ms - self.shown_at_ms >= self.lifetime_ms
    }

    pub fn remaining_ms(&self, elapsed_ms: f64) -> f64 {
        (self.shown_at_ms + self.lifetime_ms - elapsed_ms).max(0.0)
    }
}

/// A note the presentation layer should draw this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleNote {
    pub id: NoteId,
    pub lane: usize,
    pub position: f64,
    pub category: NoteCategory,
}

/// Everything the presentation layer needs for one frame.
#[derive(Clone, Debug)]
pub struct GameplaySnapshot {
    pub state: SessionState,
    pub elapsed_ms: f64,
    pub lane_count: usize,
    pub difficulty: Option<Difficulty>,
    pub judgment_line: f64,
    /// Unresolved on-screen notes, ordered by scheduled time.
    pub visible_notes: Vec<VisibleNote>,
    pub stats: Stats,
    pub accuracy: f64,
    pub remaining_notes: usize,
    pub keys_held: Vec<bool>,
    pub label: Option<JudgementLabel>,
    pub chart_cleared: bool,
}
