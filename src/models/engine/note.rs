//! Note data produced by the chart generator and tracked by the session.

use serde::{Deserialize, Serialize};

/// Dense index of a note inside its chart.
///
/// Ids are assigned after the chart is sorted, so `chart[id.index()]`
/// always yields the note carrying that id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoteId(pub u32);

impl NoteId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Whether a note was emitted alone or as part of a multi-lane pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteCategory {
    /// Only note at its timestamp.
    Single,
    /// One lane of a simultaneous group.
    Chord,
}

/// A single note in a generated chart.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteData {
    pub id: NoteId,
    /// Which lane (0-indexed).
    pub lane: usize,
    /// Spawn time, in milliseconds from play start.
    pub scheduled_ms: f64,
    /// Set once by a hit or a miss, never cleared.
    pub resolved: bool,
    pub category: NoteCategory,
}

impl NoteData {
    /// Creates an unresolved note. The id is rewritten when the chart is sorted.
    pub fn new(lane: usize, scheduled_ms: f64, category: NoteCategory) -> Self {
        Self {
            id: NoteId(0),
            lane,
            scheduled_ms,
            resolved: false,
            category,
        }
    }

    /// Shorthand for a lone note, mostly used by tests and hand-built charts.
    pub fn single(lane: usize, scheduled_ms: f64) -> Self {
        Self::new(lane, scheduled_ms, NoteCategory::Single)
    }

    pub fn is_chord(&self) -> bool {
        self.category == NoteCategory::Chord
    }
}
