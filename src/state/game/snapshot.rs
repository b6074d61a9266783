//! Snapshot creation for GameSession - get_snapshot

use super::GameSession;
use crate::core::time::TimeSource;
use crate::shared::snapshot::{GameplaySnapshot, VisibleNote};

impl<T: TimeSource> GameSession<T> {
    /// Captures the state of the last frame for rendering.
    pub fn get_snapshot(&self) -> GameplaySnapshot {
        let playfield = self.config.playfield;

        // Positions fall with scheduled time, so stop at the first note above the spawn point.
        let visible_notes: Vec<VisibleNote> = self
            .notes
            .iter()
            .skip(self.head_index)
            .filter(|entry| !entry.note.resolved)
            .take_while(|entry| entry.position >= -playfield.line_offset)
            .filter(|entry| playfield.is_on_screen(entry.position))
            .map(|entry| VisibleNote {
                id: entry.note.id,
                lane: entry.note.lane,
                position: entry.position,
                category: entry.note.category,
            })
            .collect();

        let remaining_notes = self
            .notes
            .iter()
            .skip(self.head_index)
            .filter(|entry| !entry.note.resolved)
            .count();

        GameplaySnapshot {
            state: self.state,
            elapsed_ms: self.elapsed_ms,
            lane_count: self.lane_count,
            difficulty: self.difficulty,
            judgment_line: playfield.judgment_line,
            visible_notes,
            stats: self.stats.clone(),
            accuracy: self.stats.accuracy(),
            remaining_notes,
            keys_held: self.input.keys_held().to_vec(),
            label: self.last_label.clone(),
            chart_cleared: self.chart_cleared(),
        }
    }
}
