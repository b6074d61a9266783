//! Hit judgement for GameSession - judge
//!
//! Judgement reads the positions cached by the last frame and never
//! recomputes them.

use super::GameSession;
use crate::core::time::TimeSource;
use crate::models::stats::Judgement;

impl<T: TimeSource> GameSession<T> {
    /// Judges a press on `lane` against the nearest unresolved note.
    ///
    /// Returns `None` (and changes nothing) when no note in the lane is
    /// within the good window.
    pub fn judge(&mut self, lane: usize, elapsed_ms: f64) -> Option<Judgement> {
        let window = self.config.hit_window;
        let playfield = self.config.playfield;
        let line = playfield.judgment_line;
        let mut best: Option<(usize, f64)> = None;

        for (i, entry) in self.notes.iter().enumerate().skip(self.head_index) {
            if entry.note.resolved {
                continue;
            }
            // Unresolved positions fall with scheduled time, nothing later can qualify.
            if entry.position <= line - window.good {
                break;
            }
            if entry.note.lane != lane {
                continue;
            }

            let distance = playfield.distance_to_line(entry.position).abs();
            if !window.contains(distance) {
                continue;
            }
            // Strict comparison keeps the earliest note on ties.
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((i, distance));
            }
        }

        let (idx, distance) = best?;
        let judgement = window.judge(distance)?;

        let entry = &mut self.notes[idx];
        entry.note.resolved = true;
        let note_id = entry.note.id;

        let gained = self.stats.record_hit(judgement, &self.config.scoring);
        self.show_label(judgement, elapsed_ms);

        log::debug!(
            "SESSION: {:?} on lane {} (note {}, distance {:.1}, +{})",
            judgement,
            lane,
            note_id.0,
            distance,
            gained
        );
        Some(judgement)
    }
}
