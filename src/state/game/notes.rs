//! Per-frame note processing - update_positions, detect_misses, labels

use super::GameSession;
use crate::core::time::TimeSource;
use crate::models::stats::Judgement;
use crate::shared::snapshot::JudgementLabel;

impl<T: TimeSource> GameSession<T> {
    /// Recomputes the position of every unresolved note.
    ///
    /// Resolved notes keep the position they had when they were resolved.
    pub(crate) fn update_positions(&mut self, elapsed_ms: f64) {
        let playfield = self.config.playfield;
        let speed = self.speed_multiplier;
        let factor = self.difficulty_speed_factor();

        for entry in self.notes.iter_mut().skip(self.head_index) {
            if entry.note.resolved {
                continue;
            }
            entry.position = playfield.position_of(entry.note.scheduled_ms, elapsed_ms, speed, factor);
        }
    }

    /// Retires every unresolved note that has moved past the good window.
    ///
    /// Must run after `update_positions` within the same frame.
    pub(crate) fn detect_misses(&mut self) {
        let miss_line = self.config.playfield.judgment_line + self.config.hit_window.good;
        let mut missed = 0u32;

        for entry in self.notes.iter_mut().skip(self.head_index) {
            if entry.note.resolved {
                continue;
            }
            if entry.position <= miss_line {
                break;
            }
            entry.note.resolved = true;
            self.stats.record_miss();
            missed += 1;
        }

        if missed > 0 {
            log::debug!("SESSION: {} note(s) missed at {:.0}ms", missed, self.elapsed_ms);
            self.show_label(Judgement::Miss, self.elapsed_ms);
        }

        while self.head_index < self.notes.len() && self.notes[self.head_index].note.resolved {
            self.head_index += 1;
        }
    }

    pub(crate) fn show_label(&mut self, judgement: Judgement, elapsed_ms: f64) {
        self.last_label = Some(JudgementLabel::new(
            judgement,
            elapsed_ms,
            self.config.session.label_lifetime_ms,
        ));
    }

    pub(crate) fn expire_label(&mut self, elapsed_ms: f64) {
        if self
            .last_label
            .as_ref()
            .is_some_and(|label| label.is_expired(elapsed_ms))
        {
            self.last_label = None;
        }
    }
}
