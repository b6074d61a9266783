//! Random chart generation.
//!
//! A chart is built by walking a time cursor from [`LEAD_IN_MS`] to the
//! horizon and dropping one lane pattern at every step. Which patterns are
//! eligible depends on the difficulty's complexity and on the lane count.

use super::difficulty::DifficultyProfile;
use super::note::{NoteCategory, NoteData, NoteId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// First timestamp, leaving room for notes to scroll in before the line.
pub const LEAD_IN_MS: f64 = 1000.0;
/// Complexity from which adjacent and skip pairs become eligible.
pub const PAIR_COMPLEXITY: f64 = 0.2;
/// Complexity from which triples and quads become eligible.
pub const CHORD_COMPLEXITY: f64 = 0.8;

/// Lanes struck together at one timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub lanes: Vec<usize>,
}

impl Pattern {
    fn of(lanes: &[usize]) -> Self {
        Self {
            lanes: lanes.to_vec(),
        }
    }

    pub fn is_single(&self) -> bool {
        self.lanes.len() == 1
    }
}

/// Lists every pattern a chart may use for the given lane count and profile.
pub fn eligible_patterns(lane_count: usize, profile: &DifficultyProfile) -> Vec<Pattern> {
    let mut patterns: Vec<Pattern> = (0..lane_count).map(|lane| Pattern::of(&[lane])).collect();

    if profile.complexity >= PAIR_COMPLEXITY {
        for lane in 0..lane_count.saturating_sub(1) {
            patterns.push(Pattern::of(&[lane, lane + 1]));
        }
        for lane in 0..lane_count.saturating_sub(2) {
            patterns.push(Pattern::of(&[lane, lane + 2]));
        }
    }

    if profile.complexity >= CHORD_COMPLEXITY {
        if lane_count >= 4 {
            for lane in 0..lane_count - 2 {
                patterns.push(Pattern::of(&[lane, lane + 1, lane + 2]));
            }
        }
        if lane_count >= 6 {
            patterns.push(Pattern::of(&[0, 1, lane_count - 2, lane_count - 1]));
        }
    }

    patterns
}

/// Generates a chart from the thread-local RNG.
pub fn generate(lane_count: usize, profile: &DifficultyProfile, horizon_ms: f64) -> Vec<NoteData> {
    generate_with(lane_count, profile, horizon_ms, &mut rand::rng())
}

/// Generates a chart that is identical for identical inputs.
pub fn generate_seeded(
    lane_count: usize,
    profile: &DifficultyProfile,
    horizon_ms: f64,
    seed: u64,
) -> Vec<NoteData> {
    generate_with(lane_count, profile, horizon_ms, &mut StdRng::seed_from_u64(seed))
}

/// Generates a chart sorted by scheduled time, with ids matching indices.
pub fn generate_with<R: Rng + ?Sized>(
    lane_count: usize,
    profile: &DifficultyProfile,
    horizon_ms: f64,
    rng: &mut R,
) -> Vec<NoteData> {
    if !horizon_ms.is_finite() {
        log::warn!("CHART: Refusing to generate up to a non-finite horizon {horizon_ms}");
        return Vec::new();
    }
    let patterns = eligible_patterns(lane_count, profile);
    if patterns.is_empty() {
        return Vec::new();
    }

    let singles: Vec<usize> = patterns
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_single())
        .map(|(i, _)| i)
        .collect();

    let min_gap = profile.min_gap_ms.max(1.0);
    let max_gap = profile.max_gap_ms.max(min_gap);

    let mut notes = Vec::new();
    let mut cursor = LEAD_IN_MS;

    while cursor < horizon_ms {
        let use_singles = match profile.single_bias {
            Some(bias) => rng.random_bool(bias.clamp(0.0, 1.0)),
            None => false,
        };

        let pattern = if use_singles {
            &patterns[singles[rng.random_range(0..singles.len())]]
        } else {
            &patterns[rng.random_range(0..patterns.len())]
        };

        let category = if pattern.is_single() {
            NoteCategory::Single
        } else {
            NoteCategory::Chord
        };
        for &lane in &pattern.lanes {
            notes.push(NoteData::new(lane, cursor, category));
        }

        cursor += rng.random_range(min_gap..=max_gap);
    }

    finalize(notes)
}

/// Sorts notes by scheduled time and assigns dense ids.
///
/// Notes sharing a timestamp keep no particular order.
pub fn finalize(mut notes: Vec<NoteData>) -> Vec<NoteData> {
    notes.sort_by(|a, b| a.scheduled_ms.total_cmp(&b.scheduled_ms));
    for (i, note) in notes.iter_mut().enumerate() {
        note.id = NoteId(i as u32);
    }
    log::debug!("CHART: Finalized {} notes", notes.len());
    notes
}
