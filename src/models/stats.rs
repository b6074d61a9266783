//! Hit statistics, judgement types and score policy.
//!
//! This module defines the judgement categories produced by the session,
//! the running totals they feed, and the configurable combo bonus used to
//! weight each hit.

use serde::{Deserialize, Serialize};

/// Hit judgement types from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Judgement {
    /// Within the perfect window.
    Perfect,
    /// Within the good window.
    Good,
    /// Note passed the good window unhit.
    Miss,
}

impl Judgement {
    /// Text shown by the judgement label.
    pub fn label(self) -> &'static str {
        match self {
            Judgement::Perfect => "PERFECT",
            Judgement::Good => "GOOD",
            Judgement::Miss => "MISS",
        }
    }
}

/// How the combo held before a hit scales that hit's base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComboBonus {
    /// Multiplier grows by one every `step` consecutive hits.
    Tiered { step: u32 },
    /// Multiplier is the prior combo plus one.
    Linear,
}

impl ComboBonus {
    /// Multiplier applied for a hit landed while holding `prior_combo`.
    pub fn multiplier(self, prior_combo: u32) -> u64 {
        match self {
            ComboBonus::Tiered { step } => {
                let step = step.max(1);
                (prior_combo / step) as u64 + 1
            }
            ComboBonus::Linear => prior_combo as u64 + 1,
        }
    }
}

impl Default for ComboBonus {
    fn default() -> Self {
        ComboBonus::Tiered { step: 10 }
    }
}

/// Base values per judgement and the combo policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub perfect_value: u64,
    pub good_value: u64,
    pub combo_bonus: ComboBonus,
}

impl ScoringConfig {
    pub fn base_value(&self, judgement: Judgement) -> u64 {
        match judgement {
            Judgement::Perfect => self.perfect_value,
            Judgement::Good => self.good_value,
            Judgement::Miss => 0,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            perfect_value: 1000,
            good_value: 500,
            combo_bonus: ComboBonus::default(),
        }
    }
}

/// Accumulated statistics for a play session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub perfect: u32,
    pub good: u32,
    pub miss: u32,
}

impl Stats {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a PERFECT or GOOD hit and returns the points it earned.
    pub fn record_hit(&mut self, judgement: Judgement, scoring: &ScoringConfig) -> u64 {
        match judgement {
            Judgement::Perfect => self.perfect += 1,
            Judgement::Good => self.good += 1,
            Judgement::Miss => {
                self.record_miss();
                return 0;
            }
        }

        let gained = scoring
            .base_value(judgement)
            .saturating_mul(scoring.combo_bonus.multiplier(self.combo));
        self.score = self.score.saturating_add(gained);
        self.combo = self.combo.saturating_add(1);
        self.max_combo = self.max_combo.max(self.combo);
        gained
    }

    /// Records a missed note, breaking the combo.
    pub fn record_miss(&mut self) {
        self.max_combo = self.max_combo.max(self.combo);
        self.combo = 0;
        self.miss += 1;
    }

    /// Total number of judged notes.
    pub fn judged(&self) -> u32 {
        self.perfect + self.good + self.miss
    }

    /// Accuracy percentage (perfect 100%, good 50%, miss 0%).
    pub fn accuracy(&self) -> f64 {
        let total = self.judged();
        if total == 0 {
            return 100.0;
        }
        let weighted = self.perfect as f64 + self.good as f64 * 0.5;
        weighted / total as f64 * 100.0
    }
}
