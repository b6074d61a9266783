//! Definitions and constructors for hit window distance thresholds.

use crate::models::stats::Judgement;
use serde::{Deserialize, Serialize};

/// Distance thresholds around the judgment line, in playfield units.
///
/// Both bounds are exclusive: a note exactly `perfect` away is GOOD, and a
/// note exactly `good` away is not judgeable at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitWindow {
    pub perfect: f64,
    pub good: f64,
}

impl HitWindow {
    /// The wider window, used when nothing else is configured.
    pub fn standard() -> Self {
        Self {
            perfect: 50.0,
            good: 100.0,
        }
    }

    /// The tighter variant.
    pub fn tight() -> Self {
        Self {
            perfect: 40.0,
            good: 80.0,
        }
    }

    /// Utility constructor for fully custom values.
    pub fn from_custom(perfect: f64, good: f64) -> Self {
        Self { perfect, good }
    }

    /// Classifies an absolute distance from the judgment line.
    ///
    /// Returns `None` when the distance falls outside the good window.
    pub fn judge(&self, distance: f64) -> Option<Judgement> {
        let distance = distance.abs();
        if distance < self.perfect {
            Some(Judgement::Perfect)
        } else if distance < self.good {
            Some(Judgement::Good)
        } else {
            None
        }
    }

    pub fn contains(&self, distance: f64) -> bool {
        distance.abs() < self.good
    }
}

impl Default for HitWindow {
    fn default() -> Self {
        Self::standard()
    }
}
