//! TrialAccumulator — per-level response counts.
//!
//! Holds, for each candidate level, the number of trials presented (`total`)
//! and the credited correct responses (`correct`, which may hold half points
//! from ties). Counts are stored as `f64` so they feed the likelihood
//! directly.
//!
//! Invariants
//! ----------
//! - `0 ≤ correct[i] ≤ total[i]` for every level.
//! - Counts only grow; the accumulator is mutated solely through the
//!   selector's `record_outcome`.
use crate::psychometric::core::levels::StimulusLevels;

#[derive(Debug, Clone, PartialEq)]
pub struct TrialAccumulator {
    levels: StimulusLevels,
    correct: Vec<f64>,
    total: Vec<f64>,
}

impl TrialAccumulator {
    /// Zeroed counts for every candidate level.
    pub fn new(levels: StimulusLevels) -> Self {
        let n = levels.len();
        Self { levels, correct: vec![0.0; n], total: vec![0.0; n] }
    }

    pub fn levels(&self) -> &StimulusLevels {
        &self.levels
    }

    pub fn correct(&self) -> &[f64] {
        &self.correct
    }

    pub fn total(&self) -> &[f64] {
        &self.total
    }

    /// Total number of recorded trials across all levels.
    pub fn total_trials(&self) -> f64 {
        self.total.iter().sum()
    }

    pub fn has_observations(&self) -> bool {
        self.total.iter().any(|&t| t > 0.0)
    }

    /// Add one trial at `index` worth `credit ∈ [0, 1]` correct responses.
    pub(crate) fn record(&mut self, index: usize, credit: f64) {
        debug_assert!((0.0..=1.0).contains(&credit));
        self.total[index] += 1.0;
        self.correct[index] += credit;
    }
}
