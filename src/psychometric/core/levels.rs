//! Candidate stimulus levels.
//!
//! A validated, strictly ascending, non-empty set of finite stimulus values.
//! The set is fixed for the life of a session; everything else (counts,
//! presentation history) refers to levels by index into it.
use crate::psychometric::errors::{PsychometricError, PsychometricResult};

#[derive(Debug, Clone, PartialEq)]
pub struct StimulusLevels {
    values: Vec<f64>,
}

impl StimulusLevels {
    /// Validate and wrap a candidate set.
    ///
    /// # Errors
    /// - [`PsychometricError::EmptyLevels`] for an empty set.
    /// - [`PsychometricError::NonFiniteLevel`] for NaN/±inf entries.
    /// - [`PsychometricError::LevelsNotAscending`] unless strictly ascending.
    pub fn new(values: Vec<f64>) -> PsychometricResult<Self> {
        validate_levels(&values)?;
        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` for a constructed set; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Index of `level` if it is exactly one of the candidates.
    pub fn index_of(&self, level: f64) -> Option<usize> {
        self.values.binary_search_by(|v| v.total_cmp(&level)).ok()
    }

    /// Index of the candidate closest to `x`; ties go to the lower index.
    pub fn nearest_index(&self, x: f64) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, v) in self.values.iter().enumerate() {
            let dist = (v - x).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }
}

/// Check that `values` is non-empty, finite and strictly ascending.
pub fn validate_levels(values: &[f64]) -> PsychometricResult<()> {
    if values.is_empty() {
        return Err(PsychometricError::EmptyLevels);
    }
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(PsychometricError::NonFiniteLevel { index, value });
        }
        if index > 0 && value <= values[index - 1] {
            return Err(PsychometricError::LevelsNotAscending {
                index,
                previous: values[index - 1],
                value,
            });
        }
    }
    Ok(())
}
