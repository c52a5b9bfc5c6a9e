//! Errors for the psychometric stack (model configuration, stimulus domain,
//! trial sequencing, and estimation failures).
//!
//! This module defines one error type, [`PsychometricError`], used by the
//! model, the fitter, and the adaptive selector, together with a coarse
//! classification [`ErrorKind`] that hosts can match on without caring about
//! the exact variant.
//!
//! ## Conventions
//! - **Indices are 0-based** and refer to positions in the candidate set.
//! - Every operation that returns an error leaves the caller-visible state
//!   exactly as it was before the call.
//! - Optimizer failures arrive as [`OptError`] and are wrapped in
//!   [`PsychometricError::Optimizer`]; bad minimizer settings are reported
//!   as configuration errors.
use crate::optimization::errors::OptError;

/// Result alias for psychometric operations.
pub type PsychometricResult<T> = Result<T, PsychometricError>;

/// Coarse error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid construction-time settings or input arrays.
    Configuration,
    /// A stimulus or probability outside the function's domain.
    Domain,
    /// A level that is not one of the candidate levels.
    InvalidLevel,
    /// Operations called in the wrong order.
    OutOfSequence,
    /// The trial budget is exhausted.
    SessionEnded,
    /// Not enough data, or no usable estimate.
    Estimation,
}

/// Unified error type for psychometric modelling and adaptive testing.
#[derive(Debug, Clone, PartialEq)]
pub enum PsychometricError {
    // ---- Candidate levels ----
    /// The candidate set is empty.
    EmptyLevels,
    /// A candidate level is NaN/±inf.
    NonFiniteLevel { index: usize, value: f64 },
    /// Candidate levels must be strictly ascending.
    LevelsNotAscending { index: usize, previous: f64, value: f64 },

    // ---- Model configuration ----
    /// Gamma must lie in [0, 1).
    InvalidGuessRate { value: f64 },
    /// Lambda must lie in [0, 1).
    InvalidLapseRate { value: f64 },
    /// Gamma + Lambda must be < 1.
    RatesCollapse { gamma: f64, lambda: f64 },
    /// Shape name not recognised.
    UnknownShape { name: String },
    /// Alpha or Beta is not usable.
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    // ---- Selector configuration ----
    /// Trial budget must be positive.
    InvalidMaxTrials { value: usize },
    /// Warmup length must not exceed the trial budget.
    InvalidMinTrials { value: usize, max_trials: usize },
    /// Warmup fraction must lie in [0, 1].
    InvalidWarmupFraction { value: f64 },
    /// The repeat limit must be at least 1.
    InvalidMaxRepeats { value: usize },
    /// Tie credit must lie in [0, 1].
    InvalidTieCredit { value: f64 },

    // ---- Count arrays ----
    /// Levels, correct and total arrays must have equal length.
    CountLengthMismatch { levels: usize, correct: usize, total: usize },
    /// Counts must be finite, non-negative, with correct ≤ total.
    InvalidCounts { index: usize, correct: f64, total: f64, reason: &'static str },

    // ---- Domain ----
    /// The stimulus lies outside the shape's domain (e.g. Weibull with x ≤ 0).
    OutsideShapeDomain { x: f64, reason: &'static str },
    /// Requested probability is outside (Gamma, 1 − Lambda).
    ProbabilityOutOfRange { p: f64, floor: f64, ceiling: f64 },
    /// No stimulus attains the requested probability.
    NoInverse { p: f64 },
    /// Stimulus is NaN/±inf.
    NonFiniteStimulus { value: f64 },

    // ---- Sequencing ----
    /// Level is not a member of the candidate set.
    InvalidLevel { level: f64 },
    /// Operation called in the wrong order.
    OutOfSequence { reason: &'static str },
    /// The trial budget has been used up.
    SessionEnded { max_trials: usize },

    // ---- Estimation ----
    /// Every level has zero trials.
    NoObservations,
    /// No fit converged during the whole session.
    NoUsableEstimate,
    /// Optimizer failure outside of a fit's graceful downgrade.
    Optimizer(OptError),
}

impl PsychometricError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        use PsychometricError::*;
        match self {
            EmptyLevels
            | NonFiniteLevel { .. }
            | LevelsNotAscending { .. }
            | InvalidGuessRate { .. }
            | InvalidLapseRate { .. }
            | RatesCollapse { .. }
            | UnknownShape { .. }
            | InvalidParameter { .. }
            | InvalidMaxTrials { .. }
            | InvalidMinTrials { .. }
            | InvalidWarmupFraction { .. }
            | InvalidMaxRepeats { .. }
            | InvalidTieCredit { .. }
            | CountLengthMismatch { .. }
            | InvalidCounts { .. } => ErrorKind::Configuration,
            OutsideShapeDomain { .. }
            | ProbabilityOutOfRange { .. }
            | NoInverse { .. }
            | NonFiniteStimulus { .. } => ErrorKind::Domain,
            InvalidLevel { .. } => ErrorKind::InvalidLevel,
            OutOfSequence { .. } => ErrorKind::OutOfSequence,
            SessionEnded { .. } => ErrorKind::SessionEnded,
            NoObservations | NoUsableEstimate => ErrorKind::Estimation,
            Optimizer(err) => match err {
                OptError::InvalidTolCost { .. }
                | OptError::InvalidTolParam { .. }
                | OptError::InvalidMaxIter { .. }
                | OptError::InvalidSimplexStep { .. } => ErrorKind::Configuration,
                _ => ErrorKind::Estimation,
            },
        }
    }
}

impl std::error::Error for PsychometricError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PsychometricError::Optimizer(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for PsychometricError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Candidate levels ----
            PsychometricError::EmptyLevels => write!(f, "Candidate level set is empty"),
            PsychometricError::NonFiniteLevel { index, value } => {
                write!(f, "Non-finite candidate level at index {index}: {value}")
            }
            PsychometricError::LevelsNotAscending { index, previous, value } => write!(
                f,
                "Candidate levels must be strictly ascending: index {index} has {value} \
                 after {previous}"
            ),

            // ---- Model configuration ----
            PsychometricError::InvalidGuessRate { value } => {
                write!(f, "Invalid guess rate (gamma) {value}: must lie in [0, 1)")
            }
            PsychometricError::InvalidLapseRate { value } => {
                write!(f, "Invalid lapse rate (lambda) {value}: must lie in [0, 1)")
            }
            PsychometricError::RatesCollapse { gamma, lambda } => {
                write!(f, "Guess rate {gamma} plus lapse rate {lambda} must be < 1")
            }
            PsychometricError::UnknownShape { name } => {
                write!(
                    f,
                    "Unknown psychometric shape '{name}' (expected logistic, weibull or gumbel)"
                )
            }
            PsychometricError::InvalidParameter { name, value, reason } => {
                write!(f, "Invalid {name} {value}: {reason}")
            }

            // ---- Selector configuration ----
            PsychometricError::InvalidMaxTrials { value } => {
                write!(f, "Invalid maximum trials {value}: must be > 0")
            }
            PsychometricError::InvalidMinTrials { value, max_trials } => {
                write!(f, "Invalid warmup length {value}: must not exceed max trials {max_trials}")
            }
            PsychometricError::InvalidWarmupFraction { value } => {
                write!(f, "Invalid warmup fraction {value}: must lie in [0, 1]")
            }
            PsychometricError::InvalidMaxRepeats { value } => {
                write!(f, "Invalid consecutive repeat limit {value}: must be >= 1")
            }
            PsychometricError::InvalidTieCredit { value } => {
                write!(f, "Invalid tie credit {value}: must lie in [0, 1]")
            }

            // ---- Count arrays ----
            PsychometricError::CountLengthMismatch { levels, correct, total } => write!(
                f,
                "Count length mismatch: {levels} levels, {correct} correct counts, {total} totals"
            ),
            PsychometricError::InvalidCounts { index, correct, total, reason } => {
                write!(
                    f,
                    "Invalid counts at index {index} (correct {correct}, total {total}): {reason}"
                )
            }

            // ---- Domain ----
            PsychometricError::OutsideShapeDomain { x, reason } => {
                write!(f, "Stimulus {x} outside the function's domain: {reason}")
            }
            PsychometricError::ProbabilityOutOfRange { p, floor, ceiling } => {
                write!(f, "Probability {p} must lie strictly inside ({floor}, {ceiling})")
            }
            PsychometricError::NoInverse { p } => {
                write!(f, "No stimulus attains probability {p}")
            }
            PsychometricError::NonFiniteStimulus { value } => {
                write!(f, "Non-finite stimulus: {value}")
            }

            // ---- Sequencing ----
            PsychometricError::InvalidLevel { level } => {
                write!(f, "Level {level} is not a candidate level")
            }
            PsychometricError::OutOfSequence { reason } => {
                write!(f, "Out of sequence: {reason}")
            }
            PsychometricError::SessionEnded { max_trials } => {
                write!(f, "Session ended: all {max_trials} trials have been presented")
            }

            // ---- Estimation ----
            PsychometricError::NoObservations => {
                write!(f, "No observations recorded at any level")
            }
            PsychometricError::NoUsableEstimate => {
                write!(f, "No fit converged during the session")
            }
            PsychometricError::Optimizer(err) => write!(f, "Optimizer error: {err}"),
        }
    }
}

impl From<OptError> for PsychometricError {
    fn from(err: OptError) -> Self {
        PsychometricError::Optimizer(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify the coarse classification hosts rely on.
    //
    // Given
    // -----
    // - One representative variant per kind, plus optimizer settings errors.
    //
    // Expect
    // ------
    // - Each maps to the documented `ErrorKind`.
    fn kind_classifies_representative_variants() {
        let collapse = PsychometricError::RatesCollapse { gamma: 0.6, lambda: 0.5 };
        assert_eq!(collapse.kind(), ErrorKind::Configuration);
        assert_eq!(PsychometricError::NoInverse { p: 0.9 }.kind(), ErrorKind::Domain);
        assert_eq!(PsychometricError::InvalidLevel { level: 3.5 }.kind(), ErrorKind::InvalidLevel);
        let sequencing = PsychometricError::OutOfSequence { reason: "x" };
        assert_eq!(sequencing.kind(), ErrorKind::OutOfSequence);
        let ended = PsychometricError::SessionEnded { max_trials: 3 };
        assert_eq!(ended.kind(), ErrorKind::SessionEnded);
        assert_eq!(PsychometricError::NoUsableEstimate.kind(), ErrorKind::Estimation);
        let bad_iter = OptError::InvalidMaxIter { max_iter: 0, reason: "zero" };
        assert_eq!(PsychometricError::from(bad_iter).kind(), ErrorKind::Configuration);
        assert_eq!(PsychometricError::from(OptError::MissingRoot).kind(), ErrorKind::Estimation);
    }

    #[test]
    // Purpose
    // -------
    // Ensure wrapped optimizer errors expose their source.
    //
    // Given
    // -----
    // - `PsychometricError::Optimizer(OptError::MissingThetaHat)`.
    //
    // Expect
    // ------
    // - `source()` is present and the message mentions the inner error.
    fn optimizer_variant_exposes_source() {
        use std::error::Error;
        let err = PsychometricError::from(OptError::MissingThetaHat);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("theta hat"));
    }
}
