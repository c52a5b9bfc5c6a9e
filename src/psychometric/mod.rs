//! psychometric — psychometric functions, their ML fitting, and adaptive testing.
//!
//! Purpose
//! -------
//! Estimate a subject's threshold α and slope β from binary (or tied)
//! forced-choice responses, and choose each next stimulus so that trials
//! concentrate near the current threshold estimate.
//!
//! Key behaviors
//! -------------
//! - [`core`]: the immutable [`PsychometricModel`] (logistic, Weibull and
//!   Gumbel shapes with fixed guess rate γ and lapse rate λ), candidate
//!   levels, trial outcomes and per-level counts.
//! - [`fitting`]: maximum-likelihood estimation of (α, β) through the
//!   crate's `LogLikelihood`/Nelder–Mead stack.
//! - [`selection`]: the [`AdaptiveSelector`] trial-loop state machine
//!   (random warmup, repeat guard, Psi-method selection) and its shared
//!   handle.
//! - [`errors`]: [`PsychometricError`] with an [`ErrorKind`] classification.
//!
//! Invariants & assumptions
//! ------------------------
//! - Candidate levels are finite and strictly ascending; they never change
//!   during a session.
//! - `0 ≤ correct ≤ total` at every level; counts only grow.
//! - `0 ≤ γ < 1`, `0 ≤ λ < 1`, `γ + λ < 1`.
//!
//! Conventions
//! -----------
//! - The stack is synchronous and single-threaded; progress is reported
//!   through `tracing` events, never printed.
//! - Non-convergence of a fit is data, not an error; only invalid input,
//!   sequencing mistakes and an exhausted budget are errors.

pub mod core;
pub mod errors;
pub mod fitting;
pub mod selection;

pub use self::core::{
    PsychometricModel, PsychometricShape, StimulusLevels, TrialAccumulator, TrialOutcome,
};
pub use self::errors::{ErrorKind, PsychometricError, PsychometricResult};
pub use self::fitting::{FitResult, LikelihoodFitter};
pub use self::selection::{
    AdaptiveSelector, SelectorConfig, SelectorPhase, SessionSummary, SharedSelector, WarmupLength,
};

pub mod prelude {
    pub use super::core::{
        PsychometricModel, PsychometricShape, StimulusLevels, TrialAccumulator, TrialOutcome,
    };
    pub use super::errors::{ErrorKind, PsychometricError, PsychometricResult};
    pub use super::fitting::{FitResult, LikelihoodFitter};
    pub use super::selection::{
        AdaptiveSelector, SelectorConfig, SelectorPhase, SessionSummary, SharedSelector,
        WarmupLength,
    };
}
