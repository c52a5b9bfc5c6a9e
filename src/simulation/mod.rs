//! simulation — presenters and a host trial loop for running sessions offline.
//!
//! Purpose
//! -------
//! Drive an [`AdaptiveSelector`] to the end of its budget against a
//! [`Presenter`], the seam where a real experiment would show a stimulus
//! and collect a response. [`VirtualObserver`] is a synthetic subject that
//! answers according to a known [`PsychometricModel`], which makes it
//! possible to check that a configuration recovers a known threshold.
//!
//! Key behaviors
//! -------------
//! - [`run_session`] alternates `next_stimulus` / `present` /
//!   `record_outcome` until the selector terminates, then finishes the
//!   session and returns its [`SessionSummary`] with the per-trial trace.
//! - [`VirtualObserver`] answers correctly with probability `p(x)` and can
//!   report a tie at the null stimulus `x = 0`, as in a line-length
//!   comparison where both lines are equal.
//! - Any closure `FnMut(f64) -> PsychometricResult<TrialOutcome>` is a
//!   presenter.
use crate::psychometric::{
    core::{PsychometricModel, TrialOutcome},
    errors::PsychometricResult,
    selection::{AdaptiveSelector, SelectorPhase, SessionSummary},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

/// Shows a stimulus and reports the scored response.
pub trait Presenter {
    fn present(&mut self, level: f64) -> PsychometricResult<TrialOutcome>;
}

impl<F> Presenter for F
where
    F: FnMut(f64) -> PsychometricResult<TrialOutcome>,
{
    fn present(&mut self, level: f64) -> PsychometricResult<TrialOutcome> {
        self(level)
    }
}

/// Synthetic subject with a known psychometric function.
#[derive(Debug, Clone)]
pub struct VirtualObserver<R: Rng = StdRng> {
    model: PsychometricModel,
    ties_at_null: bool,
    rng: R,
}

impl VirtualObserver<StdRng> {
    pub fn seeded(model: PsychometricModel, seed: u64) -> Self {
        Self::new(model, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> VirtualObserver<R> {
    pub fn new(model: PsychometricModel, rng: R) -> Self {
        Self { model, ties_at_null: false, rng }
    }

    /// Report [`TrialOutcome::Tie`] whenever the stimulus is exactly 0.
    pub fn with_ties_at_null(mut self, ties_at_null: bool) -> Self {
        self.ties_at_null = ties_at_null;
        self
    }

    pub fn model(&self) -> &PsychometricModel {
        &self.model
    }
}

impl<R: Rng> Presenter for VirtualObserver<R> {
    /// # Errors
    /// - Domain errors from [`PsychometricModel::probability_correct`].
    fn present(&mut self, level: f64) -> PsychometricResult<TrialOutcome> {
        if self.ties_at_null && level == 0.0 {
            return Ok(TrialOutcome::Tie);
        }
        let p = self.model.probability_correct(level)?;
        Ok(TrialOutcome::from(self.rng.gen::<f64>() < p))
    }
}

/// One presented trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialRecord {
    pub trial: usize,
    pub phase: SelectorPhase,
    pub level: f64,
    pub outcome: TrialOutcome,
}

/// Finished session plus its trial-by-trial trace.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub summary: SessionSummary,
    pub trials: Vec<TrialRecord>,
}

/// Run `selector` to the end of its budget against `presenter`.
///
/// # Errors
/// - Any presenter error (the session is abandoned).
/// - Errors from [`AdaptiveSelector::finish`], notably
///   [`NoUsableEstimate`](crate::psychometric::errors::PsychometricError::NoUsableEstimate).
pub fn run_session<R, P>(
    mut selector: AdaptiveSelector<R>, presenter: &mut P,
) -> PsychometricResult<SessionReport>
where
    R: Rng,
    P: Presenter + ?Sized,
{
    let mut trials = Vec::with_capacity(selector.config().max_trials());
    loop {
        let phase = selector.phase();
        if phase == SelectorPhase::Terminated {
            break;
        }
        let level = selector.next_stimulus()?;
        let outcome = presenter.present(level)?;
        selector.record_outcome(level, outcome)?;
        trials.push(TrialRecord { trial: trials.len(), phase, level, outcome });
        if let Some(est) = selector.current_estimate() {
            debug!(trial = trials.len(), alpha = est.alpha, beta = est.beta, "running estimate");
        }
    }
    let summary = selector.finish()?;
    info!(
        trials = summary.trials_presented,
        alpha = summary.estimate.alpha,
        beta = summary.estimate.beta,
        "session complete"
    );
    Ok(SessionReport { summary, trials })
}
