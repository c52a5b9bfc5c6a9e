//! AdaptiveSelector — the trial-loop state machine.
//!
//! Purpose
//! -------
//! Decide which candidate level to present on each trial and accumulate the
//! responses. The selector moves through three phases:
//!
//! - `Warmup` (`trials < min_trials`): one uniform draw over the candidate
//!   indices per trial, independent of the responses.
//! - `Adaptive`: the repeat guard first; otherwise fit (α, β) to all counts
//!   and present a level drawn uniformly from the window of
//!   `±neighborhood_radius` indices around the candidate nearest to α. A fit
//!   that did not converge (or no observations yet) falls back to a uniform
//!   draw.
//! - `Terminated` (`trials ≥ max_trials`): no further stimuli.
//!
//! Sequencing
//! ----------
//! Every [`AdaptiveSelector::next_stimulus`] must be followed by exactly one
//! [`AdaptiveSelector::record_outcome`] for the same level. Violations are
//! reported as `OutOfSequence` and leave the state untouched.
//!
//! Randomness
//! ----------
//! All draws come from the injected `R: Rng`; with a seeded `StdRng` the
//! whole session is reproducible.
use crate::psychometric::{
    core::{TrialAccumulator, TrialOutcome},
    errors::{PsychometricError, PsychometricResult},
    fitting::{FitResult, LikelihoodFitter},
    selection::config::SelectorConfig,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

/// Phase of the state machine, derived from the trial counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorPhase {
    Warmup,
    Adaptive,
    Terminated,
}

/// Why a level was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionReason {
    Warmup,
    RepeatGuard,
    NoObservations,
    FitNotConverged,
    NearThreshold,
}

/// One fit attempt made while selecting trial `trial` (0-based).
#[derive(Debug, Clone, PartialEq)]
pub struct FitRecord {
    pub trial: usize,
    pub fit: FitResult,
}

/// Result of a completed session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// Reported estimate: the final fit if it converged, else the last
    /// converged fit of the session.
    pub estimate: FitResult,
    /// `true` when `estimate` is the final fit over all counts.
    pub from_final_fit: bool,
    pub trials_presented: usize,
    /// Presented levels in order.
    pub history: Vec<f64>,
    pub accumulator: TrialAccumulator,
    pub fit_history: Vec<FitRecord>,
}

#[derive(Debug, Clone)]
pub struct AdaptiveSelector<R: Rng = StdRng> {
    config: SelectorConfig,
    fitter: LikelihoodFitter,
    accumulator: TrialAccumulator,
    history: Vec<usize>,
    pending: Option<usize>,
    current_estimate: Option<FitResult>,
    fit_history: Vec<FitRecord>,
    rng: R,
}

impl AdaptiveSelector<StdRng> {
    /// Selector driven by `StdRng::seed_from_u64(seed)`.
    ///
    /// # Errors
    /// - As for [`AdaptiveSelector::new`].
    pub fn seeded(config: SelectorConfig, seed: u64) -> PsychometricResult<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> AdaptiveSelector<R> {
    /// # Errors
    /// - Rate errors while building the fitter (unreachable for a config
    ///   built through its validated setters).
    pub fn new(config: SelectorConfig, rng: R) -> PsychometricResult<Self> {
        let fitter = LikelihoodFitter::new(config.gamma(), config.lambda(), config.shape())?
            .with_options(*config.options());
        let accumulator = TrialAccumulator::new(config.levels().clone());
        Ok(Self {
            config,
            fitter,
            accumulator,
            history: Vec::new(),
            pending: None,
            current_estimate: None,
            fit_history: Vec::new(),
            rng,
        })
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn phase(&self) -> SelectorPhase {
        let trials = self.trials_presented();
        if trials >= self.config.max_trials() {
            SelectorPhase::Terminated
        } else if trials < self.config.min_trials() {
            SelectorPhase::Warmup
        } else {
            SelectorPhase::Adaptive
        }
    }

    /// Number of stimuli handed out so far, including one awaiting its outcome.
    pub fn trials_presented(&self) -> usize {
        self.history.len()
    }

    /// Indices of the presented levels, oldest first.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Presented levels, oldest first.
    pub fn presented_levels(&self) -> Vec<f64> {
        let levels = self.config.levels().as_slice();
        self.history.iter().map(|&i| levels[i]).collect()
    }

    /// Level awaiting `record_outcome`, if any.
    pub fn pending_level(&self) -> Option<f64> {
        self.pending.and_then(|i| self.config.levels().get(i))
    }

    pub fn accumulator(&self) -> &TrialAccumulator {
        &self.accumulator
    }

    /// Most recent converged fit. Never runs a minimization.
    pub fn current_estimate(&self) -> Option<&FitResult> {
        self.current_estimate.as_ref()
    }

    /// Every fit attempted while selecting adaptive trials.
    pub fn fit_history(&self) -> &[FitRecord] {
        &self.fit_history
    }

    /// Choose the next level to present.
    ///
    /// # Errors
    /// - [`PsychometricError::OutOfSequence`] if the previous stimulus has no
    ///   recorded outcome yet.
    /// - [`PsychometricError::SessionEnded`] once `max_trials` stimuli have
    ///   been presented.
    pub fn next_stimulus(&mut self) -> PsychometricResult<f64> {
        if self.pending.is_some() {
            return Err(PsychometricError::OutOfSequence {
                reason: "the previous stimulus has no recorded outcome",
            });
        }
        let (index, reason) = match self.phase() {
            SelectorPhase::Terminated => {
                let max_trials = self.config.max_trials();
                return Err(PsychometricError::SessionEnded { max_trials });
            }
            SelectorPhase::Warmup => (self.uniform_index(), SelectionReason::Warmup),
            SelectorPhase::Adaptive => self.adaptive_index()?,
        };
        let trial = self.history.len();
        self.history.push(index);
        self.pending = Some(index);
        let levels = self.config.levels().as_slice();
        debug!(trial, index, level = levels[index], ?reason, "stimulus selected");
        Ok(levels[index])
    }

    /// Record the response to the pending stimulus.
    ///
    /// # Errors
    /// - [`PsychometricError::InvalidLevel`] if `level` is not a candidate.
    /// - [`PsychometricError::OutOfSequence`] if no stimulus is pending or
    ///   `level` is not the pending one.
    pub fn record_outcome(&mut self, level: f64, outcome: TrialOutcome) -> PsychometricResult<()> {
        let index = self
            .config
            .levels()
            .index_of(level)
            .ok_or(PsychometricError::InvalidLevel { level })?;
        match self.pending {
            None => {
                return Err(PsychometricError::OutOfSequence {
                    reason: "no stimulus is awaiting an outcome",
                });
            }
            Some(pending) if pending != index => {
                return Err(PsychometricError::OutOfSequence {
                    reason: "level differs from the presented stimulus",
                });
            }
            Some(_) => {}
        }
        self.accumulator.record(index, outcome.credit(self.config.tie_credit()));
        self.pending = None;
        Ok(())
    }

    /// End the session and report the threshold estimate.
    ///
    /// Runs one final fit over all counts. Its result is reported if it
    /// converged; otherwise the last converged estimate of the session is.
    ///
    /// # Errors
    /// - [`PsychometricError::OutOfSequence`] if a stimulus is pending.
    /// - [`PsychometricError::NoUsableEstimate`] if no fit ever converged.
    pub fn finish(self) -> PsychometricResult<SessionSummary> {
        if self.pending.is_some() {
            return Err(PsychometricError::OutOfSequence {
                reason: "cannot finish while a stimulus awaits its outcome",
            });
        }
        let final_fit = if self.accumulator.has_observations() {
            Some(self.fitter.fit_accumulator(&self.accumulator)?)
        } else {
            None
        };
        let (estimate, from_final_fit) = match final_fit {
            Some(fit) if fit.converged => (fit, true),
            _ => match self.current_estimate.clone() {
                Some(fit) => (fit, false),
                None => return Err(PsychometricError::NoUsableEstimate),
            },
        };
        debug!(alpha = estimate.alpha, beta = estimate.beta, from_final_fit, "session finished");
        let history = self.presented_levels();
        Ok(SessionSummary {
            estimate,
            from_final_fit,
            trials_presented: self.history.len(),
            history,
            accumulator: self.accumulator,
            fit_history: self.fit_history,
        })
    }

    fn uniform_index(&mut self) -> usize {
        self.rng.gen_range(0..self.config.levels().len())
    }

    // Uniform over every level except `excluded`; the only level if there is one.
    fn other_index(&mut self, excluded: usize) -> usize {
        let n = self.config.levels().len();
        if n == 1 {
            return 0;
        }
        let j = self.rng.gen_range(0..n - 1);
        if j >= excluded { j + 1 } else { j }
    }

    fn repeated_index(&self) -> Option<usize> {
        let k = self.config.max_consecutive_repeats();
        if self.history.len() < k {
            return None;
        }
        let tail = &self.history[self.history.len() - k..];
        let last = tail[k - 1];
        tail.iter().all(|&i| i == last).then_some(last)
    }

    fn adaptive_index(&mut self) -> PsychometricResult<(usize, SelectionReason)> {
        if let Some(repeated) = self.repeated_index() {
            return Ok((self.other_index(repeated), SelectionReason::RepeatGuard));
        }
        if !self.accumulator.has_observations() {
            return Ok((self.uniform_index(), SelectionReason::NoObservations));
        }
        let fit = self.fitter.fit_accumulator(&self.accumulator)?;
        self.fit_history.push(FitRecord { trial: self.history.len(), fit: fit.clone() });
        if !fit.converged {
            return Ok((self.uniform_index(), SelectionReason::FitNotConverged));
        }
        let levels = self.config.levels();
        let nearest = levels.nearest_index(fit.alpha);
        let radius = self.config.neighborhood_radius();
        let lo = nearest.saturating_sub(radius);
        let hi = nearest.saturating_add(radius).min(levels.len() - 1);
        self.current_estimate = Some(fit);
        Ok((self.rng.gen_range(lo..=hi), SelectionReason::NearThreshold))
    }
}
