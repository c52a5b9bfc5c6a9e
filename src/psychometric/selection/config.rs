//! Selector configuration — the constructor-time surface of an adaptive test.
//!
//! Purpose
//! -------
//! Collect every knob of an adaptive session in one validated, immutable
//! value: the candidate levels, trial budget, warmup length, repeat guard,
//! the fixed guess/lapse rates and shape of the fitted function, tie credit,
//! the selection neighbourhood, and the optimizer options.
//!
//! Key behaviors
//! -------------
//! - [`SelectorConfig::new`] validates the candidate set and budget and fills
//!   in documented defaults; `with_*` setters adjust single fields and
//!   re-validate what they touch.
//! - The warmup may be given as a count or a fraction of the budget via
//!   [`WarmupLength`]; fractions resolve to `ceil(f · max_trials)`.
//!
//! Defaults
//! --------
//! - warmup: `Fraction(0.1)`
//! - `max_consecutive_repeats`: 2
//! - γ = 0.5 (two-alternative forced choice), λ = 0.01, `Logistic`
//! - `tie_credit`: 0.5
//! - `neighborhood_radius`: 2 (0 presents exactly the nearest level)
//! - optimizer: `MLEOptions::default()`
//!
//! Invariants
//! ----------
//! - `max_trials > 0`, `0 ≤ min_trials ≤ max_trials`,
//!   `max_consecutive_repeats ≥ 1`, `tie_credit ∈ [0, 1]`, and the rates pass
//!   [`validate_rates`].
use crate::{
    optimization::loglik_optimizer::MLEOptions,
    psychometric::{
        core::{PsychometricShape, StimulusLevels, validate_rates},
        errors::{PsychometricError, PsychometricResult},
    },
};

pub const DEFAULT_WARMUP_FRACTION: f64 = 0.1;
pub const DEFAULT_MAX_CONSECUTIVE_REPEATS: usize = 2;
pub const DEFAULT_GAMMA: f64 = 0.5;
pub const DEFAULT_LAMBDA: f64 = 0.01;
pub const DEFAULT_TIE_CREDIT: f64 = 0.5;
pub const DEFAULT_NEIGHBORHOOD_RADIUS: usize = 2;

/// Length of the random warmup phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WarmupLength {
    /// Absolute number of warmup trials.
    Trials(usize),
    /// Fraction of `max_trials`, rounded up.
    Fraction(f64),
}

impl WarmupLength {
    /// Number of warmup trials for a budget of `max_trials`.
    ///
    /// # Errors
    /// - [`PsychometricError::InvalidMinTrials`] if a count exceeds the budget.
    /// - [`PsychometricError::InvalidWarmupFraction`] unless `f ∈ [0, 1]`.
    pub fn resolve(self, max_trials: usize) -> PsychometricResult<usize> {
        match self {
            WarmupLength::Trials(n) if n <= max_trials => Ok(n),
            WarmupLength::Trials(n) => {
                Err(PsychometricError::InvalidMinTrials { value: n, max_trials })
            }
            WarmupLength::Fraction(f) if f.is_finite() && (0.0..=1.0).contains(&f) => {
                Ok(((f * max_trials as f64).ceil() as usize).min(max_trials))
            }
            WarmupLength::Fraction(f) => Err(PsychometricError::InvalidWarmupFraction { value: f }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    levels: StimulusLevels,
    max_trials: usize,
    warmup: WarmupLength,
    min_trials: usize,
    max_consecutive_repeats: usize,
    gamma: f64,
    lambda: f64,
    shape: PsychometricShape,
    tie_credit: f64,
    neighborhood_radius: usize,
    options: MLEOptions,
}

impl SelectorConfig {
    /// Configuration with documented defaults.
    ///
    /// # Errors
    /// - Level errors from [`StimulusLevels::new`].
    /// - [`PsychometricError::InvalidMaxTrials`] if `max_trials == 0`.
    pub fn new(levels: Vec<f64>, max_trials: usize) -> PsychometricResult<Self> {
        let levels = StimulusLevels::new(levels)?;
        if max_trials == 0 {
            return Err(PsychometricError::InvalidMaxTrials { value: max_trials });
        }
        let warmup = WarmupLength::Fraction(DEFAULT_WARMUP_FRACTION);
        Ok(Self {
            levels,
            max_trials,
            warmup,
            min_trials: warmup.resolve(max_trials)?,
            max_consecutive_repeats: DEFAULT_MAX_CONSECUTIVE_REPEATS,
            gamma: DEFAULT_GAMMA,
            lambda: DEFAULT_LAMBDA,
            shape: PsychometricShape::default(),
            tie_credit: DEFAULT_TIE_CREDIT,
            neighborhood_radius: DEFAULT_NEIGHBORHOOD_RADIUS,
            options: MLEOptions::default(),
        })
    }

    /// # Errors
    /// - As for [`WarmupLength::resolve`].
    pub fn with_warmup(mut self, warmup: WarmupLength) -> PsychometricResult<Self> {
        self.min_trials = warmup.resolve(self.max_trials)?;
        self.warmup = warmup;
        Ok(self)
    }

    /// # Errors
    /// - [`PsychometricError::InvalidMaxRepeats`] if `k == 0`.
    pub fn with_max_consecutive_repeats(mut self, k: usize) -> PsychometricResult<Self> {
        if k == 0 {
            return Err(PsychometricError::InvalidMaxRepeats { value: k });
        }
        self.max_consecutive_repeats = k;
        Ok(self)
    }

    /// # Errors
    /// - Rate errors from [`validate_rates`].
    pub fn with_rates(mut self, gamma: f64, lambda: f64) -> PsychometricResult<Self> {
        validate_rates(gamma, lambda)?;
        self.gamma = gamma;
        self.lambda = lambda;
        Ok(self)
    }

    pub fn with_shape(mut self, shape: PsychometricShape) -> Self {
        self.shape = shape;
        self
    }

    /// # Errors
    /// - [`PsychometricError::InvalidTieCredit`] unless `credit ∈ [0, 1]`.
    pub fn with_tie_credit(mut self, credit: f64) -> PsychometricResult<Self> {
        if !credit.is_finite() || !(0.0..=1.0).contains(&credit) {
            return Err(PsychometricError::InvalidTieCredit { value: credit });
        }
        self.tie_credit = credit;
        Ok(self)
    }

    pub fn with_neighborhood_radius(mut self, radius: usize) -> Self {
        self.neighborhood_radius = radius;
        self
    }

    pub fn with_options(mut self, options: MLEOptions) -> Self {
        self.options = options;
        self
    }

    pub fn levels(&self) -> &StimulusLevels {
        &self.levels
    }

    pub fn max_trials(&self) -> usize {
        self.max_trials
    }

    pub fn warmup(&self) -> WarmupLength {
        self.warmup
    }

    /// Resolved warmup length.
    pub fn min_trials(&self) -> usize {
        self.min_trials
    }

    pub fn max_consecutive_repeats(&self) -> usize {
        self.max_consecutive_repeats
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn shape(&self) -> PsychometricShape {
        self.shape
    }

    pub fn tie_credit(&self) -> f64 {
        self.tie_credit
    }

    pub fn neighborhood_radius(&self) -> usize {
        self.neighborhood_radius
    }

    pub fn options(&self) -> &MLEOptions {
        &self.options
    }
}
