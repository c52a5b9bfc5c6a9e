//! PsychometricModel — immutable psychometric function value object.
//!
//! Purpose
//! -------
//! Represent a fully specified psychometric function
//! `p(x) = γ + (1 − γ − λ) · F(x; α, β)` and answer the two questions the
//! rest of the crate asks of it: the probability of a correct response at a
//! stimulus, and the stimulus that yields a given probability.
//!
//! Key behaviors
//! -------------
//! - [`PsychometricModel::new`] validates the rates and parameters once;
//!   afterwards the model is `Copy` and pure.
//! - [`PsychometricModel::probability_correct`] evaluates the curve in closed
//!   form (Weibull CDF via `statrs`), failing with a domain error outside the
//!   shape's support.
//! - [`PsychometricModel::inverse`] brackets and Brent-solves
//!   `p(x) − target = 0`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 ≤ γ < 1`, `0 ≤ λ < 1`, `γ + λ < 1`; α and β are finite.
//! - Weibull evaluations additionally need `x > 0`, `α > 0`, `β > 0`; these
//!   are checked per call, not at construction, so fitters can evaluate any
//!   finite (α, β).
use crate::{
    optimization::{
        errors::OptError,
        numerical_stability::safe_logistic,
        root_finding::{RootOptions, SearchDomain, solve_bracketed},
    },
    psychometric::{
        core::shape::PsychometricShape,
        errors::{PsychometricError, PsychometricResult},
    },
};
use statrs::distribution::{ContinuousCDF, Weibull};

/// Validate a guess/lapse pair.
///
/// # Errors
/// - [`PsychometricError::InvalidGuessRate`] unless `γ ∈ [0, 1)`.
/// - [`PsychometricError::InvalidLapseRate`] unless `λ ∈ [0, 1)`.
/// - [`PsychometricError::RatesCollapse`] unless `γ + λ < 1`.
pub fn validate_rates(gamma: f64, lambda: f64) -> PsychometricResult<()> {
    if !gamma.is_finite() || !(0.0..1.0).contains(&gamma) {
        return Err(PsychometricError::InvalidGuessRate { value: gamma });
    }
    if !lambda.is_finite() || !(0.0..1.0).contains(&lambda) {
        return Err(PsychometricError::InvalidLapseRate { value: lambda });
    }
    if gamma + lambda >= 1.0 {
        return Err(PsychometricError::RatesCollapse { gamma, lambda });
    }
    Ok(())
}

/// A psychometric function with fixed (α, β, γ, λ) and shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PsychometricModel {
    alpha: f64,
    beta: f64,
    gamma: f64,
    lambda: f64,
    shape: PsychometricShape,
}

impl PsychometricModel {
    /// Construct a validated model.
    ///
    /// # Errors
    /// - Rate errors from [`validate_rates`].
    /// - [`PsychometricError::InvalidParameter`] if α or β is not finite.
    pub fn new(
        alpha: f64, beta: f64, gamma: f64, lambda: f64, shape: PsychometricShape,
    ) -> PsychometricResult<Self> {
        validate_rates(gamma, lambda)?;
        if !alpha.is_finite() {
            return Err(PsychometricError::InvalidParameter {
                name: "alpha",
                value: alpha,
                reason: "must be finite",
            });
        }
        if !beta.is_finite() {
            return Err(PsychometricError::InvalidParameter {
                name: "beta",
                value: beta,
                reason: "must be finite",
            });
        }
        Ok(Self { alpha, beta, gamma, lambda, shape })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
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

    /// Lower asymptote γ.
    pub fn floor(&self) -> f64 {
        self.gamma
    }

    /// Upper asymptote 1 − λ.
    pub fn ceiling(&self) -> f64 {
        1.0 - self.lambda
    }

    /// Probability of a correct response at stimulus `x`.
    ///
    /// The result always lies in `[γ, 1 − λ]`.
    ///
    /// # Errors
    /// - [`PsychometricError::NonFiniteStimulus`] if `x` is NaN/±inf.
    /// - [`PsychometricError::OutsideShapeDomain`] for a Weibull curve with
    ///   `x ≤ 0`, `α ≤ 0` or `β ≤ 0`.
    pub fn probability_correct(&self, x: f64) -> PsychometricResult<f64> {
        if !x.is_finite() {
            return Err(PsychometricError::NonFiniteStimulus { value: x });
        }
        let core = match self.shape {
            PsychometricShape::Logistic => safe_logistic(self.beta * (x - self.alpha)),
            PsychometricShape::Weibull => self.weibull_cdf(x)?,
            PsychometricShape::Gumbel => {
                let t = 10f64.powf(self.beta * (x - self.alpha));
                -(-t).exp_m1()
            }
        };
        Ok(self.gamma + (1.0 - self.gamma - self.lambda) * core)
    }

    fn weibull_cdf(&self, x: f64) -> PsychometricResult<f64> {
        if x <= 0.0 {
            return Err(PsychometricError::OutsideShapeDomain {
                x,
                reason: "weibull stimulus must be > 0",
            });
        }
        if self.alpha <= 0.0 || self.beta <= 0.0 {
            return Err(PsychometricError::OutsideShapeDomain {
                x,
                reason: "weibull alpha and beta must be > 0",
            });
        }
        let dist = Weibull::new(self.beta, self.alpha).map_err(|_| {
            PsychometricError::OutsideShapeDomain { x, reason: "invalid weibull parameters" }
        })?;
        Ok(dist.cdf(x))
    }

    /// Stimulus at which the curve reaches probability `p`.
    ///
    /// # Errors
    /// - [`PsychometricError::ProbabilityOutOfRange`] unless `γ < p < 1 − λ`.
    /// - [`PsychometricError::OutsideShapeDomain`] for a Weibull curve with
    ///   `α ≤ 0`.
    /// - [`PsychometricError::NoInverse`] if no sign change of `p(x) − p` can
    ///   be bracketed (for example a flat curve with β = 0).
    pub fn inverse(&self, p: f64) -> PsychometricResult<f64> {
        let (floor, ceiling) = (self.floor(), self.ceiling());
        if !p.is_finite() || p <= floor || p >= ceiling {
            return Err(PsychometricError::ProbabilityOutOfRange { p, floor, ceiling });
        }
        let domain = if self.shape.requires_positive_domain() {
            if self.alpha <= 0.0 {
                return Err(PsychometricError::OutsideShapeDomain {
                    x: self.alpha,
                    reason: "weibull alpha must be > 0 to invert",
                });
            }
            SearchDomain::PositiveHalfLine
        } else {
            SearchDomain::RealLine
        };
        let g = |x: f64| self.probability_correct(x).map_or(f64::NAN, |q| q - p);
        match solve_bracketed(&g, self.alpha, domain, &RootOptions::default()) {
            Ok(x) => Ok(x),
            Err(OptError::RootNotBracketed { .. }) => Err(PsychometricError::NoInverse { p }),
            Err(err) => Err(err.into()),
        }
    }

    /// `n` evenly spaced `(x, p(x))` points over `[start, end]`, endpoints included.
    ///
    /// `n = 0` yields an empty vector and `n = 1` yields `start` only.
    ///
    /// # Errors
    /// - Any evaluation error from [`Self::probability_correct`].
    pub fn sample_curve(
        &self, start: f64, end: f64, n: usize,
    ) -> PsychometricResult<Vec<(f64, f64)>> {
        let step = if n > 1 { (end - start) / (n - 1) as f64 } else { 0.0 };
        (0..n)
            .map(|i| {
                let x = if i + 1 == n && n > 1 { end } else { start + step * i as f64 };
                self.probability_correct(x).map(|p| (x, p))
            })
            .collect()
    }
}
