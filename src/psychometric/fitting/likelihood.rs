//! Binomial log-likelihood of psychometric count data.
//!
//! Purpose
//! -------
//! Express the fit objective through the crate's [`LogLikelihood`] trait:
//!
//! `ℓ(α, β) = Σᵢ [kᵢ ln p(xᵢ) + (nᵢ − kᵢ) ln(1 − p(xᵢ))]`
//!
//! over levels with `nᵢ > 0`, where `p` comes from a
//! [`PsychometricModel`] with the fixed guess/lapse rates and `p` is clamped
//! to `[1e-12, 1 − 1e-12]` before the logarithm. The optimizer minimizes
//! `NLL = −ℓ`.
//!
//! Infeasibility
//! -------------
//! Parameters for which the model is undefined at an observed level (Weibull
//! with `α ≤ 0`, `β ≤ 0` or a level `≤ 0`), or non-finite parameters, give
//! `ℓ = −∞`, so the simplex moves away from them instead of failing.
use crate::{
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Cost, LogLikelihood, Theta, validation::validate_theta},
        numerical_stability::binomial_log_term,
    },
    psychometric::{
        core::{PsychometricModel, PsychometricShape, levels::validate_levels, validate_rates},
        errors::{ErrorKind, PsychometricError, PsychometricResult},
    },
};

/// Validated `(levels, correct, total)` triple handed to the optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct FitData {
    levels: Vec<f64>,
    correct: Vec<f64>,
    total: Vec<f64>,
}

impl FitData {
    /// Validate and copy count data.
    ///
    /// # Errors
    /// - [`PsychometricError::CountLengthMismatch`] if the slices differ in length.
    /// - Level errors from [`validate_levels`].
    /// - [`PsychometricError::InvalidCounts`] for non-finite or negative
    ///   counts, or `correct > total`.
    /// - [`PsychometricError::NoObservations`] if every total is zero.
    pub fn new(levels: &[f64], correct: &[f64], total: &[f64]) -> PsychometricResult<Self> {
        if levels.len() != correct.len() || levels.len() != total.len() {
            return Err(PsychometricError::CountLengthMismatch {
                levels: levels.len(),
                correct: correct.len(),
                total: total.len(),
            });
        }
        validate_levels(levels)?;
        for (index, (&k, &n)) in correct.iter().zip(total).enumerate() {
            let reason = if !k.is_finite() || !n.is_finite() {
                Some("counts must be finite")
            } else if k < 0.0 || n < 0.0 {
                Some("counts must be non-negative")
            } else if k > n {
                Some("correct must not exceed total")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(PsychometricError::InvalidCounts {
                    index,
                    correct: k,
                    total: n,
                    reason,
                });
            }
        }
        if total.iter().all(|&n| n == 0.0) {
            return Err(PsychometricError::NoObservations);
        }
        Ok(Self { levels: levels.to_vec(), correct: correct.to_vec(), total: total.to_vec() })
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn correct(&self) -> &[f64] {
        &self.correct
    }

    pub fn total(&self) -> &[f64] {
        &self.total
    }
}

/// Binomial likelihood with fixed γ, λ and shape; θ = (α, β).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialLikelihood {
    gamma: f64,
    lambda: f64,
    shape: PsychometricShape,
}

impl BinomialLikelihood {
    /// # Errors
    /// - Rate errors from [`validate_rates`].
    pub fn new(gamma: f64, lambda: f64, shape: PsychometricShape) -> PsychometricResult<Self> {
        validate_rates(gamma, lambda)?;
        Ok(Self { gamma, lambda, shape })
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

    /// Model for `(α, β)` under this likelihood's fixed configuration.
    pub fn model(&self, alpha: f64, beta: f64) -> PsychometricResult<PsychometricModel> {
        PsychometricModel::new(alpha, beta, self.gamma, self.lambda, self.shape)
    }

    /// `ℓ(α, β)`; `−∞` where the parameters are infeasible.
    ///
    /// # Errors
    /// - Model errors that are not domain errors (none for finite inputs).
    pub fn log_likelihood(&self, alpha: f64, beta: f64, data: &FitData) -> PsychometricResult<f64> {
        if !alpha.is_finite() || !beta.is_finite() {
            return Ok(f64::NEG_INFINITY);
        }
        let model = self.model(alpha, beta)?;
        let mut ll = 0.0;
        for ((&x, &k), &n) in data.levels.iter().zip(&data.correct).zip(&data.total) {
            if n == 0.0 {
                continue;
            }
            let p = match model.probability_correct(x) {
                Ok(p) => p,
                Err(err) if err.kind() == ErrorKind::Domain => return Ok(f64::NEG_INFINITY),
                Err(err) => return Err(err),
            };
            ll += binomial_log_term(k, n, p);
        }
        Ok(ll)
    }

    /// Negative log-likelihood; `+∞` where the parameters are infeasible.
    pub fn negative_log_likelihood(
        &self, alpha: f64, beta: f64, data: &FitData,
    ) -> PsychometricResult<f64> {
        self.log_likelihood(alpha, beta, data).map(|ll| -ll)
    }
}

impl LogLikelihood for BinomialLikelihood {
    type Data = FitData;

    fn value(&self, theta: &Theta, data: &FitData) -> OptResult<Cost> {
        match theta.as_slice() {
            Some(&[alpha, beta]) => Ok(self.log_likelihood(alpha, beta, data)?),
            _ => Err(OptError::ThetaLengthMismatch { expected: 2, actual: theta.len() }),
        }
    }

    fn check(&self, theta: &Theta, _data: &FitData) -> OptResult<()> {
        validate_theta(theta, 2)
    }
}
