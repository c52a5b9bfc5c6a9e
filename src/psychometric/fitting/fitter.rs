//! LikelihoodFitter — maximum-likelihood estimation of (α, β).
//!
//! Purpose
//! -------
//! Fit the threshold α and slope β of a psychometric function with fixed
//! guess rate γ, lapse rate λ and shape to per-level count data, using the
//! Nelder–Mead simplex from
//! [`loglik_optimizer`](crate::optimization::loglik_optimizer).
//!
//! Key behaviors
//! -------------
//! - Input validation errors (lengths, counts, levels, no observations) are
//!   returned as `Err`.
//! - Non-convergence is never an error: hitting the iteration cap, or any
//!   backend or numerical failure inside the minimization, yields a
//!   [`FitResult`] with `converged = false` holding the best estimate
//!   (or the initial guess when the run produced none).
//! - A converged simplex whose curve is flat over the observed levels (the
//!   rise from the lowest to the highest observed level is below
//!   [`FLAT_CURVE_TOL`] of `1 − γ − λ`) is reported with
//!   `converged = false`: every α on such a plateau fits equally well.
//! - Identical inputs give identical results; there is no randomness here.
use crate::{
    optimization::loglik_optimizer::{MLEOptions, maximize},
    psychometric::{
        core::{PsychometricModel, PsychometricShape, TrialAccumulator},
        errors::PsychometricResult,
        fitting::{
            initial_guess::initial_guess,
            likelihood::{BinomialLikelihood, FitData},
        },
    },
};
use ndarray::array;
use tracing::{debug, warn};

/// Relative rise over the observed levels below which a fitted curve counts
/// as flat.
pub const FLAT_CURVE_TOL: f64 = 1e-3;

/// Outcome of one fit attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub alpha: f64,
    pub beta: f64,
    /// `true` only if the simplex met its convergence criterion.
    pub converged: bool,
    /// Negative log-likelihood at `(alpha, beta)`; `+∞` if infeasible.
    pub neg_log_likelihood: f64,
    pub iterations: usize,
    /// Termination status as reported by the optimizer, or the failure text.
    pub status: String,
}

impl FitResult {
    /// Model built from the estimate and the fitter's fixed configuration.
    pub fn model(
        &self, gamma: f64, lambda: f64, shape: PsychometricShape,
    ) -> PsychometricResult<PsychometricModel> {
        PsychometricModel::new(self.alpha, self.beta, gamma, lambda, shape)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodFitter {
    likelihood: BinomialLikelihood,
    options: MLEOptions,
}

impl LikelihoodFitter {
    /// Fitter with default optimizer options.
    ///
    /// # Errors
    /// - Rate errors as in [`PsychometricModel::new`].
    pub fn new(gamma: f64, lambda: f64, shape: PsychometricShape) -> PsychometricResult<Self> {
        Ok(Self {
            likelihood: BinomialLikelihood::new(gamma, lambda, shape)?,
            options: MLEOptions::default(),
        })
    }

    /// Replace the optimizer options (already validated by their constructors).
    pub fn with_options(mut self, options: MLEOptions) -> Self {
        self.options = options;
        self
    }

    pub fn gamma(&self) -> f64 {
        self.likelihood.gamma()
    }

    pub fn lambda(&self) -> f64 {
        self.likelihood.lambda()
    }

    pub fn shape(&self) -> PsychometricShape {
        self.likelihood.shape()
    }

    pub fn options(&self) -> &MLEOptions {
        &self.options
    }

    /// Fit (α, β) to `correct[i]` successes out of `total[i]` trials at `levels[i]`.
    ///
    /// # Errors
    /// - Validation errors from [`FitData::new`], including
    ///   [`NoObservations`](crate::psychometric::errors::PsychometricError::NoObservations).
    pub fn fit(
        &self, levels: &[f64], correct: &[f64], total: &[f64],
    ) -> PsychometricResult<FitResult> {
        let data = FitData::new(levels, correct, total)?;
        Ok(self.fit_data(&data))
    }

    /// Fit the counts held by an accumulator.
    ///
    /// # Errors
    /// - As for [`Self::fit`].
    pub fn fit_accumulator(&self, acc: &TrialAccumulator) -> PsychometricResult<FitResult> {
        self.fit(acc.levels().as_slice(), acc.correct(), acc.total())
    }

    /// Fit already validated data. Never fails.
    pub fn fit_data(&self, data: &FitData) -> FitResult {
        let (alpha0, beta0) = initial_guess(&self.likelihood, data);
        let theta0 = array![alpha0, beta0];
        match maximize(&self.likelihood, &theta0, data, &self.options) {
            Ok(out) => {
                let mut result = FitResult {
                    alpha: out.theta_hat[0],
                    beta: out.theta_hat[1],
                    converged: out.converged,
                    neg_log_likelihood: -out.value,
                    iterations: out.iterations,
                    status: out.status,
                };
                if result.converged && self.is_flat(result.alpha, result.beta, data) {
                    result.converged = false;
                    result.status = "Flat curve over the observed levels".to_string();
                }
                debug!(
                    alpha = result.alpha,
                    beta = result.beta,
                    converged = result.converged,
                    nll = result.neg_log_likelihood,
                    iterations = result.iterations,
                    "fit finished"
                );
                result
            }
            Err(err) => {
                warn!(
                    error = %err,
                    alpha0,
                    beta0,
                    "fit failed; reporting initial guess as not converged"
                );
                let neg_log_likelihood = self
                    .likelihood
                    .negative_log_likelihood(alpha0, beta0, data)
                    .unwrap_or(f64::INFINITY);
                FitResult {
                    alpha: alpha0,
                    beta: beta0,
                    converged: false,
                    neg_log_likelihood,
                    iterations: 0,
                    status: err.to_string(),
                }
            }
        }
    }

    // True when p rises by less than FLAT_CURVE_TOL · (1 − γ − λ) between the
    // lowest and highest observed level, or cannot be evaluated there.
    fn is_flat(&self, alpha: f64, beta: f64, data: &FitData) -> bool {
        let mut observed = data
            .levels()
            .iter()
            .zip(data.total())
            .filter(|&(_, &n)| n > 0.0)
            .map(|(&x, _)| x);
        let Some(lo) = observed.next() else {
            return true;
        };
        let hi = observed.last().unwrap_or(lo);
        let rise = self.likelihood.model(alpha, beta).and_then(|m| {
            Ok((m.probability_correct(hi)? - m.probability_correct(lo)?).abs())
        });
        let span = 1.0 - self.gamma() - self.lambda();
        rise.map_or(true, |rise| rise < FLAT_CURVE_TOL * span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        optimization::loglik_optimizer::Tolerances,
        psychometric::errors::PsychometricError,
    };
    use approx::assert_abs_diff_eq;

    type Counts = (Vec<f64>, Vec<f64>, Vec<f64>);

    // Expected counts at 0..=15 from a known curve, rounded to whole trials.
    fn synthetic_counts(model: &PsychometricModel, per_level: f64) -> Counts {
        let levels: Vec<f64> = (0..16).map(f64::from).collect();
        let total = vec![per_level; levels.len()];
        let correct = levels
            .iter()
            .map(|&x| {
                (model.probability_correct(x).expect("logistic is total") * per_level).round()
            })
            .collect();
        (levels, correct, total)
    }

    #[test]
    // Purpose
    // -------
    // Verify parameter recovery on data generated from a known logistic.
    //
    // Given
    // -----
    // - (α, β, γ, λ) = (5, 1, 0.5, 0.01); 40 trials per level on 0..=15.
    //
    // Expect
    // ------
    // - `converged = true`, α̂ within ±1 of 5, finite NLL.
    fn fit_recovers_logistic_threshold() {
        // Arrange
        let truth = PsychometricModel::new(5.0, 1.0, 0.5, 0.01, PsychometricShape::Logistic)
            .expect("valid");
        let (levels, correct, total) = synthetic_counts(&truth, 40.0);
        let fitter = LikelihoodFitter::new(0.5, 0.01, PsychometricShape::Logistic).expect("valid");

        // Act
        let fit = fitter.fit(&levels, &correct, &total).expect("valid data");

        // Assert
        assert!(fit.converged, "status: {}", fit.status);
        assert_abs_diff_eq!(fit.alpha, 5.0, epsilon = 1.0);
        assert!(fit.beta > 0.0);
        assert!(fit.neg_log_likelihood.is_finite());
    }

    #[test]
    // Purpose
    // -------
    // Ensure identical inputs produce identical results.
    //
    // Given
    // -----
    // - The same synthetic data fitted twice.
    //
    // Expect
    // ------
    // - Equal `FitResult`s.
    fn fit_is_deterministic() {
        let truth = PsychometricModel::new(5.0, 1.0, 0.5, 0.01, PsychometricShape::Logistic)
            .expect("valid");
        let (levels, correct, total) = synthetic_counts(&truth, 10.0);
        let fitter = LikelihoodFitter::new(0.5, 0.01, PsychometricShape::Logistic).expect("valid");
        let a = fitter.fit(&levels, &correct, &total).expect("valid data");
        let b = fitter.fit(&levels, &correct, &total).expect("valid data");
        assert_eq!(a, b);
    }

    #[test]
    // Purpose
    // -------
    // Check that the iteration cap is reported as non-convergence, not an
    // error.
    //
    // Given
    // -----
    // - `max_iter = 1`.
    //
    // Expect
    // ------
    // - `Ok` with `converged = false` and a finite estimate.
    fn fit_reports_iteration_cap_as_not_converged() {
        let truth = PsychometricModel::new(5.0, 1.0, 0.5, 0.01, PsychometricShape::Logistic)
            .expect("valid");
        let (levels, correct, total) = synthetic_counts(&truth, 10.0);
        let opts = MLEOptions::new(Tolerances::new(Some(1e-8), 1).expect("valid"), 0.05, false)
            .expect("valid");
        let fitter = LikelihoodFitter::new(0.5, 0.01, PsychometricShape::Logistic)
            .expect("valid")
            .with_options(opts);
        let fit = fitter.fit(&levels, &correct, &total).expect("valid data");
        assert!(!fit.converged);
        assert!(fit.alpha.is_finite() && fit.beta.is_finite());
    }

    #[test]
    // Purpose
    // -------
    // Verify that a fit where every point is infeasible degrades to the
    // initial guess.
    //
    // Given
    // -----
    // - Weibull fitter with an observed level at 0 (undefined for Weibull).
    //
    // Expect
    // ------
    // - `converged = false`, α = midpoint of the range, NLL = +∞.
    fn fit_degrades_when_every_point_is_infeasible() {
        let fitter = LikelihoodFitter::new(0.5, 0.0, PsychometricShape::Weibull).expect("valid");
        let fit =
            fitter.fit(&[0.0, 2.0, 4.0], &[1.0, 2.0, 3.0], &[2.0, 3.0, 3.0]).expect("valid data");
        assert!(!fit.converged);
        assert_eq!(fit.alpha, 2.0);
        assert_eq!(fit.neg_log_likelihood, f64::INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // Ensure fitting with no observations is refused.
    //
    // Given
    // -----
    // - An untouched accumulator.
    //
    // Expect
    // ------
    // - `NoObservations`.
    fn fit_accumulator_requires_observations() {
        use crate::psychometric::core::StimulusLevels;
        let acc = TrialAccumulator::new(StimulusLevels::new(vec![1.0, 2.0]).expect("valid"));
        let fitter = LikelihoodFitter::new(0.5, 0.01, PsychometricShape::Logistic).expect("valid");
        assert_eq!(fitter.fit_accumulator(&acc), Err(PsychometricError::NoObservations));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a fit that runs onto an asymptote is not reported as converged.
    //
    // Given
    // -----
    // - γ = 0.5, λ = 0.01; every trial correct at levels 1..=5 (10 each), so
    //   the likelihood only improves as the curve sits on its ceiling at
    //   every observed level.
    //
    // Expect
    // ------
    // - `converged = false`.
    fn fit_on_ceiling_plateau_is_not_converged() {
        let levels = [1.0, 2.0, 3.0, 4.0, 5.0];
        let counts = [10.0; 5];
        let fitter = LikelihoodFitter::new(0.5, 0.01, PsychometricShape::Logistic).expect("valid");
        let fit = fitter.fit(&levels, &counts, &counts).expect("valid data");
        assert!(!fit.converged, "alpha {}, beta {}, status {}", fit.alpha, fit.beta, fit.status);
    }

    #[test]
    // Purpose
    // -------
    // Verify that counts whose most tested level lies below the range
    // midpoint with a high proportion still fit a rising curve.
    //
    // Given
    // -----
    // - Expected counts from (5, 1, 0.5, 0.01) with 20 trials per level on
    //   0..=14, except level 1 with 36/40 correct (the anchor for β₀).
    //
    // Expect
    // ------
    // - `converged = true`, β̂ > 0, α̂ inside the level range, and an NLL
    //   well below the chance-everywhere plateau `N ln 2`.
    fn fit_with_high_anchor_below_midpoint_stays_rising() {
        // Arrange
        let truth = PsychometricModel::new(5.0, 1.0, 0.5, 0.01, PsychometricShape::Logistic)
            .expect("valid");
        let (mut levels, mut correct, mut total) = synthetic_counts(&truth, 20.0);
        levels.truncate(15);
        correct.truncate(15);
        total.truncate(15);
        correct[1] = 36.0;
        total[1] = 40.0;
        let fitter = LikelihoodFitter::new(0.5, 0.01, PsychometricShape::Logistic).expect("valid");
        let plateau = total.iter().sum::<f64>() * std::f64::consts::LN_2;

        // Act
        let fit = fitter.fit(&levels, &correct, &total).expect("valid data");

        // Assert
        assert!(fit.converged, "status: {}", fit.status);
        assert!(fit.beta > 0.0, "beta = {}", fit.beta);
        assert!((0.0..=14.0).contains(&fit.alpha), "alpha = {}", fit.alpha);
        assert!(fit.neg_log_likelihood < plateau - 10.0);
    }
}
