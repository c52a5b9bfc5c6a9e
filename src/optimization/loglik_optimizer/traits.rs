//! Public API surface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait users implement for their model.
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`OptimOutcome`]: normalized result returned by the high-level `maximize` API.
//!
//! Convention: we *maximize* a user log-likelihood `ℓ(θ)` by minimizing the cost
//! `c(θ) = -ℓ(θ)` with a derivative-free simplex search. A log-likelihood may
//! return `-∞` to mark `θ` as infeasible; `NaN` is always an error.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        types::{Cost, DEFAULT_SIMPLEX_STEP, DEFAULT_TOL_PARAM, FnEvalMap, Theta},
        validation::{
            validate_theta_hat, validate_value, verify_max_iter, verify_simplex_step,
            verify_tol_cost, verify_tol_param,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};

/// User-implemented log-likelihood interface.
///
/// You maximize `ℓ(θ)`; internally we minimize the cost `c(θ) = -ℓ(θ)`.
///
/// - `type Data`: per-model data carried into `value`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`.
///   Return `f64::NEG_INFINITY` for parameters outside the model's domain;
///   return an `OptError` for genuine failures.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook to reject
///   obviously invalid `θ`/`data` pairs. Called once before optimization.
pub trait LogLikelihood {
    type Data: 'static;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — stopping rule and iteration cap.
/// - `simplex_step: f64` — relative displacement of the initial simplex
///   vertices around `θ₀`.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress.
///
/// Default:
/// - `tols`: `tol_cost = 1e-8`, `tol_param = 1e-3`, `max_iter = 1000`
/// - `simplex_step`: `0.05`
/// - `verbose`: `false`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub simplex_step: f64,
    pub verbose: bool,
}

impl MLEOptions {
    /// Create a new set of optimizer options.
    ///
    /// # Errors
    /// - [`InvalidSimplexStep`](crate::optimization::errors::OptError::InvalidSimplexStep) if
    ///   `simplex_step` is non-finite or non-positive.
    pub fn new(tols: Tolerances, simplex_step: f64, verbose: bool) -> OptResult<Self> {
        verify_simplex_step(simplex_step)?;
        Ok(Self { tols, simplex_step, verbose })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self { tols: Tolerances::default(), simplex_step: DEFAULT_SIMPLEX_STEP, verbose: false }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_cost`: terminate when the standard deviation of the simplex costs
///   falls below this threshold.
/// - `tol_param`: a cost-converged run is confirmed by one restart from its
///   best vertex with a fresh simplex; convergence stands only if the
///   restart also converges and no coordinate moves by more than
///   `tol_param · (1 + |θ̂ᵢ|)`. `None` skips the restart.
/// - `max_iter`: hard cap on the number of iterations of each run. Always
///   present, so a single fit has bounded latency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_cost: Option<f64>,
    pub tol_param: Option<f64>,
    pub max_iter: usize,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::InvalidTolCost`](crate::optimization::errors::OptError::InvalidTolCost)
    ///   for a non-finite or non-positive tolerance.
    /// - [`OptError::InvalidMaxIter`](crate::optimization::errors::OptError::InvalidMaxIter)
    ///   if `max_iter == 0`.
    pub fn new(tol_cost: Option<f64>, max_iter: usize) -> OptResult<Self> {
        verify_tol_cost(tol_cost)?;
        verify_max_iter(max_iter)?;
        Ok(Self { tol_cost, tol_param: DEFAULT_TOL_PARAM, max_iter })
    }

    /// Replace the restart displacement tolerance.
    ///
    /// # Errors
    /// - [`OptError::InvalidTolParam`](crate::optimization::errors::OptError::InvalidTolParam)
    ///   for a non-finite or non-positive tolerance.
    pub fn with_tol_param(mut self, tol_param: Option<f64>) -> OptResult<Self> {
        verify_tol_param(tol_param)?;
        self.tol_param = tol_param;
        Ok(self)
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tol_cost: Some(1e-8), tol_param: DEFAULT_TOL_PARAM, max_iter: 1000 }
    }
}

/// Canonical result returned by `maximize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **log-likelihood** value `ℓ(θ)` (not the cost).
/// - `converged`: `true` only if the solver stopped on its own convergence
///   criterion; hitting the iteration cap is reported as `false`.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                (converged, format!("{reason:?}"))
            }
        };
        let iterations = iterations as usize;
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals })
    }
}
