//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! This builds a Nelder–Mead simplex around the initial guess, wraps the model
//! in an `ArgMinAdapter` (which *minimizes* `-ℓ(θ)`), and delegates the run to
//! `run_simplex`. A run that converged on the cost spread alone is confirmed
//! by one restart from its best vertex.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::build_nelder_mead,
        run::run_simplex,
        traits::{LogLikelihood, MLEOptions},
    },
};

/// Maximize a log-likelihood `ℓ(θ)` with a derivative-free simplex search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an `ArgMinAdapter` that exposes a *minimization*
///   problem `c(θ) = -ℓ(θ)` to `argmin`.
/// - Builds the simplex from `theta0` and `opts.simplex_step`.
/// - Calls `run_simplex`, which applies the iteration cap and returns an
///   `OptimOutcome`.
/// - If that run converged and `opts.tols.tol_param` is set, runs again from
///   `θ̂` with a fresh simplex. The cost-spread rule alone can stop on a
///   large simplex; the restart only reports convergence when it converges
///   too and `θ̂` stays within `tol_param · (1 + |θ̂ᵢ|)` per coordinate.
///   Iterations and evaluation counts cover both runs.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors from `build_nelder_mead`.
/// - Propagates runtime errors from `run_simplex`.
///
/// # Returns
/// An [`OptimOutcome`] containing `theta_hat`, best value `ℓ(θ̂)`,
/// convergence flag, termination status, iteration and evaluation counts.
/// Reaching the iteration cap is **not** an error; it is reported through
/// `converged = false`.
///
/// # Example
/// ```
/// use ndarray::array;
/// use rust_psychometrics::optimization::{
///     errors::OptResult,
///     loglik_optimizer::{maximize, LogLikelihood, MLEOptions, Theta},
/// };
///
/// struct Bowl;
/// impl LogLikelihood for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-(theta[0] - 1.0).powi(2) - (theta[1] + 2.0).powi(2))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Bowl, &array![0.5, 0.5], &(), &MLEOptions::default())?;
/// assert!(out.converged);
/// assert!((out.theta_hat[0] - 1.0).abs() < 1e-2);
/// # Ok::<(), rust_psychometrics::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: &Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(theta0, data)?;
    let first = run_from(f, theta0, data, opts)?;
    let Some(tol_param) = opts.tols.tol_param else {
        return Ok(first);
    };
    if !first.converged {
        return Ok(first);
    }
    let second = run_from(f, &first.theta_hat, data, opts)?;
    Ok(confirm_restart(first, second, tol_param))
}

// ---- Helper Methods ----

fn run_from<F: LogLikelihood>(
    f: &F, theta0: &Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    let problem = ArgMinAdapter::new(f, data);
    let solver = build_nelder_mead(theta0, opts)?;
    run_simplex(theta0, opts, problem, solver)
}

fn confirm_restart(first: OptimOutcome, mut second: OptimOutcome, tol_param: f64) -> OptimOutcome {
    let moved = first
        .theta_hat
        .iter()
        .zip(second.theta_hat.iter())
        .any(|(&a, &b)| (b - a).abs() > tol_param * (1.0 + a.abs()));
    if second.converged && moved {
        second.converged = false;
        second.status = format!("Restart moved the estimate by more than {tol_param:e}");
    }
    second.iterations += first.iterations;
    for (name, count) in first.fn_evals {
        *second.fn_evals.entry(name).or_insert(0) += count;
    }
    second
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        loglik_optimizer::{FnEvalMap, Tolerances, validation::validate_theta},
    };
    use approx::assert_abs_diff_eq;
    use argmin::core::{TerminationReason, TerminationStatus};
    use ndarray::array;

    // Concave toy log-likelihood with maximum at `center`; infeasible for θ₀ < 0.
    struct ShiftedBowl;

    impl LogLikelihood for ShiftedBowl {
        type Data = (f64, f64);

        fn value(&self, theta: &Theta, center: &(f64, f64)) -> OptResult<f64> {
            if theta[0] < 0.0 {
                return Ok(f64::NEG_INFINITY);
            }
            Ok(-(theta[0] - center.0).powi(2) - 3.0 * (theta[1] - center.1).powi(2))
        }

        fn check(&self, theta: &Theta, _data: &(f64, f64)) -> OptResult<()> {
            validate_theta(theta, 2)
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `maximize` locates the maximum of a smooth concave
    // function and reports convergence.
    //
    // Given
    // -----
    // - `ℓ(θ) = -(θ₀-4)² - 3(θ₁+1)²`, start `(1, 1)`.
    //
    // Expect
    // ------
    // - `converged = true`, `θ̂ ≈ (4, -1)`, `ℓ(θ̂) ≈ 0`.
    fn maximize_finds_bowl_maximum() {
        // Arrange
        let data = (4.0, -1.0);

        // Act
        let out = maximize(&ShiftedBowl, &array![1.0, 1.0], &data, &MLEOptions::default())
            .expect("optimization should succeed");

        // Assert
        assert!(out.converged, "status: {}", out.status);
        assert_abs_diff_eq!(out.theta_hat[0], 4.0, epsilon = 1e-2);
        assert_abs_diff_eq!(out.theta_hat[1], -1.0, epsilon = 1e-2);
        assert_abs_diff_eq!(out.value, 0.0, epsilon = 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Ensure the iteration cap ends the run without error and is reported
    // as non-convergence.
    //
    // Given
    // -----
    // - `max_iter = 2`, a tight tolerance.
    //
    // Expect
    // ------
    // - `Ok(outcome)` with `converged = false` and `iterations = 2`.
    fn maximize_reports_iteration_cap_as_not_converged() {
        // Arrange
        let tols = Tolerances::new(Some(1e-12), 2).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, 0.05, false).expect("MLEOptions should be valid");

        // Act
        let out = maximize(&ShiftedBowl, &array![1.0, 1.0], &(40.0, 9.0), &opts)
            .expect("capped run should still return an outcome");

        // Assert
        assert!(!out.converged);
        assert_eq!(out.iterations, 2);
    }

    #[test]
    // Purpose
    // -------
    // Check that `check` runs before any solver work.
    //
    // Given
    // -----
    // - A length-3 initial guess for a 2-parameter model.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch`.
    fn maximize_rejects_invalid_initial_guess() {
        let opts = MLEOptions::default();
        let err = maximize(&ShiftedBowl, &array![1.0, 1.0, 1.0], &(0.0, 0.0), &opts)
            .expect_err("length mismatch should be rejected");
        assert_eq!(err, OptError::ThetaLengthMismatch { expected: 2, actual: 3 });
    }

    fn converged_at(theta: Theta, iterations: u64, evals: u64) -> OptimOutcome {
        let fn_evals: FnEvalMap = [("cost_count".to_string(), evals)].into_iter().collect();
        OptimOutcome::new(
            Some(theta),
            -1.0,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            iterations,
            fn_evals,
        )
        .expect("outcome should be valid")
    }

    #[test]
    // Purpose
    // -------
    // Verify that a restart which moves the estimate withdraws convergence,
    // and one that stays put keeps it.
    //
    // Given
    // -----
    // - A first run converged at `(-16, -2)`; restarts ending at
    //   `(-15, -1.9)` and at `(-16.001, -2.0001)`; `tol_param = 1e-3`.
    //
    // Expect
    // ------
    // - The moved restart is not converged; the close one is.
    // - Iterations and evaluation counts are summed over both runs.
    fn restart_confirms_only_a_stationary_estimate() {
        // Arrange
        let first = converged_at(array![-16.0, -2.0], 9, 20);

        // Act
        let moved = confirm_restart(first.clone(), converged_at(array![-15.0, -1.9], 4, 10), 1e-3);
        let held =
            confirm_restart(first, converged_at(array![-16.001, -2.0001], 30, 60), 1e-3);

        // Assert
        assert!(!moved.converged, "status: {}", moved.status);
        assert_eq!(moved.iterations, 13);
        assert_eq!(moved.fn_evals["cost_count"], 30);
        assert!(held.converged);
        assert_eq!(held.iterations, 39);
    }

    #[test]
    // Purpose
    // -------
    // Check that the confirming restart still reports the bowl maximum and
    // that disabling it reports a single run.
    //
    // Given
    // -----
    // - The bowl centred at `(4, -1)` with default tolerances, then with
    //   `tol_param = None` and the same start.
    //
    // Expect
    // ------
    // - Both converge near `(4, -1)`; the restarted run used more iterations.
    fn restart_preserves_bowl_maximum() {
        // Arrange
        let theta0 = array![1.0, 1.0];
        let single = Tolerances::default().with_tol_param(None).expect("valid");
        let single = MLEOptions::new(single, 0.05, false).expect("valid");

        // Act
        let confirmed = maximize(&ShiftedBowl, &theta0, &(4.0, -1.0), &MLEOptions::default())
            .expect("optimization should succeed");
        let once = maximize(&ShiftedBowl, &theta0, &(4.0, -1.0), &single)
            .expect("optimization should succeed");

        // Assert
        assert!(confirmed.converged && once.converged);
        assert_abs_diff_eq!(confirmed.theta_hat[0], 4.0, epsilon = 1e-2);
        assert_abs_diff_eq!(confirmed.theta_hat[1], -1.0, epsilon = 1e-2);
        assert!(confirmed.iterations > once.iterations);
    }
}
