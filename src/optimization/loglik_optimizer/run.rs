//! Execution helper that runs an `argmin` solver on a log-likelihood problem and
//! returns a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter},
};
#[cfg(feature = "obs_slog")]
use argmin::core::CostFunction;
use argmin::core::{Executor, IterState, Solver, State};

/// Run a derivative-free `argmin` optimization for a log-likelihood problem.
///
/// This wires up:
/// - the user model via [`ArgMinAdapter`],
/// - the chosen `Solver` (the Nelder–Mead simplex from
///   [`build_nelder_mead`](crate::optimization::loglik_optimizer::builders::build_nelder_mead)),
/// - optional observers (behind the `obs_slog` feature),
/// - the mandatory `max_iters` cap,
///   then executes the solver and converts the result into [`OptimOutcome`].
///
/// The simplex carries its own starting vertices, so no initial parameter is
/// set on the executor state.
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a terminal
/// slog observer is attached with `ObserverMode::Always` and a one-time line
/// logs ℓ(θ₀) before the first iteration.
///
/// # Errors
/// - Propagates any `argmin` runtime error (observer failures, cost
///   failures, etc.) via the crate's `From<argmin::core::Error>` conversion.
/// - Propagates validation errors encountered when constructing
///   [`OptimOutcome`] (e.g. every vertex infeasible, so the best cost is `+∞`).
pub fn run_simplex<'a, F, S>(
    theta0: &Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, IterState<Theta, (), (), (), (), f64>>,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(theta0, &problem)?;
    }
    #[cfg(not(feature = "obs_slog"))]
    let _ = theta0;

    let max_iter = opts.tols.max_iter as u64;
    #[allow(unused_mut)]
    let mut optimizer = Executor::new(problem, solver).configure(|state| state.max_iters(max_iter));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let ll0 = -problem.cost(theta0)?;
    eprintln!("init: ell(theta0) = {ll0:.6}");
    Ok(())
}
