//! root_finding — bracketed scalar root solves on top of argmin's Brent solver.
//!
//! Purpose
//! -------
//! Solve `g(x) = 0` for a scalar, monotone `g` when only a seed is known:
//! first bracket a sign change by geometric expansion around the seed, then
//! refine with [`BrentRoot`]. Used to invert psychometric curves and to seed
//! the slope of a fit.
//!
//! Conventions
//! -----------
//! - Expansion doubles the search radius each step, up to
//!   [`RootOptions::max_expansions`] steps; evaluations that are not finite
//!   are skipped rather than treated as sign information.
//! - On [`SearchDomain::PositiveHalfLine`] the bracket is grown
//!   multiplicatively (`seed / 2^k`, `seed · 2^k`), so it never touches 0.
use crate::optimization::errors::{OptError, OptResult};
use argmin::{
    core::{CostFunction, Error, Executor, State},
    solver::brent::BrentRoot,
};

/// Where the unknown is allowed to live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDomain {
    RealLine,
    PositiveHalfLine,
}

/// Settings for [`solve_bracketed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootOptions {
    /// First half-width tried around the seed (additive on the real line).
    pub initial_half_width: f64,
    /// Number of doublings before giving up.
    pub max_expansions: usize,
    /// Brent tolerance on `x`.
    pub tol: f64,
    /// Iteration cap for the Brent refinement.
    pub max_iter: u64,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self { initial_half_width: 1.0, max_expansions: 60, tol: 1e-12, max_iter: 200 }
    }
}

struct ScalarEquation<'a, G> {
    g: &'a G,
}

impl<G: Fn(f64) -> f64> CostFunction for ScalarEquation<'_, G> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, x: &f64) -> Result<f64, Error> {
        Ok((self.g)(*x))
    }
}

/// Find `[lo, hi]` with `g(lo)` and `g(hi)` of opposite sign (or one of them 0).
///
/// # Errors
/// - [`OptError::RootNotBracketed`] if no sign change is found within
///   `opts.max_expansions` doublings.
pub fn bracket_root<G: Fn(f64) -> f64>(
    g: &G, seed: f64, domain: SearchDomain, opts: &RootOptions,
) -> OptResult<(f64, f64)> {
    for k in 0..=opts.max_expansions {
        let scale = 2f64.powi(k as i32);
        let (lo, hi) = match domain {
            SearchDomain::RealLine => {
                let width = opts.initial_half_width * scale;
                (seed - width, seed + width)
            }
            SearchDomain::PositiveHalfLine => (seed / (2.0 * scale), seed * (2.0 * scale)),
        };
        let (g_lo, g_hi) = (g(lo), g(hi));
        if !g_lo.is_finite() || !g_hi.is_finite() {
            continue;
        }
        if g_lo * g_hi <= 0.0 {
            return Ok((lo, hi));
        }
    }
    Err(OptError::RootNotBracketed { seed, expansions: opts.max_expansions })
}

/// Solve `g(x) = 0` starting from `seed`.
///
/// Brackets a root with [`bracket_root`] and refines it with argmin's
/// [`BrentRoot`]. An endpoint that is an exact root is returned directly.
///
/// # Errors
/// - [`OptError::RootNotBracketed`] when no sign change exists near the seed
///   (e.g. `g` is flat or its range misses 0).
/// - Argmin backend errors, converted through `From<argmin::core::Error>`.
/// - [`OptError::MissingRoot`] if the solver finished without a parameter.
pub fn solve_bracketed<G: Fn(f64) -> f64>(
    g: &G, seed: f64, domain: SearchDomain, opts: &RootOptions,
) -> OptResult<f64> {
    let (lo, hi) = bracket_root(g, seed, domain, opts)?;
    if g(lo) == 0.0 {
        return Ok(lo);
    }
    if g(hi) == 0.0 {
        return Ok(hi);
    }
    let problem = ScalarEquation { g };
    let solver = BrentRoot::new(lo, hi, opts.tol);
    let max_iter = opts.max_iter;
    let result = Executor::new(problem, solver)
        .configure(|state| state.param(0.5 * (lo + hi)).max_iters(max_iter))
        .run()?;
    result.state().get_param().copied().ok_or(OptError::MissingRoot)
}
