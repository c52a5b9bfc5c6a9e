//! Starting point (α₀, β₀) for the simplex search.
//!
//! - α₀ is the midpoint of the candidate range, `first + (last − first) / 2`,
//!   moved to `0.1` when it is exactly 0.
//! - β₀ makes the curve pass through the observed proportion at the most
//!   tested level (first such level on ties): it solves
//!   `p(x₁; α₀, β) = k₁ / n₁` for β > 0, seeded at 1. When that equation has
//!   no positive root the seed is used as is. That happens when the
//!   proportion is outside `(γ, 1 − λ)`, when `x₁ = α₀` so β has no effect,
//!   or when the proportion sits on the wrong side of the curve's midpoint
//!   for `x₁` (a decreasing curve would be needed).
use crate::{
    optimization::root_finding::{RootOptions, SearchDomain, solve_bracketed},
    psychometric::fitting::likelihood::{BinomialLikelihood, FitData},
};
use tracing::trace;

/// Seed for β and its fallback value.
pub const BETA_SEED: f64 = 1.0;

/// Replacement for an α₀ that lands exactly on 0.
pub const ZERO_ALPHA_NUDGE: f64 = 0.1;

/// Compute (α₀, β₀) for `data` under `likelihood`'s fixed configuration.
pub fn initial_guess(likelihood: &BinomialLikelihood, data: &FitData) -> (f64, f64) {
    let levels = data.levels();
    let first = levels[0];
    let last = levels[levels.len() - 1];
    let mut alpha0 = first + (last - first) / 2.0;
    if alpha0 == 0.0 {
        alpha0 = ZERO_ALPHA_NUDGE;
    }

    let mut anchor = 0;
    for (i, &n) in data.total().iter().enumerate() {
        if n > data.total()[anchor] {
            anchor = i;
        }
    }
    let x1 = levels[anchor];
    let target = data.correct()[anchor] / data.total()[anchor];

    let g = |beta: f64| {
        likelihood
            .model(alpha0, beta)
            .and_then(|m| m.probability_correct(x1))
            .map_or(f64::NAN, |p| p - target)
    };
    let options = RootOptions::default();
    let beta0 = solve_bracketed(&g, BETA_SEED, SearchDomain::PositiveHalfLine, &options)
        .ok()
        .filter(|&beta| beta.is_finite() && beta > 0.0)
        .unwrap_or(BETA_SEED);
    trace!(alpha0, beta0, anchor_level = x1, target, "initial guess");
    (alpha0, beta0)
}
