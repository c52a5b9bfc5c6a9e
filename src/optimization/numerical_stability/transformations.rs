//! Numerical stability utilities.
//!
//! Provides safe implementations of the nonlinear transforms used by the
//! psychometric curves and the binomial log-likelihood, which are prone to
//! overflow/underflow or `ln(0)` in naïve form.
//!
//! # Provided items
//! - [`PROB_EPS`]: distance kept from 0 and 1 before taking a logarithm.
//! - [`safe_logistic(x)`]: stable `1 / (1 + exp(-x))` on all of ℝ.
//! - [`clamp_probability(p)`]: maps `p` into `[PROB_EPS, 1 - PROB_EPS]`.
//! - [`binomial_log_term(k, n, p)`]: `k ln p + (n - k) ln(1 - p)` with the
//!   zero-count terms dropped and `p` clamped.

/// Distance kept from 0 and 1 before a probability enters a logarithm.
pub const PROB_EPS: f64 = 1e-12;

/// Numerically stable logistic sigmoid.
///
/// Evaluates `exp(x) / (1 + exp(x))` for negative `x` and
/// `1 / (1 + exp(-x))` otherwise, so the exponential never overflows.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Clamp a probability away from exactly 0 or 1.
pub fn clamp_probability(p: f64) -> f64 {
    p.clamp(PROB_EPS, 1.0 - PROB_EPS)
}

/// Binomial log-likelihood kernel for one stimulus level.
///
/// Returns `k ln p + (n - k) ln(1 - p)` with `p` clamped by
/// [`clamp_probability`]. Terms with a zero weight are skipped, so a level
/// with `n = 0` contributes exactly `0.0`.
pub fn binomial_log_term(correct: f64, total: f64, p: f64) -> f64 {
    let p = clamp_probability(p);
    let incorrect = total - correct;
    let mut acc = 0.0;
    if correct > 0.0 {
        acc += correct * p.ln();
    }
    if incorrect > 0.0 {
        acc += incorrect * (1.0 - p).ln();
    }
    acc
}
