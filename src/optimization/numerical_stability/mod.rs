//! numerical_stability — guarded transforms shared by models and optimizers.
//!
//! Purpose
//! -------
//! Keep the logistic link and the binomial log-likelihood kernel in a
//! well-conditioned `f64` regime: no overflow in `exp`, no `ln(0)`.
//!
//! Conventions
//! -----------
//! - Functions here are pure and total on finite inputs; they never return
//!   `NaN` for finite arguments.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{PROB_EPS, binomial_log_term, clamp_probability, safe_logistic};

pub mod prelude {
    pub use super::transformations::{
        PROB_EPS, binomial_log_term, clamp_probability, safe_logistic,
    };
}
