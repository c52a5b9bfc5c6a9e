//! optimization — MLE stack, root finding, numerical helpers, and error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting, combining an
//! Argmin-backed log-likelihood optimizer, a bracketed scalar root solver,
//! numerically stable transforms, and a single error/result surface. Callers
//! implement a log-likelihood, choose tolerances, and obtain fitted
//! parameters and diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-likelihoods** `ℓ(θ)`
//!   (`loglik_optimizer`) with a derivative-free simplex and a hard
//!   iteration cap.
//! - Solve scalar monotone equations from a seed (`root_finding`), used for
//!   curve inversion and initial guesses.
//! - Supply shared numerical primitives (`numerical_stability`): a stable
//!   logistic and a clamped binomial log-likelihood kernel.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - All solvers conceptually maximize a log-likelihood `ℓ(θ)` by minimizing
//!   an internal cost `c(θ) = -ℓ(θ)`; user-facing APIs and outcomes are
//!   expressed in terms of `ℓ`.
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw Argmin errors.
//! - This layer does no logging of its own beyond the optional Argmin
//!   observer; higher layers report progress through `tracing`.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;
pub mod root_finding;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_psychometrics::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
    pub use super::root_finding::{RootOptions, SearchDomain, solve_bracketed};
}
