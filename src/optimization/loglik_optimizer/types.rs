//! loglik_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by the
//! log-likelihood optimizer, so the rest of the optimization code can stay
//! agnostic to `ndarray` and Argmin generics.
//!
//! Conventions
//! -----------
//! - `Theta` is treated as a column vector with one entry per free
//!   parameter; for psychometric fits this is `(α, β)`.
//! - `Cost` is the scalar minimized by Argmin, i.e. `c(θ) = -ℓ(θ)`.
//! - This module defines no runtime behavior.
use argmin::solver::neldermead::NelderMead;
use ndarray::Array1;
use std::collections::HashMap;

/// Parameter vector `θ` for log-likelihood optimization.
pub type Theta = Array1<f64>;

/// Scalar objective value used by the optimizer.
///
/// In this crate, this is the cost `c(θ) = -ℓ(θ)` derived from a
/// log-likelihood `ℓ(θ)`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Relative displacement of the non-anchor simplex vertices.
pub const DEFAULT_SIMPLEX_STEP: f64 = 0.05;

/// Absolute displacement used when a coordinate of `θ₀` is exactly zero.
pub const ZERO_COORD_STEP: f64 = 0.00025;

/// Default relative displacement allowed when a converged run is restarted.
pub const DEFAULT_TOL_PARAM: Option<f64> = Some(1e-3);

/// Nelder–Mead simplex solver specialized to this crate's numeric types.
pub type NelderMeadSolver = NelderMead<Theta, Cost>;
