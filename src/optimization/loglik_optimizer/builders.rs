//! loglik_optimizer::builders — Nelder–Mead solver construction helpers.
//!
//! Purpose
//! -------
//! Build the derivative-free simplex solver used by the log-likelihood
//! optimizer. These helpers hide Argmin's generic wiring and apply
//! crate-level options (initial simplex step, cost tolerance) so that
//! higher-level code can request a configured solver without touching
//! Argmin-specific types.
//!
//! Invariants & assumptions
//! ------------------------
//! - The initial simplex has `θ₀.len() + 1` vertices: `θ₀` itself and one
//!   vertex per coordinate, displaced by `simplex_step · θ₀[i]`, or by
//!   [`ZERO_COORD_STEP`] when that coordinate is exactly zero.
//! - The iteration cap is left to the runner; these builders are
//!   side-effect free.
//!
//! Testing notes
//! -------------
//! - Unit tests verify the simplex geometry and tolerance wiring; full
//!   solves are exercised through `maximize`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{NelderMeadSolver, Theta, ZERO_COORD_STEP},
    },
};

/// build_nelder_mead — construct a Nelder–Mead solver around `θ₀`.
///
/// Parameters
/// ----------
/// - `theta0`: `&Theta`
///   Anchor vertex of the initial simplex.
/// - `opts`: `&MLEOptions`
///   Source of `simplex_step` and the optional `tols.tol_cost`, which is
///   wired into Argmin's `with_sd_tolerance`.
///
/// Returns
/// -------
/// `OptResult<NelderMeadSolver>`
///   - `Ok(solver)` ready to be handed to the runner.
///   - `Err(e)` if Argmin rejects the tolerance.
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`)
///   Returned when `with_sd_tolerance` rejects the tolerance.
pub fn build_nelder_mead(theta0: &Theta, opts: &MLEOptions) -> OptResult<NelderMeadSolver> {
    let simplex = initial_simplex(theta0, opts.simplex_step);
    let mut solver = NelderMeadSolver::new(simplex);
    if let Some(tol) = opts.tols.tol_cost {
        solver = solver.with_sd_tolerance(tol)?;
    }
    Ok(solver)
}

/// Vertices of the starting simplex around `theta0`.
pub fn initial_simplex(theta0: &Theta, step: f64) -> Vec<Theta> {
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for i in 0..theta0.len() {
        let mut vertex = theta0.clone();
        vertex[i] = if vertex[i] == 0.0 { ZERO_COORD_STEP } else { vertex[i] * (1.0 + step) };
        vertices.push(vertex);
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::Tolerances;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Geometry of the initial simplex (vertex count, displacements,
    //   zero-coordinate handling).
    // - Construction of the solver with and without a cost tolerance.
    //
    // They intentionally DO NOT cover:
    // - End-to-end executor behavior, which is tested through `maximize`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the simplex has one extra vertex per coordinate, displaced
    // relatively, with an absolute nudge for zero coordinates.
    //
    // Given
    // -----
    // - `θ₀ = (7, 0)` and a 5 % step.
    //
    // Expect
    // ------
    // - Vertices `(7, 0)`, `(7.35, 0)`, `(7, 0.00025)`.
    fn initial_simplex_displaces_each_coordinate() {
        // Arrange
        let theta0 = array![7.0, 0.0];

        // Act
        let simplex = initial_simplex(&theta0, 0.05);

        // Assert
        assert_eq!(simplex.len(), 3);
        assert_eq!(simplex[0], theta0);
        assert_relative_eq!(simplex[1][0], 7.35, epsilon = 1e-12);
        assert_eq!(simplex[1][1], 0.0);
        assert_eq!(simplex[2][0], 7.0);
        assert_eq!(simplex[2][1], ZERO_COORD_STEP);
    }

    #[test]
    // Purpose
    // -------
    // Ensure the builder succeeds both with and without a cost tolerance.
    //
    // Given
    // -----
    // - Default options and options with `tol_cost = None`.
    //
    // Expect
    // ------
    // - `build_nelder_mead` returns `Ok(_)` in both cases.
    fn build_nelder_mead_accepts_present_and_absent_tolerance() {
        let theta0 = array![1.0, 1.0];
        assert!(build_nelder_mead(&theta0, &MLEOptions::default()).is_ok());

        let tols = Tolerances::new(None, 50).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, 0.1, false).expect("MLEOptions should be valid");
        assert!(build_nelder_mead(&theta0, &opts).is_ok());
    }
}
