//! Validation helpers for log-likelihood optimization.
//!
//! This module centralizes common consistency checks used across the
//! optimizer interface:
//!
//! - **Option checks**: [`verify_tol_cost`], [`verify_tol_param`],
//!   [`verify_max_iter`], [`verify_simplex_step`] ensure numeric settings
//!   are usable.
//! - **Parameter vectors**: [`validate_theta`] checks length and finiteness
//!   of a candidate `θ`; [`validate_theta_hat`] ensures an estimate exists
//!   and is finite.
//! - **Objective values**: [`validate_value`] checks log-likelihood outputs.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::types::Theta,
};

/// Validate the optional cost tolerance (simplex cost spread).
///
/// - Accepts `None` (the iteration cap is the only stopping rule).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional restart displacement tolerance.
///
/// - Accepts `None` (no confirming restart).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolParam`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_param(tol: Option<f64>) -> OptResult<()> {
    match tol {
        Some(tol) if !tol.is_finite() => {
            Err(OptError::InvalidTolParam { tol, reason: "Tolerance must be finite." })
        }
        Some(tol) if tol <= 0.0 => {
            Err(OptError::InvalidTolParam { tol, reason: "Tolerance must be positive." })
        }
        _ => Ok(()),
    }
}

/// Validate the iteration cap.
///
/// # Errors
/// Returns [`OptError::InvalidMaxIter`] if `max_iter == 0`.
pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate the relative step used to build the initial simplex.
///
/// # Errors
/// Returns [`OptError::InvalidSimplexStep`] if the step is non-finite or ≤ 0.0.
pub fn verify_simplex_step(step: f64) -> OptResult<()> {
    if !step.is_finite() {
        return Err(OptError::InvalidSimplexStep { step, reason: "Step must be finite." });
    }
    if step <= 0.0 {
        return Err(OptError::InvalidSimplexStep { step, reason: "Step must be positive." });
    }
    Ok(())
}

/// Validate a parameter vector against an expected dimension and finiteness.
///
/// # Errors
/// - [`OptError::ThetaLengthMismatch`] if `theta.len() != dim`.
/// - [`OptError::InvalidThetaInput`] for the first non-finite element.
pub fn validate_theta(theta: &Theta, dim: usize) -> OptResult<()> {
    if theta.len() != dim {
        return Err(OptError::ThetaLengthMismatch { expected: dim, actual: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// Accepts only a present vector with all **finite** entries.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that a scalar log-likelihood value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Confirm the cost tolerance accepts `None` and positive values and
    // rejects zero and NaN.
    //
    // Given
    // -----
    // - `None`, `Some(1e-8)`, `Some(0.0)`, `Some(NaN)`.
    //
    // Expect
    // ------
    // - First two `Ok`, last two `InvalidTolCost`.
    fn verify_tol_cost_accepts_positive_and_rejects_degenerate() {
        assert!(verify_tol_cost(None).is_ok());
        assert!(verify_tol_cost(Some(1e-8)).is_ok());
        assert!(matches!(verify_tol_cost(Some(0.0)), Err(OptError::InvalidTolCost { .. })));
        assert!(matches!(verify_tol_cost(Some(f64::NAN)), Err(OptError::InvalidTolCost { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Same contract for the restart displacement tolerance.
    //
    // Given
    // -----
    // - `None`, `Some(1e-3)`, `Some(-1.0)`, `Some(∞)`.
    //
    // Expect
    // ------
    // - First two `Ok`, last two `InvalidTolParam`.
    fn verify_tol_param_accepts_positive_and_rejects_degenerate() {
        assert!(verify_tol_param(None).is_ok());
        assert!(verify_tol_param(Some(1e-3)).is_ok());
        assert!(matches!(verify_tol_param(Some(-1.0)), Err(OptError::InvalidTolParam { .. })));
        assert!(matches!(
            verify_tol_param(Some(f64::INFINITY)),
            Err(OptError::InvalidTolParam { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Check that `validate_theta` reports the first offending coordinate.
    //
    // Given
    // -----
    // - A length-2 vector with an infinite second entry.
    //
    // Expect
    // ------
    // - `InvalidThetaInput { index: 1, .. }`; a length mismatch is reported
    //   before finiteness.
    fn validate_theta_reports_length_then_finiteness() {
        let theta = array![1.0, f64::INFINITY];
        assert!(matches!(
            validate_theta(&theta, 2),
            Err(OptError::InvalidThetaInput { index: 1, .. })
        ));
        assert_eq!(
            validate_theta(&theta, 3),
            Err(OptError::ThetaLengthMismatch { expected: 3, actual: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure `validate_theta_hat` distinguishes missing and non-finite estimates.
    //
    // Given
    // -----
    // - `None` and `Some([NaN])`.
    //
    // Expect
    // ------
    // - `MissingThetaHat` and `InvalidThetaHat` respectively.
    fn validate_theta_hat_rejects_missing_and_nan() {
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
        assert!(matches!(
            validate_theta_hat(Some(array![f64::NAN])),
            Err(OptError::InvalidThetaHat { index: 0, .. })
        ));
    }
}
