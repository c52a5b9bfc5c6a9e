//! Adapter that exposes a user `LogLikelihood` as an `argmin` problem.
//!
//! We convert a *maximization* of a log-likelihood `ℓ(θ)` into a *minimization*
//! problem by defining the cost as `c(θ) = -ℓ(θ)`. The simplex solver needs no
//! gradient, so only `CostFunction` is implemented.
use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        traits::LogLikelihood,
        types::{Cost, Theta},
    },
};
use argmin::core::{CostFunction, Error};

/// Bridges a user `LogLikelihood` to `argmin`'s `CostFunction`.
///
/// - `CostFunction::cost` returns `-ℓ(θ)` (negative log-likelihood).
/// - Infeasible points (`ℓ = -∞`) become `+∞` costs, which the simplex
///   treats as worse than any finite vertex.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = -ℓ(θ)`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the user's `value` via `?`.
    /// - Returns `NonFiniteCost` if the value is `NaN` or `+∞`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if output.is_nan() || output == f64::INFINITY {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `LogLikelihood` and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    struct Quadratic;

    impl LogLikelihood for Quadratic {
        type Data = f64;

        fn value(&self, theta: &Theta, shift: &f64) -> OptResult<f64> {
            if theta[0] < 0.0 {
                return Ok(f64::NEG_INFINITY);
            }
            if theta[0] > 100.0 {
                return Ok(f64::NAN);
            }
            Ok(-(theta[0] - shift).powi(2))
        }

        fn check(&self, _theta: &Theta, _data: &f64) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the sign flip from log-likelihood to cost and the treatment of
    // infeasible and NaN evaluations.
    //
    // Given
    // -----
    // - `ℓ(θ) = -(θ - 2)²`, `-∞` for θ < 0, NaN for θ > 100.
    //
    // Expect
    // ------
    // - cost(3) = 1, cost(-1) = +∞, cost(101) is an error.
    fn cost_negates_loglik_and_maps_infeasible_to_infinity() {
        let model = Quadratic;
        let shift = 2.0;
        let adapter = ArgMinAdapter::new(&model, &shift);

        assert_eq!(adapter.cost(&array![3.0]).expect("finite cost"), 1.0);
        assert_eq!(adapter.cost(&array![-1.0]).expect("infeasible cost"), f64::INFINITY);
        assert!(adapter.cost(&array![101.0]).is_err());
    }
}
