//! fitting — maximum-likelihood estimation of psychometric parameters.
//!
//! - [`likelihood`]: validated count data and the binomial log-likelihood.
//! - [`initial_guess`]: the (α₀, β₀) starting point.
//! - [`fitter`]: [`LikelihoodFitter`] and its [`FitResult`].

pub mod fitter;
pub mod initial_guess;
pub mod likelihood;

pub use self::fitter::{FitResult, LikelihoodFitter};
pub use self::likelihood::{BinomialLikelihood, FitData};
