//! Functional form of the psychometric curve.
//!
//! The shape selects the sigmoid `F` in
//! `p(x) = γ + (1 − γ − λ) · F(x; α, β)`:
//! - `Logistic`: `F = 1 / (1 + exp(−β (x − α)))`, defined on all of ℝ.
//! - `Weibull`: `F = 1 − exp(−(x / α)^β)`, defined for `x > 0`, `α > 0`, `β > 0`.
//! - `Gumbel`: `F = 1 − exp(−10^(β (x − α)))`, the log-scale Weibull.
use crate::psychometric::errors::PsychometricError;
use std::{fmt, str::FromStr};

/// Sigmoid family used by a [`PsychometricModel`](super::model::PsychometricModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PsychometricShape {
    #[default]
    Logistic,
    Weibull,
    Gumbel,
}

impl PsychometricShape {
    /// Lower-case name, the same text [`FromStr`] accepts.
    pub fn name(self) -> &'static str {
        match self {
            PsychometricShape::Logistic => "logistic",
            PsychometricShape::Weibull => "weibull",
            PsychometricShape::Gumbel => "gumbel",
        }
    }

    /// `true` if the curve is only defined for strictly positive stimuli and Alpha.
    pub fn requires_positive_domain(self) -> bool {
        matches!(self, PsychometricShape::Weibull)
    }
}

impl fmt::Display for PsychometricShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PsychometricShape {
    type Err = PsychometricError;

    /// Parse a shape name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    /// - [`PsychometricError::UnknownShape`] for any other name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logistic" => Ok(PsychometricShape::Logistic),
            "weibull" => Ok(PsychometricShape::Weibull),
            "gumbel" => Ok(PsychometricShape::Gumbel),
            _ => Err(PsychometricError::UnknownShape { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify case-insensitive parsing and that unknown names are rejected
    // rather than defaulted.
    //
    // Given
    // -----
    // - "Logistic", " WEIBULL ", "gumbel", and "probit".
    //
    // Expect
    // ------
    // - The three known shapes; `UnknownShape` for "probit".
    fn from_str_is_case_insensitive_and_strict() {
        assert_eq!("Logistic".parse::<PsychometricShape>(), Ok(PsychometricShape::Logistic));
        assert_eq!(" WEIBULL ".parse::<PsychometricShape>(), Ok(PsychometricShape::Weibull));
        assert_eq!("gumbel".parse::<PsychometricShape>(), Ok(PsychometricShape::Gumbel));
        assert_eq!(
            "probit".parse::<PsychometricShape>(),
            Err(PsychometricError::UnknownShape { name: "probit".to_string() })
        );
    }
}
