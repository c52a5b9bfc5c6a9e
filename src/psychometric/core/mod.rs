//! core — value types of the psychometric stack.
//!
//! - [`shape`]: the sigmoid family (`Logistic`, `Weibull`, `Gumbel`).
//! - [`model`]: the immutable [`PsychometricModel`] with evaluation and inversion.
//! - [`levels`]: the validated candidate stimulus set.
//! - [`outcome`]: scored trial responses.
//! - [`accumulator`]: per-level correct/total counts.

pub mod accumulator;
pub mod levels;
pub mod model;
pub mod outcome;
pub mod shape;

pub use self::accumulator::TrialAccumulator;
pub use self::levels::StimulusLevels;
pub use self::model::{PsychometricModel, validate_rates};
pub use self::outcome::TrialOutcome;
pub use self::shape::PsychometricShape;
