//! rust_psychometrics — psychometric function fitting and adaptive threshold testing.
//!
//! Purpose
//! -------
//! Serve as the crate root for estimating a subject's psychometric function
//! (threshold α, slope β) from forced-choice responses and for choosing each
//! next stimulus adaptively (Psi method with a repeat guard).
//!
//! Key behaviors
//! -------------
//! - [`psychometric`]: models, maximum-likelihood fitting, and the adaptive
//!   selector state machine.
//! - [`optimization`]: the Nelder–Mead log-likelihood maximizer, bracketed
//!   Brent root finding, and numerically stable helpers, all on `argmin`.
//! - [`simulation`]: the presenter seam, a virtual observer, and a host trial
//!   loop for offline sessions.
//!
//! Conventions
//! -----------
//! - Fallible operations return `Result` with the layer's error type
//!   (`PsychometricError`, `OptError`); nothing panics on bad input.
//! - Randomness is always injected (`rand::Rng`), so seeded sessions are
//!   reproducible.
//! - Diagnostics go through `tracing`; install a subscriber to see them.
//!
//! Example
//! -------
//! ```
//! use rust_psychometrics::psychometric::prelude::*;
//! use rust_psychometrics::simulation::{VirtualObserver, run_session};
//!
//! let config = SelectorConfig::new((0..15).map(f64::from).collect(), 120)?
//!     .with_warmup(WarmupLength::Trials(5))?;
//! let selector = AdaptiveSelector::seeded(config, 42)?;
//! let subject = PsychometricModel::new(5.0, 1.0, 0.5, 0.01, PsychometricShape::Logistic)?;
//! let mut observer = VirtualObserver::seeded(subject, 7);
//! let report = run_session(selector, &mut observer)?;
//! assert_eq!(report.trials.len(), 120);
//! # Ok::<(), PsychometricError>(())
//! ```

pub mod optimization;
pub mod psychometric;
pub mod simulation;
