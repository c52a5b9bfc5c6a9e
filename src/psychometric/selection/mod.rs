//! selection — adaptive stimulus selection (Psi method with a repeat guard).
//!
//! - [`config`]: validated [`SelectorConfig`] and [`WarmupLength`].
//! - [`selector`]: the [`AdaptiveSelector`] state machine and its
//!   [`SessionSummary`].
//! - [`shared`]: [`SharedSelector`], a mutex-guarded handle for hosts that
//!   drive a session from several threads.

pub mod config;
pub mod selector;
pub mod shared;

pub use self::config::{SelectorConfig, WarmupLength};
pub use self::selector::{
    AdaptiveSelector, FitRecord, SelectionReason, SelectorPhase, SessionSummary,
};
pub use self::shared::SharedSelector;
