//! SharedSelector — a cloneable, thread-safe handle to one selector.
//!
//! The whole [`AdaptiveSelector`] sits behind a single `Mutex`, so each call
//! is atomic with respect to the others. A poisoned lock is recovered: every
//! selector operation either completes or leaves the state untouched.
use crate::psychometric::{
    core::TrialOutcome,
    errors::{PsychometricError, PsychometricResult},
    fitting::FitResult,
    selection::selector::{AdaptiveSelector, SelectorPhase, SessionSummary},
};
use rand::{Rng, rngs::StdRng};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
pub struct SharedSelector<R: Rng = StdRng> {
    inner: Arc<Mutex<AdaptiveSelector<R>>>,
}

impl<R: Rng> Clone for SharedSelector<R> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<R: Rng> SharedSelector<R> {
    pub fn new(selector: AdaptiveSelector<R>) -> Self {
        Self { inner: Arc::new(Mutex::new(selector)) }
    }

    fn lock(&self) -> MutexGuard<'_, AdaptiveSelector<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`AdaptiveSelector::next_stimulus`].
    pub fn next_stimulus(&self) -> PsychometricResult<f64> {
        self.lock().next_stimulus()
    }

    /// See [`AdaptiveSelector::record_outcome`].
    pub fn record_outcome(&self, level: f64, outcome: TrialOutcome) -> PsychometricResult<()> {
        self.lock().record_outcome(level, outcome)
    }

    pub fn current_estimate(&self) -> Option<FitResult> {
        self.lock().current_estimate().cloned()
    }

    pub fn phase(&self) -> SelectorPhase {
        self.lock().phase()
    }

    pub fn trials_presented(&self) -> usize {
        self.lock().trials_presented()
    }

    /// Run `f` with exclusive access to the selector.
    pub fn with<T>(&self, f: impl FnOnce(&AdaptiveSelector<R>) -> T) -> T {
        f(&self.lock())
    }

    /// Finish the session through the last remaining handle.
    ///
    /// # Errors
    /// - [`PsychometricError::OutOfSequence`] if other handles are still alive.
    /// - Anything [`AdaptiveSelector::finish`] returns.
    pub fn finish(self) -> PsychometricResult<SessionSummary> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner).finish(),
            Err(_) => Err(PsychometricError::OutOfSequence {
                reason: "the selector is still shared by other handles",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::psychometric::selection::config::{SelectorConfig, WarmupLength};
    use std::thread;

    #[test]
    // Purpose
    // -------
    // Verify that trials driven from several threads are all accounted for.
    //
    // Given
    // -----
    // - Budget 40, all warmup; four threads each complete 10 trials,
    //   retrying `next_stimulus` while another thread's trial is pending.
    //
    // Expect
    // ------
    // - 40 trials presented and 40 recorded; `finish` is refused while
    //   another handle is alive.
    fn threads_share_one_session() {
        // Arrange
        let cfg = SelectorConfig::new(vec![1.0, 2.0, 3.0], 40)
            .and_then(|c| c.with_warmup(WarmupLength::Trials(40)))
            .expect("valid");
        let shared = SharedSelector::new(AdaptiveSelector::seeded(cfg, 9).expect("valid"));

        // Act
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let handle = shared.clone();
                thread::spawn(move || {
                    let mut done = 0;
                    while done < 10 {
                        if let Ok(level) = handle.next_stimulus() {
                            handle.record_outcome(level, TrialOutcome::Correct).expect("own trial");
                            done += 1;
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("worker should not panic");
        }

        // Assert
        assert_eq!(shared.trials_presented(), 40);
        assert_eq!(shared.with(|s| s.accumulator().total_trials()), 40.0);
        let extra = shared.clone();
        assert!(matches!(
            shared.finish(),
            Err(PsychometricError::OutOfSequence { .. })
        ));
        drop(extra);
    }
}
