//! Response outcome of a single trial.

/// Scored response to one presentation.
///
/// `Tie` covers forced-choice trials where both alternatives were equal
/// (e.g. a null stimulus) and earns partial credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrialOutcome {
    Correct,
    Incorrect,
    Tie,
}

impl TrialOutcome {
    /// Amount added to the correct count for this outcome.
    pub fn credit(self, tie_credit: f64) -> f64 {
        match self {
            TrialOutcome::Correct => 1.0,
            TrialOutcome::Incorrect => 0.0,
            TrialOutcome::Tie => tie_credit,
        }
    }
}

impl From<bool> for TrialOutcome {
    fn from(correct: bool) -> Self {
        if correct { TrialOutcome::Correct } else { TrialOutcome::Incorrect }
    }
}
