/// Whether a line search met its acceptance conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The step satisfies the search's acceptance conditions.
    Accepted,

    /// The iteration budget ran out or the interval collapsed; the step is
    /// the best available but its conditions may not hold.
    Exhausted,
}

/// A step length produced by a line search. `alpha` is always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub alpha: f64,
    pub status: StepStatus,
}

impl Step {
    #[must_use]
    pub fn accepted(alpha: f64) -> Self {
        Self {
            alpha,
            status: StepStatus::Accepted,
        }
    }

    #[must_use]
    pub fn exhausted(alpha: f64) -> Self {
        Self {
            alpha,
            status: StepStatus::Exhausted,
        }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.status == StepStatus::Accepted
    }
}
