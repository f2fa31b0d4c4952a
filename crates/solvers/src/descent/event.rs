use crate::line_search::Step;

use super::{Solution, Status};

/// Events emitted by the descent loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a, const N: usize> {
    /// The starting point was evaluated.
    Started {
        x: &'a [f64; N],
        value: f64,
        gradient: &'a [f64; N],
    },

    /// An iteration moved to a new iterate.
    Stepped {
        /// Iteration number, starting at 1.
        iter: usize,
        x: &'a [f64; N],
        value: f64,
        gradient: &'a [f64; N],

        /// The step taken along the search direction.
        step: Step,

        /// Stopping status after this iteration.
        status: Status,
    },

    /// The run ended.
    Finished { solution: &'a Solution<N> },
}

impl<const N: usize> Event<'_, N> {
    /// Returns the iterate this event reports.
    #[must_use]
    pub fn x(&self) -> &[f64; N] {
        match self {
            Self::Started { x, .. } | Self::Stepped { x, .. } => *x,
            Self::Finished { solution } => &solution.x,
        }
    }

    /// Returns the objective value at [`Event::x`].
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Started { value, .. } | Self::Stepped { value, .. } => *value,
            Self::Finished { solution } => solution.value,
        }
    }

    /// Returns the gradient at [`Event::x`].
    #[must_use]
    pub fn gradient(&self) -> &[f64; N] {
        match self {
            Self::Started { gradient, .. } | Self::Stepped { gradient, .. } => *gradient,
            Self::Finished { solution } => &solution.gradient,
        }
    }

    /// Returns the iteration count at this event.
    #[must_use]
    pub fn iter(&self) -> usize {
        match self {
            Self::Started { .. } => 0,
            Self::Stepped { iter, .. } => *iter,
            Self::Finished { solution } => solution.iters,
        }
    }
}
