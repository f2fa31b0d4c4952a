use crate::{
    direction::{Bfgs, ConjugateGradient, Lbfgs, SteepestDescent, Strategy},
    line_search::{Policy, StrongWolfe},
    stop::Criteria,
};

/// Configuration for the descent loop.
///
/// Each part is validated when it is built, so any `Config` is runnable.
/// `Config` is plain data: [`super::minimize`] works on private copies of the
/// strategies and never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    line_search: Policy,
    direction: Strategy,
    criteria: Criteria,
}

impl Default for Config {
    fn default() -> Self {
        Self::bfgs()
    }
}

impl Config {
    #[must_use]
    pub fn new(line_search: Policy, direction: Strategy, criteria: Criteria) -> Self {
        Self {
            line_search,
            direction,
            criteria,
        }
    }

    /// Steepest descent with a strong Wolfe line search.
    #[must_use]
    pub fn gradient_descent() -> Self {
        Self::new(
            StrongWolfe::default().into(),
            SteepestDescent.into(),
            Criteria::default(),
        )
    }

    /// Nonlinear conjugate gradient (FR-PR with restarts) with a strong Wolfe
    /// line search using `c2 = 0.1`.
    #[must_use]
    pub fn conjugate_gradient() -> Self {
        Self::new(
            StrongWolfe::for_conjugate_gradient().into(),
            ConjugateGradient::default().into(),
            Criteria::default(),
        )
    }

    /// BFGS with a strong Wolfe line search.
    #[must_use]
    pub fn bfgs() -> Self {
        Self::new(
            StrongWolfe::default().into(),
            Bfgs::default().into(),
            Criteria::default(),
        )
    }

    /// L-BFGS with ten stored pairs and a strong Wolfe line search.
    #[must_use]
    pub fn lbfgs() -> Self {
        Self::new(
            StrongWolfe::default().into(),
            Lbfgs::default().into(),
            Criteria::default(),
        )
    }

    #[must_use]
    pub fn with_line_search(self, line_search: impl Into<Policy>) -> Self {
        Self {
            line_search: line_search.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_direction(self, direction: impl Into<Strategy>) -> Self {
        Self {
            direction: direction.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_criteria(self, criteria: Criteria) -> Self {
        Self { criteria, ..self }
    }

    #[must_use]
    pub fn line_search(&self) -> &Policy {
        &self.line_search
    }

    #[must_use]
    pub fn direction(&self) -> &Strategy {
        &self.direction
    }

    #[must_use]
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }
}
