//! Stopping criteria for iterative descent.
//!
//! [`Stopping`] is a small state machine: it starts [`Status::Running`] and
//! moves to a terminal status the first time a test passes, then stays there
//! until [`Stopping::reset`].
//!
//! By default any single passing test stops the run. With
//! [`Combination::All`] every enabled test must pass on the same iteration.

use descent_core::{constants::DEFAULT_TOL, vector};
use thiserror::Error;

/// Why an optimization stopped, or that it has not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,

    /// The relative change in `f` fell below `f_tol`.
    ConvergedF,

    /// The step length fell below `x_tol`.
    ConvergedX,

    /// The gradient norm fell below `g_tol`.
    ConvergedG,

    /// The iteration limit was reached.
    MaxIterations,
}

impl Status {
    #[must_use]
    pub fn is_running(self) -> bool {
        self == Status::Running
    }

    /// Returns whether a convergence test, as opposed to the iteration
    /// limit, ended the run.
    #[must_use]
    pub fn is_converged(self) -> bool {
        matches!(
            self,
            Status::ConvergedF | Status::ConvergedX | Status::ConvergedG
        )
    }
}

/// How the convergence tests combine.
///
/// A test is enabled when its tolerance is positive. The iteration limit is
/// never combined: it always ends the run on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combination {
    /// Stop as soon as any enabled test passes.
    #[default]
    Any,

    /// Stop only when every enabled test passes on the same iteration.
    ///
    /// The reported status is that of the first enabled test, in the order
    /// gradient, `f`, `x`. With no test enabled the run ends only at the
    /// iteration limit.
    All,
}

/// Thresholds checked once per iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criteria {
    max_iters: usize,
    f_tol: f64,
    x_tol: f64,
    g_tol: f64,
    combination: Combination,
}

/// Errors that can occur when validating stopping criteria.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("f_tol must be finite and non-negative")]
    FTol,

    #[error("x_tol must be finite and non-negative")]
    XTol,

    #[error("g_tol must be finite and non-negative")]
    GTol,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            max_iters: 1000,
            f_tol: DEFAULT_TOL,
            x_tol: DEFAULT_TOL,
            g_tol: DEFAULT_TOL,
            combination: Combination::Any,
        }
    }
}

impl Criteria {
    /// Creates validated criteria.
    ///
    /// A tolerance of zero disables its test.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite.
    pub fn new(max_iters: usize, f_tol: f64, x_tol: f64, g_tol: f64) -> Result<Self, ConfigError> {
        if !f_tol.is_finite() || f_tol < 0.0 {
            return Err(ConfigError::FTol);
        }
        if !x_tol.is_finite() || x_tol < 0.0 {
            return Err(ConfigError::XTol);
        }
        if !g_tol.is_finite() || g_tol < 0.0 {
            return Err(ConfigError::GTol);
        }

        Ok(Self {
            max_iters,
            f_tol,
            x_tol,
            g_tol,
            combination: Combination::Any,
        })
    }

    /// Returns a copy with a different iteration limit.
    #[must_use]
    pub fn with_max_iters(self, max_iters: usize) -> Self {
        Self { max_iters, ..self }
    }

    /// Returns a copy that combines the convergence tests with `combination`.
    #[must_use]
    pub fn with_combination(self, combination: Combination) -> Self {
        Self {
            combination,
            ..self
        }
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    #[must_use]
    pub fn f_tol(&self) -> f64 {
        self.f_tol
    }

    #[must_use]
    pub fn x_tol(&self) -> f64 {
        self.x_tol
    }

    #[must_use]
    pub fn g_tol(&self) -> f64 {
        self.g_tol
    }

    #[must_use]
    pub fn combination(&self) -> Combination {
        self.combination
    }

    /// Applies the combination rule to one round of test outcomes, given in
    /// the order gradient, `f`, `x`.
    fn decide(&self, passed: [bool; 3]) -> Option<Status> {
        let tests = [
            (self.g_tol > 0.0, passed[0], Status::ConvergedG),
            (self.f_tol > 0.0, passed[1], Status::ConvergedF),
            (self.x_tol > 0.0, passed[2], Status::ConvergedX),
        ];
        let mut enabled = tests.iter().filter(|(enabled, ..)| *enabled);

        match self.combination {
            Combination::Any => enabled
                .find(|(_, passed, _)| *passed)
                .map(|&(.., status)| status),
            Combination::All => {
                let (.., first) = *enabled.clone().next()?;
                enabled.all(|(_, passed, _)| *passed).then_some(first)
            }
        }
    }
}

/// The quantities measured on the last iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// `|f_new - f_old|`.
    pub f_change: f64,

    /// `‖x_new - x_old‖`.
    pub x_change: f64,

    /// `‖∇f(x_new)‖`.
    pub g_norm: f64,
}

/// Stopping-state machine for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Stopping {
    criteria: Criteria,
    iters: usize,
    status: Status,
    progress: Option<Progress>,
}

impl Stopping {
    #[must_use]
    pub fn new(criteria: Criteria) -> Self {
        Self {
            criteria,
            iters: 0,
            status: Status::Running,
            progress: None,
        }
    }

    /// Returns to `Running` with no iterations counted.
    pub fn reset(&mut self) {
        self.iters = 0;
        self.status = Status::Running;
        self.progress = None;
    }

    /// Checks the starting gradient before any iteration.
    ///
    /// The `f` and `x` tests need a previous iterate, so they count as not
    /// passed here.
    pub fn start<const N: usize>(&mut self, gradient: &[f64; N]) -> Status {
        self.reset();
        let small_gradient = vector::norm(gradient) < self.criteria.g_tol;
        if let Some(status) = self.criteria.decide([small_gradient, false, false]) {
            self.status = status;
        } else if self.criteria.max_iters == 0 {
            self.status = Status::MaxIterations;
        }
        self.status
    }

    /// Records one iteration that moved from `(x_old, f_old)` to
    /// `(x_new, f_new)` with gradient `gradient`, and returns the new status.
    ///
    /// Tests run in order: gradient norm, relative change in `f`
    /// (`|f_new - f_old| < f_tol·|f_old|`), step length, iteration count.
    /// Once terminal, the status no longer changes.
    pub fn update<const N: usize>(
        &mut self,
        x_old: &[f64; N],
        x_new: &[f64; N],
        f_old: f64,
        f_new: f64,
        gradient: &[f64; N],
    ) -> Status {
        if !self.status.is_running() {
            return self.status;
        }

        self.iters += 1;

        let progress = Progress {
            f_change: (f_new - f_old).abs(),
            x_change: vector::norm(&vector::sub(x_new, x_old)),
            g_norm: vector::norm(gradient),
        };
        self.progress = Some(progress);

        let criteria = &self.criteria;
        let passed = [
            progress.g_norm < criteria.g_tol,
            progress.f_change < criteria.f_tol * f_old.abs(),
            progress.x_change < criteria.x_tol,
        ];
        self.status = match criteria.decide(passed) {
            Some(status) => status,
            None if self.iters >= criteria.max_iters => Status::MaxIterations,
            None => Status::Running,
        };

        self.status
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn iters(&self) -> usize {
        self.iters
    }

    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        self.progress
    }

    #[must_use]
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }
}
