use descent_core::constants::DEFAULT_TOL;

use super::{ConfigError, InitialStep, LineFunction, LineSearch, Step, sufficient_decrease};

/// Armijo backtracking.
///
/// Shrinks the trial step by `rho` until `φ(α) ≤ φ(0) + c·α·φ'(0)`. Only
/// values are evaluated, never slopes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backtracking {
    c: f64,
    rho: f64,
    a_min: f64,
    initial_step: InitialStep,
}

impl Default for Backtracking {
    fn default() -> Self {
        Self {
            c: 1e-4,
            rho: 0.5,
            a_min: DEFAULT_TOL,
            initial_step: InitialStep::default(),
        }
    }
}

impl Backtracking {
    /// Creates a backtracking search.
    ///
    /// # Errors
    ///
    /// Returns an error if `c` or `rho` is outside `(0, 1)`, or if `a_min` is
    /// not finite and positive.
    pub fn new(c: f64, rho: f64, a_min: f64) -> Result<Self, ConfigError> {
        if !(c > 0.0 && c < 1.0) {
            return Err(ConfigError::SufficientDecrease);
        }
        if !(rho > 0.0 && rho < 1.0) {
            return Err(ConfigError::Shrink);
        }
        if !a_min.is_finite() || a_min <= 0.0 {
            return Err(ConfigError::MinStep);
        }
        Ok(Self {
            c,
            rho,
            a_min,
            ..Self::default()
        })
    }

    /// Sets the initial-step policy.
    #[must_use]
    pub fn with_initial_step(self, initial_step: InitialStep) -> Self {
        Self {
            initial_step,
            ..self
        }
    }

    #[must_use]
    pub fn c(&self) -> f64 {
        self.c
    }

    #[must_use]
    pub fn rho(&self) -> f64 {
        self.rho
    }

    #[must_use]
    pub fn a_min(&self) -> f64 {
        self.a_min
    }
}

impl LineSearch for Backtracking {
    fn search<L: LineFunction>(&mut self, line: &mut L) -> Result<Step, L::Error> {
        let origin = line.origin();
        let mut alpha = self.initial_step.next(origin.0, origin.1);

        loop {
            let value = line.value(alpha)?;
            if sufficient_decrease(value, alpha, origin, self.c) {
                return Ok(Step::accepted(alpha));
            }

            let next = self.rho * alpha;
            if next < self.a_min {
                return Ok(Step::exhausted(alpha));
            }
            alpha = next;
        }
    }

    fn reset(&mut self) {
        self.initial_step.reset();
    }
}
