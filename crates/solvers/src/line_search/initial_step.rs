use descent_core::constants::SQRT_EPSILON;

use super::ConfigError;

/// How a line search picks its first trial step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitialStep {
    /// Always start from the same step.
    Constant(f64),

    /// Start from the step that would reproduce the last iteration's
    /// first-order decrease.
    FirstOrder(FirstOrder),
}

impl Default for InitialStep {
    fn default() -> Self {
        InitialStep::Constant(1.0)
    }
}

impl InitialStep {
    /// A constant initial step.
    ///
    /// # Errors
    ///
    /// Returns an error if `a0` is not finite and positive.
    pub fn constant(a0: f64) -> Result<Self, ConfigError> {
        validate_step(a0)?;
        Ok(InitialStep::Constant(a0))
    }

    /// A first-order initial step starting from `a0` and never below `a_min`.
    ///
    /// # Errors
    ///
    /// Returns an error if `a0` is not finite and positive, or if `a_min` is
    /// not finite, positive and at most `a0`.
    pub fn first_order(a0: f64, a_min: f64) -> Result<Self, ConfigError> {
        validate_step(a0)?;
        if !a_min.is_finite() || a_min <= 0.0 || a_min > a0 {
            return Err(ConfigError::MinStep);
        }
        Ok(InitialStep::FirstOrder(FirstOrder {
            a0,
            a_min,
            previous: None,
        }))
    }

    /// Returns the largest step this policy will propose.
    #[must_use]
    pub fn a0(&self) -> f64 {
        match self {
            InitialStep::Constant(a0) => *a0,
            InitialStep::FirstOrder(first_order) => first_order.a0,
        }
    }

    /// Proposes the first trial step for a line with origin `(value, slope)`.
    pub fn next(&mut self, value: f64, slope: f64) -> f64 {
        match self {
            InitialStep::Constant(a0) => *a0,
            InitialStep::FirstOrder(first_order) => first_order.next(value, slope),
        }
    }

    /// Forgets any history from earlier searches.
    pub fn reset(&mut self) {
        if let InitialStep::FirstOrder(first_order) = self {
            first_order.previous = None;
        }
    }
}

/// Initial step `α = min(a0, 1.01 · 2(f_k - f_{k-1}) / φ'_{k-1}(0))`,
/// floored at `a_min`.
///
/// The first search after a reset, and any search where the estimate is not
/// finite, starts from `a0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstOrder {
    a0: f64,
    a_min: f64,
    previous: Option<(f64, f64)>,
}

impl Default for FirstOrder {
    fn default() -> Self {
        Self {
            a0: 1.0,
            a_min: SQRT_EPSILON,
            previous: None,
        }
    }
}

impl FirstOrder {
    fn next(&mut self, value: f64, slope: f64) -> f64 {
        let alpha = match self.previous {
            Some((previous_value, previous_slope)) => {
                let estimate = 2.0 * (value - previous_value) / previous_slope;
                self.a0.min(1.01 * estimate).max(self.a_min)
            }
            None => self.a0,
        };

        self.previous = Some((value, slope));

        if alpha.is_finite() { alpha } else { self.a0 }
    }
}

fn validate_step(a0: f64) -> Result<(), ConfigError> {
    if !a0.is_finite() || a0 <= 0.0 {
        return Err(ConfigError::InitialStep);
    }
    Ok(())
}
