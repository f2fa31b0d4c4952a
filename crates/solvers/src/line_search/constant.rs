use super::{ConfigError, InitialStep, LineFunction, LineSearch, Step};

/// Takes the same step every time without evaluating the function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    alpha: f64,
}

impl Default for Constant {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

impl Constant {
    /// Creates a constant step.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is not finite and positive.
    pub fn new(alpha: f64) -> Result<Self, ConfigError> {
        InitialStep::constant(alpha)?;
        Ok(Self { alpha })
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl LineSearch for Constant {
    fn search<L: LineFunction>(&mut self, _line: &mut L) -> Result<Step, L::Error> {
        Ok(Step::accepted(self.alpha))
    }
}
