use super::{ConfigError, InitialStep, LineFunction, LineSearch, Step, sufficient_decrease};

/// Goldstein line search.
///
/// Accepts `α` when
///
/// `φ(0) + (1 - c)·α·φ'(0) ≤ φ(α) ≤ φ(0) + c·α·φ'(0)`
///
/// with `0 < c < ½`. Steps that decrease too little are shrunk and steps that
/// decrease "too much" (too short) are expanded, until both a too-long and a
/// too-short step are known; from then on the search bisects between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goldstein {
    c: f64,
    shrink: f64,
    expand: f64,
    max_iters: usize,
    initial_step: InitialStep,
}

impl Default for Goldstein {
    fn default() -> Self {
        Self {
            c: 0.2,
            shrink: 0.5,
            expand: 1.5,
            max_iters: 100,
            initial_step: InitialStep::default(),
        }
    }
}

impl Goldstein {
    /// Creates a Goldstein search.
    ///
    /// # Errors
    ///
    /// Returns an error if `c` is outside `(0, ½)`, `shrink` is outside
    /// `(0, 1)`, or `expand` is not finite and greater than one.
    pub fn new(c: f64, shrink: f64, expand: f64, max_iters: usize) -> Result<Self, ConfigError> {
        if !(c > 0.0 && c < 0.5) {
            return Err(ConfigError::SufficientDecrease);
        }
        if !(shrink > 0.0 && shrink < 1.0) {
            return Err(ConfigError::Shrink);
        }
        if !expand.is_finite() || expand <= 1.0 {
            return Err(ConfigError::Growth);
        }
        Ok(Self {
            c,
            shrink,
            expand,
            max_iters,
            initial_step: InitialStep::default(),
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
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}

impl LineSearch for Goldstein {
    fn search<L: LineFunction>(&mut self, line: &mut L) -> Result<Step, L::Error> {
        let origin = line.origin();
        let (f0, g0) = origin;

        let mut alpha = self.initial_step.next(f0, g0);

        // Largest step known to be too short, smallest known to be too long.
        let mut short: Option<f64> = None;
        let mut long: Option<f64> = None;

        for _ in 0..self.max_iters {
            let value = line.value(alpha)?;

            if !sufficient_decrease(value, alpha, origin, self.c) {
                long = Some(alpha);
                alpha = match short {
                    Some(short) => 0.5 * (short + alpha),
                    None => self.shrink * alpha,
                };
            } else if value < f0 + (1.0 - self.c) * alpha * g0 {
                short = Some(alpha);
                alpha = match long {
                    Some(long) => 0.5 * (alpha + long),
                    None => self.expand * alpha,
                };
            } else {
                return Ok(Step::accepted(alpha));
            }
        }

        // Prefer a step with sufficient decrease.
        Ok(Step::exhausted(short.unwrap_or(alpha)))
    }

    fn reset(&mut self) {
        self.initial_step.reset();
    }
}
