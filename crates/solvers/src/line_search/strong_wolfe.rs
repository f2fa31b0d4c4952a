use descent_core::constants::{DEFAULT_TOL, PHI};

use super::{
    ConfigError, FirstOrder, InitialStep, LineFunction, LineSearch, Step,
    interpolate::{Trial, interpolate},
    sufficient_decrease,
};

/// Line search for the strong Wolfe conditions.
///
/// An accepted step `α` satisfies
///
/// - sufficient decrease: `φ(α) ≤ φ(0) + c1·α·φ'(0)`
/// - strong curvature: `|φ'(α)| ≤ c2·|φ'(0)|`
///
/// with `0 < c1 < c2 < 1`.
///
/// The bracketing phase grows the trial step geometrically, up to `a_max`,
/// until either a step is accepted or an interval known to contain an
/// acceptable step is found. The zoom phase then narrows that interval with
/// safeguarded cubic or quadratic interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrongWolfe {
    c1: f64,
    c2: f64,
    initial_step: InitialStep,
    a_max: f64,
    growth: f64,
    max_bracket_iters: usize,
    max_zoom_iters: usize,
    tol: f64,
}

impl Default for StrongWolfe {
    fn default() -> Self {
        Self {
            c1: 1e-4,
            c2: 0.9,
            initial_step: InitialStep::default(),
            a_max: 100.0,
            growth: PHI,
            max_bracket_iters: 20,
            max_zoom_iters: 100,
            tol: DEFAULT_TOL,
        }
    }
}

impl StrongWolfe {
    /// Creates a search with the given Wolfe constants and default settings
    /// otherwise.
    ///
    /// Use `c2 = 0.9` for quasi-Newton directions and a smaller value, such as
    /// `0.1`, for conjugate gradient.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < c1 < c2 < 1`.
    pub fn new(c1: f64, c2: f64) -> Result<Self, ConfigError> {
        if !(0.0 < c1 && c1 < c2 && c2 < 1.0) {
            return Err(ConfigError::WolfeConstants);
        }
        Ok(Self {
            c1,
            c2,
            ..Self::default()
        })
    }

    /// Settings suited to nonlinear conjugate gradient: `c2 = 0.1` and a
    /// first-order initial step.
    #[must_use]
    pub fn for_conjugate_gradient() -> Self {
        Self {
            c2: 0.1,
            initial_step: InitialStep::FirstOrder(FirstOrder::default()),
            ..Self::default()
        }
    }

    /// Sets the initial-step policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy's initial step is not below `a_max`.
    pub fn with_initial_step(self, initial_step: InitialStep) -> Result<Self, ConfigError> {
        if initial_step.a0() >= self.a_max {
            return Err(ConfigError::MaxStep);
        }
        Ok(Self {
            initial_step,
            ..self
        })
    }

    /// Sets the largest step the bracketing phase will try.
    ///
    /// # Errors
    ///
    /// Returns an error if `a_max` is not finite or not above the initial step.
    pub fn with_max_step(self, a_max: f64) -> Result<Self, ConfigError> {
        if !a_max.is_finite() || a_max <= self.initial_step.a0() {
            return Err(ConfigError::MaxStep);
        }
        Ok(Self { a_max, ..self })
    }

    /// Sets the factor by which the bracketing phase grows the trial step.
    ///
    /// # Errors
    ///
    /// Returns an error if `growth` is not finite or not greater than one.
    pub fn with_growth(self, growth: f64) -> Result<Self, ConfigError> {
        if !growth.is_finite() || growth <= 1.0 {
            return Err(ConfigError::Growth);
        }
        Ok(Self { growth, ..self })
    }

    /// Sets the iteration budgets of the bracketing and zoom phases.
    #[must_use]
    pub fn with_max_iters(self, max_bracket_iters: usize, max_zoom_iters: usize) -> Self {
        Self {
            max_bracket_iters,
            max_zoom_iters,
            ..self
        }
    }

    /// Sets the interval width below which zoom gives up.
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` is not finite and positive.
    pub fn with_tol(self, tol: f64) -> Result<Self, ConfigError> {
        if !tol.is_finite() || tol <= 0.0 {
            return Err(ConfigError::Tol);
        }
        Ok(Self { tol, ..self })
    }

    #[must_use]
    pub fn c1(&self) -> f64 {
        self.c1
    }

    #[must_use]
    pub fn c2(&self) -> f64 {
        self.c2
    }

    #[must_use]
    pub fn initial_step(&self) -> &InitialStep {
        &self.initial_step
    }

    #[must_use]
    pub fn a_max(&self) -> f64 {
        self.a_max
    }

    #[must_use]
    pub fn growth(&self) -> f64 {
        self.growth
    }

    #[must_use]
    pub fn max_bracket_iters(&self) -> usize {
        self.max_bracket_iters
    }

    #[must_use]
    pub fn max_zoom_iters(&self) -> usize {
        self.max_zoom_iters
    }

    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }

    fn curvature(&self, slope: f64, origin: (f64, f64)) -> bool {
        slope.abs() <= self.c2 * origin.1.abs()
    }

    /// Narrows `[lo, hi]`, where `lo` satisfies sufficient decrease with the
    /// lowest value seen and `lo.slope · (hi.alpha - lo.alpha) < 0`.
    fn zoom<L: LineFunction>(
        &self,
        line: &mut L,
        mut lo: Trial,
        mut hi: Trial,
    ) -> Result<Step, L::Error> {
        let origin = line.origin();
        let mut last = lo.alpha.max(hi.alpha);

        for _ in 0..self.max_zoom_iters {
            if (hi.alpha - lo.alpha).abs() < self.tol {
                break;
            }

            let alpha = interpolate(&lo, &hi);
            let (value, slope) = line.value_and_slope(alpha)?;
            let trial = Trial {
                alpha,
                value,
                slope,
            };
            last = alpha;

            if !sufficient_decrease(value, alpha, origin, self.c1) || value >= lo.value {
                hi = trial;
                continue;
            }

            if self.curvature(slope, origin) {
                return Ok(Step::accepted(alpha));
            }

            if slope * (hi.alpha - lo.alpha) >= 0.0 {
                hi = lo;
            }
            lo = trial;
        }

        if lo.alpha > 0.0 {
            Ok(Step::exhausted(lo.alpha))
        } else {
            Ok(Step::exhausted(last))
        }
    }
}

impl LineSearch for StrongWolfe {
    fn search<L: LineFunction>(&mut self, line: &mut L) -> Result<Step, L::Error> {
        let origin = line.origin();
        let (f0, g0) = origin;

        let mut alpha = self.initial_step.next(f0, g0).min(self.a_max);

        if !(g0 < 0.0) {
            return Ok(Step::exhausted(alpha.min(self.tol)));
        }

        let mut previous = Trial {
            alpha: 0.0,
            value: f0,
            slope: g0,
        };

        for iter in 0..self.max_bracket_iters {
            let (value, slope) = line.value_and_slope(alpha)?;
            let trial = Trial {
                alpha,
                value,
                slope,
            };

            if !sufficient_decrease(value, alpha, origin, self.c1)
                || !slope.is_finite()
                || (iter > 0 && value >= previous.value)
            {
                return self.zoom(line, previous, trial);
            }

            if self.curvature(slope, origin) {
                return Ok(Step::accepted(alpha));
            }

            if slope >= 0.0 {
                return self.zoom(line, trial, previous);
            }

            if alpha >= self.a_max {
                return Ok(Step::exhausted(alpha));
            }

            previous = trial;
            alpha = (self.growth * alpha).min(self.a_max);
        }

        // Out of bracketing budget: report the last trial.
        if previous.alpha > 0.0 {
            Ok(Step::exhausted(previous.alpha))
        } else {
            Ok(Step::exhausted(alpha))
        }
    }

    fn reset(&mut self) {
        self.initial_step.reset();
    }
}
