use crate::scalar::{Bracket, Bracketing, Brent, GoldenSection, Minimum};

use super::{InitialStep, LineFunction, LineSearch, Step};

/// The one-dimensional method an [`Exact`] search refines with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refiner {
    Brent(Brent),
    GoldenSection(GoldenSection),
}

impl Default for Refiner {
    fn default() -> Self {
        Refiner::Brent(Brent::default())
    }
}

impl Refiner {
    fn tol(&self) -> f64 {
        match self {
            Refiner::Brent(brent) => brent.tol(),
            Refiner::GoldenSection(golden) => golden.tol(),
        }
    }

    fn interval<F, E>(&self, f: F, a: f64, b: f64) -> Result<Minimum, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        match self {
            Refiner::Brent(brent) => brent.minimize(f, a, b),
            Refiner::GoldenSection(golden) => golden.minimize(f, a, b),
        }
    }

    fn bracket<F, E>(&self, f: F, bracket: &Bracket) -> Result<Minimum, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        match self {
            Refiner::Brent(brent) => brent.minimize_bracket(f, bracket),
            Refiner::GoldenSection(golden) => golden.minimize(f, bracket.a, bracket.c),
        }
    }
}

/// Approximately exact line search: minimizes `φ` along the ray.
///
/// When the initial step already increases `φ`, the minimum lies in
/// `(0, a0)` and is refined there directly. Otherwise the search brackets
/// the minimum beyond `a0` and refines the bracket. Only values are
/// evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Exact {
    bracketing: Bracketing,
    refiner: Refiner,
    initial_step: InitialStep,
}

impl Exact {
    #[must_use]
    pub fn new(bracketing: Bracketing, refiner: Refiner) -> Self {
        Self {
            bracketing,
            refiner,
            initial_step: InitialStep::default(),
        }
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
    pub fn bracketing(&self) -> &Bracketing {
        &self.bracketing
    }

    #[must_use]
    pub fn refiner(&self) -> &Refiner {
        &self.refiner
    }
}

impl LineSearch for Exact {
    fn search<L: LineFunction>(&mut self, line: &mut L) -> Result<Step, L::Error> {
        let (f0, g0) = line.origin();
        let a0 = self.initial_step.next(f0, g0);

        let mut phi = |alpha: f64| {
            if alpha == 0.0 {
                Ok(f0)
            } else {
                line.value(alpha)
            }
        };

        let minimum = if phi(a0)? >= f0 {
            self.refiner.interval(&mut phi, 0.0, a0)?
        } else {
            let bracket = self.bracketing.bracket(&mut phi, 0.0, a0)?;
            if !bracket.bracketed {
                return Ok(Step::exhausted(best_of(&bracket)));
            }
            self.refiner.bracket(&mut phi, &bracket)?
        };

        let smallest = self.refiner.tol();
        if !minimum.x.is_finite() || minimum.x < smallest {
            return Ok(Step::exhausted(smallest));
        }

        Ok(if minimum.converged {
            Step::accepted(minimum.x)
        } else {
            Step::exhausted(minimum.x)
        })
    }

    fn reset(&mut self) {
        self.initial_step.reset();
    }
}

/// Returns the positive abscissa of the bracket with the lowest value.
fn best_of(bracket: &Bracket) -> f64 {
    [
        (bracket.a, bracket.fa),
        (bracket.b, bracket.fb),
        (bracket.c, bracket.fc),
    ]
    .into_iter()
    .filter(|&(x, _)| x > 0.0)
    .fold((bracket.c, bracket.fc), |best, point| {
        if point.1 < best.1 { point } else { best }
    })
    .0
}
