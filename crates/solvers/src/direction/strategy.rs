use super::{Bfgs, ConjugateGradient, Direction, Lbfgs, SteepestDescent};

/// Runtime choice of direction strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    SteepestDescent(SteepestDescent),
    ConjugateGradient(ConjugateGradient),
    Bfgs(Bfgs),
    Lbfgs(Lbfgs),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Bfgs(Bfgs::default())
    }
}

impl Direction for Strategy {
    fn initialize<const N: usize>(&mut self, x: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        match self {
            Strategy::SteepestDescent(direction) => direction.initialize(x, gradient),
            Strategy::ConjugateGradient(direction) => direction.initialize(x, gradient),
            Strategy::Bfgs(direction) => direction.initialize(x, gradient),
            Strategy::Lbfgs(direction) => direction.initialize(x, gradient),
        }
    }

    fn next<const N: usize>(&mut self, x: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        match self {
            Strategy::SteepestDescent(direction) => direction.next(x, gradient),
            Strategy::ConjugateGradient(direction) => direction.next(x, gradient),
            Strategy::Bfgs(direction) => direction.next(x, gradient),
            Strategy::Lbfgs(direction) => direction.next(x, gradient),
        }
    }
}

impl From<SteepestDescent> for Strategy {
    fn from(direction: SteepestDescent) -> Self {
        Strategy::SteepestDescent(direction)
    }
}

impl From<ConjugateGradient> for Strategy {
    fn from(direction: ConjugateGradient) -> Self {
        Strategy::ConjugateGradient(direction)
    }
}

impl From<Bfgs> for Strategy {
    fn from(direction: Bfgs) -> Self {
        Strategy::Bfgs(direction)
    }
}

impl From<Lbfgs> for Strategy {
    fn from(direction: Lbfgs) -> Self {
        Strategy::Lbfgs(direction)
    }
}
