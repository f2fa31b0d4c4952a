use std::collections::VecDeque;

use descent_core::vector::{self, dot, sub};

use super::{ConfigError, Direction, as_array};

/// Limited-memory BFGS.
///
/// Keeps the last `memory` step pairs `(s, y)` with `s·y > 0` and applies the
/// implied inverse Hessian to the gradient with the two-loop recursion. The
/// initial estimate is `γ·I` with `γ = s·y / y·y` from the newest pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Lbfgs {
    memory: usize,
    pairs: VecDeque<Pair>,
    x: Vec<f64>,
    gradient: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
struct Pair {
    s: Vec<f64>,
    y: Vec<f64>,
    rho: f64,
}

impl Default for Lbfgs {
    fn default() -> Self {
        Self {
            memory: 10,
            pairs: VecDeque::new(),
            x: Vec::new(),
            gradient: Vec::new(),
        }
    }
}

impl Lbfgs {
    /// Creates an L-BFGS strategy remembering `memory` step pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if `memory` is zero.
    pub fn new(memory: usize) -> Result<Self, ConfigError> {
        if memory == 0 {
            return Err(ConfigError::Memory);
        }
        Ok(Self {
            memory,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn memory(&self) -> usize {
        self.memory
    }

    /// Returns the number of step pairs currently stored.
    #[must_use]
    pub fn stored(&self) -> usize {
        self.pairs.len()
    }

    fn remember<const N: usize>(&mut self, x: &[f64; N], gradient: &[f64; N]) {
        self.x.clear();
        self.x.extend_from_slice(x);
        self.gradient.clear();
        self.gradient.extend_from_slice(gradient);
    }

    /// Computes `H·g` with the two-loop recursion.
    fn apply<const N: usize>(&self, gradient: &[f64; N]) -> [f64; N] {
        let mut q = *gradient;
        let mut alphas = Vec::with_capacity(self.pairs.len());

        for pair in self.pairs.iter().rev() {
            let (Some(s), Some(y)) = (as_array::<N>(&pair.s), as_array::<N>(&pair.y)) else {
                continue;
            };
            let alpha = pair.rho * dot(s, &q);
            q = vector::axpy(&q, -alpha, y);
            alphas.push(alpha);
        }

        let gamma = self
            .pairs
            .back()
            .and_then(|pair| Some((as_array::<N>(&pair.s)?, as_array::<N>(&pair.y)?)))
            .map_or(1.0, |(s, y)| dot(s, y) / dot(y, y));
        let mut r = vector::scale(gamma, &q);

        for (pair, alpha) in self.pairs.iter().zip(alphas.into_iter().rev()) {
            let (Some(s), Some(y)) = (as_array::<N>(&pair.s), as_array::<N>(&pair.y)) else {
                continue;
            };
            let beta = pair.rho * dot(y, &r);
            r = vector::axpy(&r, alpha - beta, s);
        }

        r
    }
}

impl Direction for Lbfgs {
    fn initialize<const N: usize>(&mut self, x: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        self.pairs.clear();
        self.remember(x, gradient);
        vector::neg(gradient)
    }

    fn next<const N: usize>(&mut self, x: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        let (Some(x_old), Some(g_old)) = (as_array::<N>(&self.x), as_array::<N>(&self.gradient))
        else {
            return self.initialize(x, gradient);
        };

        let s = sub(x, x_old);
        let y = sub(gradient, g_old);
        let sy = dot(&s, &y);

        if sy > 0.0 && sy.is_finite() {
            if self.pairs.len() == self.memory {
                self.pairs.pop_front();
            }
            self.pairs.push_back(Pair {
                s: s.to_vec(),
                y: y.to_vec(),
                rho: 1.0 / sy,
            });
        }

        self.remember(x, gradient);
        vector::neg(&self.apply(gradient))
    }
}
