use descent_core::constants::{DEFAULT_TOL, INV_PHI};
use thiserror::Error;

use super::Minimum;

/// Golden-section search over a closed interval.
///
/// Keeps two interior points at golden-ratio positions and discards the
/// sub-interval beyond the worse one, so each iteration reuses one point and
/// costs a single evaluation. Assumes `f` is unimodal on the interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoldenSection {
    tol: f64,
    max_iters: usize,
}

/// Errors that can occur when validating a golden-section config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tol must be finite and positive")]
    Tol,
}

impl Default for GoldenSection {
    fn default() -> Self {
        Self {
            tol: DEFAULT_TOL,
            max_iters: 200,
        }
    }
}

impl GoldenSection {
    /// Creates a golden-section refiner.
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` is not finite and positive.
    pub fn new(tol: f64, max_iters: usize) -> Result<Self, ConfigError> {
        if !tol.is_finite() || tol <= 0.0 {
            return Err(ConfigError::Tol);
        }
        Ok(Self { tol, max_iters })
    }

    /// Returns the interval width at which the search stops.
    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Returns the maximum number of shrink iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Minimizes `f` over `[a, b]`, in either order.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn minimize<F, E>(&self, mut f: F, a: f64, b: f64) -> Result<Minimum, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        let mut bracket = GoldenBracket::new(a, b);
        let mut f_left = f(bracket.inner_left)?;
        let mut f_right = f(bracket.inner_right)?;

        let mut iters = 0;
        while bracket.width() > self.tol && iters < self.max_iters {
            if f_left <= f_right {
                bracket.shrink_right();
                f_right = f_left;
                f_left = f(bracket.inner_left)?;
            } else {
                bracket.shrink_left();
                f_left = f_right;
                f_right = f(bracket.inner_right)?;
            }
            iters += 1;
        }

        let (x, value) = if f_left <= f_right {
            (bracket.inner_left, f_left)
        } else {
            (bracket.inner_right, f_right)
        };

        Ok(Minimum {
            x,
            value,
            iters,
            converged: bracket.width() <= self.tol,
        })
    }
}

/// Outer interval `[left, right]` with two interior points at golden-ratio
/// positions.
#[derive(Debug, Clone, Copy)]
struct GoldenBracket {
    left: f64,
    right: f64,

    /// At `left + (1 - φ⁻¹) * width`.
    inner_left: f64,

    /// At `left + φ⁻¹ * width`.
    inner_right: f64,
}

impl GoldenBracket {
    fn new(a: f64, b: f64) -> Self {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        let width = right - left;
        Self {
            left,
            right,
            inner_left: left + (1.0 - INV_PHI) * width,
            inner_right: left + INV_PHI * width,
        }
    }

    fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Keeps `[left, inner_right]`; the old `inner_left` becomes `inner_right`.
    fn shrink_right(&mut self) {
        self.right = self.inner_right;
        self.inner_right = self.inner_left;
        self.inner_left = self.left + (1.0 - INV_PHI) * self.width();
    }

    /// Keeps `[inner_left, right]`; the old `inner_right` becomes `inner_left`.
    fn shrink_left(&mut self) {
        self.left = self.inner_left;
        self.inner_left = self.inner_right;
        self.inner_right = self.left + INV_PHI * self.width();
    }
}
