use descent_core::constants::PHI;
use thiserror::Error;

/// Three abscissas enclosing a local minimum.
///
/// After [`Bracketing::bracket`] the points are ordered `a < b < c`, and when
/// `bracketed` is set `f(b) ≤ f(a)` and `f(b) ≤ f(c)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub fa: f64,
    pub fb: f64,
    pub fc: f64,

    /// Whether `b` is known to be no worse than both ends.
    ///
    /// Cleared when the expansion budget ran out while `f` was still
    /// decreasing, or when an evaluation produced a non-finite value.
    pub bracketed: bool,
}

impl Bracket {
    /// Returns the width `c - a`.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.c - self.a
    }
}

/// Expands a pair of points outward until a minimum is enclosed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracketing {
    ratio: f64,
    max_iters: usize,
}

/// Errors that can occur when validating a bracketing config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ratio must be finite and greater than one")]
    Ratio,
}

impl Default for Bracketing {
    fn default() -> Self {
        Self {
            ratio: PHI,
            max_iters: 100,
        }
    }
}

impl Bracketing {
    /// Creates a bracketing routine with a custom growth ratio.
    ///
    /// # Errors
    ///
    /// Returns an error if `ratio` is not finite or not greater than one.
    pub fn new(ratio: f64, max_iters: usize) -> Result<Self, ConfigError> {
        if !ratio.is_finite() || ratio <= 1.0 {
            return Err(ConfigError::Ratio);
        }
        Ok(Self { ratio, max_iters })
    }

    /// Returns the growth ratio between successive expansions.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Returns the maximum number of expansions.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Brackets a minimum of `f` starting from `x0` and `x1`.
    ///
    /// The points are ordered so that `f` does not increase from the first to
    /// the second, then the search walks downhill in that direction only.
    /// The caller must pass distinct points.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn bracket<F, E>(&self, mut f: F, x0: f64, x1: f64) -> Result<Bracket, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        let (mut a, mut b) = (x0, x1);
        let (mut fa, mut fb) = (f(a)?, f(b)?);

        if fa < fb {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }

        let mut c = b + self.ratio * (b - a);
        let mut fc = f(c)?;

        let mut iters = 0;
        while fb > fc && iters < self.max_iters {
            let d = c + self.ratio * (c - b);
            let fd = f(d)?;

            (a, b, c) = (b, c, d);
            (fa, fb, fc) = (fb, fc, fd);
            iters += 1;
        }

        if c < a {
            std::mem::swap(&mut a, &mut c);
            std::mem::swap(&mut fa, &mut fc);
        }

        Ok(Bracket {
            a,
            b,
            c,
            fa,
            fb,
            fc,
            bracketed: fb <= fa && fb <= fc,
        })
    }
}
