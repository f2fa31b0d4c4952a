use descent_core::constants::{DEFAULT_TOL, GOLDEN_SECTION};
use thiserror::Error;

use super::{Bracket, Minimum};

/// Brent's method for one-dimensional minimization.
///
/// Each iteration fits a parabola through the three best points seen so far
/// and steps to its vertex when that step is finite, lands strictly inside
/// the current interval, and is shorter than half the step taken two
/// iterations ago. Otherwise it takes a golden-section step into the larger
/// sub-interval. Steps shorter than `tol` are lengthened to `tol`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brent {
    tol: f64,
    max_iters: usize,
}

/// Errors that can occur when validating a Brent config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tol must be finite and positive")]
    Tol,
}

impl Default for Brent {
    fn default() -> Self {
        Self {
            tol: DEFAULT_TOL,
            max_iters: 10_000,
        }
    }
}

impl Brent {
    /// Creates a Brent refiner.
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

    /// Returns the absolute tolerance on the minimizer.
    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Returns the maximum number of iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Minimizes `f` over `[a, b]`.
    ///
    /// Two golden-section points pick the starting interior point: the better
    /// one is used with the full interval when it beats both ends, and with
    /// the sub-interval on its side otherwise.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn minimize<F, E>(&self, mut f: F, a: f64, b: f64) -> Result<Minimum, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };

        let x = a + GOLDEN_SECTION * (b - a);
        let y = b - GOLDEN_SECTION * (b - a);

        let (fa, fb) = (f(a)?, f(b)?);
        let (fx, fy) = (f(x)?, f(y)?);

        if fx < fy {
            if fx < fa && fx < fb {
                self.refine(f, a, x, b)
            } else {
                self.refine(f, a, x, y)
            }
        } else if fy < fa && fy < fb {
            self.refine(f, a, y, b)
        } else {
            self.refine(f, x, y, b)
        }
    }

    /// Refines a bracket produced by [`super::Bracketing`].
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn minimize_bracket<F, E>(&self, f: F, bracket: &Bracket) -> Result<Minimum, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        self.refine(f, bracket.a, bracket.b, bracket.c)
    }

    /// Refines a minimum of `f` starting from `x` with `a < x < b`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn refine<F, E>(&self, mut f: F, a: f64, x: f64, b: f64) -> Result<Minimum, E>
    where
        F: FnMut(f64) -> Result<f64, E>,
    {
        let tol = self.tol;
        let (mut a, mut b) = (a, b);

        let mut x = x;
        let mut fx = f(x)?;
        let (mut w, mut fw) = (x, fx);
        let (mut v, mut fv) = (x, fx);

        // Current and previous step lengths.
        let mut d: f64 = 0.0;
        let mut e: f64 = 0.0;

        for iter in 0..self.max_iters {
            if x - a <= 2.0 * tol && b - x <= 2.0 * tol {
                return Ok(Minimum {
                    x,
                    value: fx,
                    iters: iter,
                    converged: true,
                });
            }

            let mid = 0.5 * (a + b);
            let parabolic = if e.abs() > tol {
                parabolic_step(x, fx, w, fw, v, fv).filter(|&step| {
                    let u = x + step;
                    step.abs() < 0.5 * e.abs() && u > a && u < b
                })
            } else {
                None
            };

            if let Some(step) = parabolic {
                e = d;
                d = step;

                // Stay at least `tol` away from the ends.
                let u = x + d;
                if u - a < 2.0 * tol || b - u < 2.0 * tol {
                    d = tol.copysign(mid - x);
                }
            } else {
                e = if x >= mid { a - x } else { b - x };
                d = GOLDEN_SECTION * e;
            }

            let u = if d.abs() >= tol {
                x + d
            } else {
                x + tol.copysign(d)
            };
            let fu = f(u)?;

            if fu <= fx {
                if u >= x {
                    a = x;
                } else {
                    b = x;
                }
                (v, fv) = (w, fw);
                (w, fw) = (x, fx);
                (x, fx) = (u, fu);
            } else {
                if u < x {
                    a = u;
                } else {
                    b = u;
                }
                if fu <= fw || w == x {
                    (v, fv) = (w, fw);
                    (w, fw) = (u, fu);
                } else if fu <= fv || v == x || v == w {
                    (v, fv) = (u, fu);
                }
            }
        }

        Ok(Minimum {
            x,
            value: fx,
            iters: self.max_iters,
            converged: x - a <= 2.0 * tol && b - x <= 2.0 * tol,
        })
    }
}

/// Returns the step from `x` to the vertex of the parabola through
/// `(x, fx)`, `(w, fw)` and `(v, fv)`, if it is finite.
fn parabolic_step(x: f64, fx: f64, w: f64, fw: f64, v: f64, fv: f64) -> Option<f64> {
    let r = (x - w) * (fx - fv);
    let q = (x - v) * (fx - fw);
    let p = (x - v) * q - (x - w) * r;
    let q = 2.0 * (q - r);

    let step = -p / q;
    step.is_finite().then_some(step)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_abs_diff_eq;

    use crate::scalar::Bracketing;

    #[test]
    fn parabola_in_few_iterations() {
        let f = |t: f64| Ok::<_, Infallible>((t - 2.0).powi(2) + 1.0);

        let minimum = Brent::default().refine(f, 0.0, 0.5, 5.0).unwrap();

        assert!(minimum.converged);
        assert_abs_diff_eq!(minimum.x, 2.0, epsilon = 1e-7);
        assert_abs_diff_eq!(minimum.value, 1.0, epsilon = 1e-12);
        assert!(minimum.iters < 50, "took {} iterations", minimum.iters);
    }

    #[test]
    fn non_polynomial_minimum() {
        // Minimum of x·eˣ at x = -1.
        let f = |t: f64| Ok::<_, Infallible>(t * t.exp());

        let minimum = Brent::default().minimize(f, -3.0, 2.0).unwrap();

        assert!(minimum.converged);
        assert_abs_diff_eq!(minimum.x, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(minimum.value, -(-1.0_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn minimum_near_interval_end() {
        let f = |t: f64| Ok::<_, Infallible>((t - 0.999).powi(2));

        let minimum = Brent::default().minimize(f, 1.0, 0.0).unwrap();

        assert!(minimum.converged);
        assert_abs_diff_eq!(minimum.x, 0.999, epsilon = 1e-6);
    }

    #[test]
    fn refines_a_bracket() {
        let f = |t: f64| Ok::<_, Infallible>(t.cos());

        let bracket = Bracketing::default().bracket(f, 2.0, 2.5).unwrap();
        let minimum = Brent::default().minimize_bracket(f, &bracket).unwrap();

        assert!(minimum.converged);
        assert_abs_diff_eq!(minimum.x, std::f64::consts::PI, epsilon = 1e-6);
    }

    #[test]
    fn iteration_limit_returns_best_point() {
        let f = |t: f64| Ok::<_, Infallible>(t.abs().sqrt());
        let brent = Brent::new(1e-12, 5).unwrap();

        let minimum = brent.refine(f, -4.0, 1.0, 3.0).unwrap();

        assert!(!minimum.converged);
        assert_eq!(minimum.iters, 5);
        assert!(minimum.value <= 1.0);
    }

    #[test]
    fn rejects_bad_tolerance() {
        assert_eq!(Brent::new(0.0, 10), Err(ConfigError::Tol));
        assert_eq!(Brent::new(f64::NAN, 10), Err(ConfigError::Tol));
    }
}
