//! Finite-difference derivatives for objectives that only provide values,
//! and Hessians for objectives that only provide gradients.
//!
//! Each coordinate is perturbed by `h_i = step * max(1, |x_i|)`. The default
//! step is `√ε` for one-sided schemes and `∛ε` for the central scheme, which
//! balances truncation against round-off for each.

use thiserror::Error;

use crate::constants::{CBRT_EPSILON, SQRT_EPSILON};
use crate::vector;

/// Difference scheme used to approximate derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `(f(x + h) - f(x)) / h`
    Forward,

    /// `(f(x) - f(x - h)) / h`
    Backward,

    /// `(f(x + h) - f(x - h)) / 2h`
    Central,
}

impl Scheme {
    /// Returns the default relative step for this scheme.
    #[must_use]
    pub fn default_step(self) -> f64 {
        match self {
            Scheme::Forward | Scheme::Backward => SQRT_EPSILON,
            Scheme::Central => CBRT_EPSILON,
        }
    }
}

/// Errors that can occur when configuring a finite-difference approximation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("step must be finite and positive")]
    Step,
}

/// Finite-difference gradient approximation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDifference {
    scheme: Scheme,
    step: f64,
}

impl Default for FiniteDifference {
    fn default() -> Self {
        Self::central()
    }
}

impl FiniteDifference {
    /// Creates an approximation with a caller-chosen relative step.
    ///
    /// # Errors
    ///
    /// Returns an error if `step` is not finite and positive.
    pub fn new(scheme: Scheme, step: f64) -> Result<Self, ConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::Step);
        }
        Ok(Self { scheme, step })
    }

    /// Forward differences with the default step.
    #[must_use]
    pub fn forward() -> Self {
        Self::with_default_step(Scheme::Forward)
    }

    /// Backward differences with the default step.
    #[must_use]
    pub fn backward() -> Self {
        Self::with_default_step(Scheme::Backward)
    }

    /// Central differences with the default step.
    #[must_use]
    pub fn central() -> Self {
        Self::with_default_step(Scheme::Central)
    }

    fn with_default_step(scheme: Scheme) -> Self {
        Self {
            scheme,
            step: scheme.default_step(),
        }
    }

    /// Returns the difference scheme.
    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the relative step.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Approximates the gradient of `f` at `x`, given `fx = f(x)`.
    ///
    /// One-sided schemes reuse `fx` and cost `N` evaluations; the central
    /// scheme ignores it and costs `2N`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn gradient<F, E, const N: usize>(&self, f: F, x: &[f64; N], fx: f64) -> Result<[f64; N], E>
    where
        F: Fn(&[f64; N]) -> Result<f64, E>,
    {
        let mut gradient = [0.0; N];
        let mut point = *x;

        for i in 0..N {
            let h = self.step * x[i].abs().max(1.0);

            gradient[i] = match self.scheme {
                Scheme::Forward => {
                    point[i] = x[i] + h;
                    let h = point[i] - x[i];
                    (f(&point)? - fx) / h
                }
                Scheme::Backward => {
                    point[i] = x[i] - h;
                    let h = x[i] - point[i];
                    (fx - f(&point)?) / h
                }
                Scheme::Central => {
                    point[i] = x[i] + h;
                    let upper = point[i];
                    let f_upper = f(&point)?;
                    point[i] = x[i] - h;
                    let lower = point[i];
                    let f_lower = f(&point)?;
                    (f_upper - f_lower) / (upper - lower)
                }
            };

            point[i] = x[i];
        }

        Ok(gradient)
    }

    /// Approximates the directional derivative `∇f(x) · d`, given `fx = f(x)`.
    ///
    /// Costs one evaluation for one-sided schemes and two for the central
    /// scheme. A zero direction has a zero derivative.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn directional<F, E, const N: usize>(
        &self,
        f: F,
        x: &[f64; N],
        d: &[f64; N],
        fx: f64,
    ) -> Result<f64, E>
    where
        F: Fn(&[f64; N]) -> Result<f64, E>,
    {
        let d_norm = vector::norm(d);
        if d_norm == 0.0 {
            return Ok(0.0);
        }

        let h = self.step * vector::norm(x).max(1.0) / d_norm;

        match self.scheme {
            Scheme::Forward => Ok((f(&vector::axpy(x, h, d))? - fx) / h),
            Scheme::Backward => Ok((fx - f(&vector::axpy(x, -h, d))?) / h),
            Scheme::Central => {
                let f_upper = f(&vector::axpy(x, h, d))?;
                let f_lower = f(&vector::axpy(x, -h, d))?;
                Ok((f_upper - f_lower) / (2.0 * h))
            }
        }
    }

    /// Approximates the Hessian at `x` by differencing `gradient`, given
    /// `gx = ∇f(x)`.
    ///
    /// Column `j` comes from perturbing coordinate `j`; the result is then
    /// symmetrized. One-sided schemes reuse `gx` and cost `N` gradient
    /// evaluations; the central scheme ignores it and costs `2N`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `gradient`.
    pub fn hessian<G, E, const N: usize>(
        &self,
        gradient: G,
        x: &[f64; N],
        gx: &[f64; N],
    ) -> Result<[[f64; N]; N], E>
    where
        G: Fn(&[f64; N]) -> Result<[f64; N], E>,
    {
        let mut columns = [[0.0; N]; N];
        let mut point = *x;

        for j in 0..N {
            let h = self.step * x[j].abs().max(1.0);

            columns[j] = match self.scheme {
                Scheme::Forward => {
                    point[j] = x[j] + h;
                    let h = point[j] - x[j];
                    vector::scale(1.0 / h, &vector::sub(&gradient(&point)?, gx))
                }
                Scheme::Backward => {
                    point[j] = x[j] - h;
                    let h = x[j] - point[j];
                    vector::scale(1.0 / h, &vector::sub(gx, &gradient(&point)?))
                }
                Scheme::Central => {
                    point[j] = x[j] + h;
                    let upper = point[j];
                    let g_upper = gradient(&point)?;
                    point[j] = x[j] - h;
                    let lower = point[j];
                    let g_lower = gradient(&point)?;
                    vector::scale(1.0 / (upper - lower), &vector::sub(&g_upper, &g_lower))
                }
            };

            point[j] = x[j];
        }

        let mut hessian = [[0.0; N]; N];
        for i in 0..N {
            for j in 0..N {
                hessian[i][j] = 0.5 * (columns[i][j] + columns[j][i]);
            }
        }
        Ok(hessian)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    fn paraboloid(x: &[f64; 3]) -> Result<f64, Infallible> {
        Ok(x[0] * x[0] + 3.0 * x[1] * x[1] - 2.0 * x[0] * x[2] + x[2].powi(3))
    }

    fn paraboloid_gradient(x: &[f64; 3]) -> [f64; 3] {
        [
            2.0 * x[0] - 2.0 * x[2],
            6.0 * x[1],
            -2.0 * x[0] + 3.0 * x[2] * x[2],
        ]
    }

    #[test]
    fn every_scheme_matches_analytic_gradient() {
        let x = [1.5, -0.5, 2.0];
        let fx = paraboloid(&x).unwrap();
        let expected = paraboloid_gradient(&x);

        for (fd, tol) in [
            (FiniteDifference::forward(), 1e-5),
            (FiniteDifference::backward(), 1e-5),
            (FiniteDifference::central(), 1e-8),
        ] {
            let gradient = fd.gradient(paraboloid, &x, fx).unwrap();
            for i in 0..3 {
                assert_relative_eq!(gradient[i], expected[i], epsilon = tol, max_relative = tol);
            }
        }
    }

    #[test]
    fn hessian_from_gradient_differences() {
        let x = [1.5, -0.5, 2.0];
        let gx = paraboloid_gradient(&x);
        let expected = [[2.0, 0.0, -2.0], [0.0, 6.0, 0.0], [-2.0, 0.0, 12.0]];
        let gradient = |x: &[f64; 3]| Ok::<_, Infallible>(paraboloid_gradient(x));

        for (fd, tol) in [
            (FiniteDifference::forward(), 1e-6),
            (FiniteDifference::backward(), 1e-6),
            (FiniteDifference::central(), 1e-8),
        ] {
            let hessian = fd.hessian(gradient, &x, &gx).unwrap();
            for i in 0..3 {
                for j in 0..3 {
                    assert_relative_eq!(hessian[i][j], expected[i][j], epsilon = tol, max_relative = tol);
                    assert_eq!(hessian[i][j], hessian[j][i]);
                }
            }
        }
    }

    #[test]
    fn directional_matches_projected_gradient() {
        let x = [0.3, 0.7, -1.1];
        let d = [1.0, -2.0, 0.5];
        let fx = paraboloid(&x).unwrap();
        let expected = vector::dot(&paraboloid_gradient(&x), &d);

        let forward = FiniteDifference::forward()
            .directional(paraboloid, &x, &d, fx)
            .unwrap();
        let central = FiniteDifference::central()
            .directional(paraboloid, &x, &d, fx)
            .unwrap();

        assert_relative_eq!(forward, expected, max_relative = 1e-5);
        assert_relative_eq!(central, expected, max_relative = 1e-8);
    }

    #[test]
    fn zero_direction_has_zero_derivative() {
        let x = [1.0, 2.0, 3.0];
        let fx = paraboloid(&x).unwrap();
        let value = FiniteDifference::default()
            .directional(paraboloid, &x, &[0.0; 3], fx)
            .unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn rejects_invalid_step() {
        assert_eq!(
            FiniteDifference::new(Scheme::Central, 0.0),
            Err(ConfigError::Step)
        );
        assert_eq!(
            FiniteDifference::new(Scheme::Forward, f64::NAN),
            Err(ConfigError::Step)
        );
        assert!(FiniteDifference::new(Scheme::Backward, 1e-6).is_ok());
    }

    #[test]
    fn propagates_evaluation_errors() {
        #[derive(Debug, PartialEq)]
        struct Failed;

        let failing = |x: &[f64; 2]| if x[1] > 1.0 { Err(Failed) } else { Ok(x[0]) };

        let result = FiniteDifference::forward().gradient(failing, &[0.0, 1.0], 0.0);
        assert_eq!(result, Err(Failed));
    }
}
