use descent_core::vector;

use super::ConfigError;

/// Newton directions from a Hessian shifted until it is positive definite.
///
/// Solves `(∇²f + τI)·d = -g` by Cholesky factorization. `τ` starts at zero
/// when the Hessian's diagonal is positive and at `shift - min(diag)`
/// otherwise. After each failed factorization it grows to
/// `max(growth·τ, shift)`. Once it reaches `max_shift` the direction falls
/// back to `-g`.
///
/// Unlike the quasi-Newton strategies this keeps no history: every direction
/// comes from the Hessian at the current iterate. Use it through
/// [`crate::descent::minimize_newton`], which supplies the Hessian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Newton {
    shift: f64,
    growth: f64,
    max_shift: f64,
}

impl Default for Newton {
    fn default() -> Self {
        Self {
            shift: 1e-3,
            growth: 2.0,
            max_shift: 1e8,
        }
    }
}

impl Newton {
    /// Creates a validated strategy.
    ///
    /// # Errors
    ///
    /// Returns an error unless `shift` is finite and positive, `growth` is
    /// finite and above one, and `max_shift` is finite and above `shift`.
    pub fn new(shift: f64, growth: f64, max_shift: f64) -> Result<Self, ConfigError> {
        if !shift.is_finite() || shift <= 0.0 {
            return Err(ConfigError::Shift);
        }
        if !growth.is_finite() || growth <= 1.0 {
            return Err(ConfigError::ShiftGrowth);
        }
        if !max_shift.is_finite() || max_shift <= shift {
            return Err(ConfigError::MaxShift);
        }

        Ok(Self {
            shift,
            growth,
            max_shift,
        })
    }

    #[must_use]
    pub fn shift(&self) -> f64 {
        self.shift
    }

    #[must_use]
    pub fn growth(&self) -> f64 {
        self.growth
    }

    #[must_use]
    pub fn max_shift(&self) -> f64 {
        self.max_shift
    }

    /// Returns the Newton direction for `hessian` and `gradient`.
    #[must_use]
    pub fn direction<const N: usize>(
        &self,
        hessian: &[[f64; N]; N],
        gradient: &[f64; N],
    ) -> [f64; N] {
        let min_diagonal = (0..N).map(|i| hessian[i][i]).fold(f64::INFINITY, f64::min);
        let mut tau = if min_diagonal > 0.0 {
            0.0
        } else {
            self.shift - min_diagonal
        };

        while tau < self.max_shift {
            if let Some(factor) = cholesky(hessian, tau) {
                return solve(&factor, &vector::neg(gradient));
            }
            tau = (self.growth * tau).max(self.shift);
        }

        vector::neg(gradient)
    }
}

/// Returns lower-triangular `L` with `L·Lᵀ = A + τI`, reading only the lower
/// triangle of `A`, or `None` if `A + τI` is not numerically positive
/// definite.
fn cholesky<const N: usize>(a: &[[f64; N]; N], tau: f64) -> Option<[[f64; N]; N]> {
    let mut l = [[0.0; N]; N];

    for i in 0..N {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| l[i][k] * l[j][k]).sum();
            if i == j {
                let pivot = a[i][i] + tau - sum;
                if !(pivot > 0.0 && pivot.is_finite()) {
                    return None;
                }
                l[i][i] = pivot.sqrt();
            } else {
                l[i][j] = (a[i][j] - sum) / l[j][j];
            }
        }
    }

    Some(l)
}

/// Solves `L·Lᵀ·x = b`.
fn solve<const N: usize>(l: &[[f64; N]; N], b: &[f64; N]) -> [f64; N] {
    let mut y = [0.0; N];
    for i in 0..N {
        let sum: f64 = (0..i).map(|k| l[i][k] * y[k]).sum();
        y[i] = (b[i] - sum) / l[i][i];
    }

    let mut x = [0.0; N];
    for i in (0..N).rev() {
        let sum: f64 = (i + 1..N).map(|k| l[k][i] * x[k]).sum();
        x[i] = (y[i] - sum) / l[i][i];
    }
    x
}
