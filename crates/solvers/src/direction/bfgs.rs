use descent_core::vector::{self, dot, sub};

use super::{Direction, as_array};

/// Starting estimate of the inverse Hessian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialHessian {
    /// `H₀ = I`.
    #[default]
    Identity,

    /// `H₀ = I`, rescaled by `s·y / y·y` just before the first update.
    Scaled,
}

/// BFGS with a dense inverse-Hessian estimate `H`, stored row-major.
///
/// After each step, with `s = x_new - x_old` and `y = g_new - g_old`, the
/// estimate becomes
///
/// `H ← (I - ρ·s·yᵀ)·H·(I - ρ·y·sᵀ) + ρ·s·sᵀ`, `ρ = 1 / s·y`
///
/// provided `s·y` is finite and positive. Otherwise `H` is left untouched,
/// which keeps it positive definite.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bfgs {
    initial: InitialHessian,
    inverse_hessian: Vec<f64>,
    x: Vec<f64>,
    gradient: Vec<f64>,
    updates: usize,
}

impl Bfgs {
    #[must_use]
    pub fn new(initial: InitialHessian) -> Self {
        Self {
            initial,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn initial(&self) -> InitialHessian {
        self.initial
    }

    /// Returns the current inverse-Hessian estimate, row-major.
    #[must_use]
    pub fn inverse_hessian(&self) -> &[f64] {
        &self.inverse_hessian
    }

    /// Returns how many updates have been applied since initialization.
    #[must_use]
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Applies the rank-two update for the pair `(s, y)`.
    ///
    /// Returns whether the update was applied.
    fn update<const N: usize>(&mut self, s: &[f64; N], y: &[f64; N]) -> bool {
        let sy = dot(s, y);
        if !(sy > 0.0 && sy.is_finite()) {
            return false;
        }

        let h = &mut self.inverse_hessian;

        if self.updates == 0 && self.initial == InitialHessian::Scaled {
            let gamma = sy / dot(y, y);
            h.iter_mut().for_each(|value| *value *= gamma);
        }

        let rho = 1.0 / sy;

        // With H symmetric, the update expands to
        // H - ρ(Hy·sᵀ + s·(Hy)ᵀ) + (ρ²·yᵀHy + ρ)·s·sᵀ.
        let mut hy = [0.0; N];
        for (i, hy_i) in hy.iter_mut().enumerate() {
            *hy_i = (0..N).map(|j| h[i * N + j] * y[j]).sum();
        }
        let yhy = dot(y, &hy);
        let ss_coefficient = rho * rho * yhy + rho;

        for i in 0..N {
            for j in 0..N {
                h[i * N + j] += ss_coefficient * s[i] * s[j] - rho * (hy[i] * s[j] + s[i] * hy[j]);
            }
        }

        self.updates += 1;
        true
    }

    fn direction<const N: usize>(&self, gradient: &[f64; N]) -> [f64; N] {
        let h = &self.inverse_hessian;
        let mut d = [0.0; N];
        for (i, d_i) in d.iter_mut().enumerate() {
            *d_i = -(0..N).map(|j| h[i * N + j] * gradient[j]).sum::<f64>();
        }
        d
    }

    fn remember<const N: usize>(&mut self, x: &[f64; N], gradient: &[f64; N]) {
        self.x.clear();
        self.x.extend_from_slice(x);
        self.gradient.clear();
        self.gradient.extend_from_slice(gradient);
    }
}

impl Direction for Bfgs {
    fn initialize<const N: usize>(&mut self, x: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        self.inverse_hessian.clear();
        self.inverse_hessian.resize(N * N, 0.0);
        for i in 0..N {
            self.inverse_hessian[i * N + i] = 1.0;
        }
        self.updates = 0;
        self.remember(x, gradient);
        vector::neg(gradient)
    }

    fn next<const N: usize>(&mut self, x: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        let (Some(x_old), Some(g_old)) = (as_array::<N>(&self.x), as_array::<N>(&self.gradient))
        else {
            return self.initialize(x, gradient);
        };
        if self.inverse_hessian.len() != N * N {
            return self.initialize(x, gradient);
        }

        let s = sub(x, x_old);
        let y = sub(gradient, g_old);

        self.update(&s, &y);
        self.remember(x, gradient);
        self.direction(gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    /// Gradient of `½xᵀAx` with `A = [[4, 1], [1, 3]]`.
    fn quadratic_gradient(x: &[f64; 2]) -> [f64; 2] {
        [4.0 * x[0] + x[1], x[0] + 3.0 * x[1]]
    }

    #[test]
    fn starts_with_identity() {
        let mut bfgs = Bfgs::default();
        let d = bfgs.initialize(&[1.0, 1.0], &[2.0, -3.0]);

        assert_eq!(d, [-2.0, 3.0]);
        assert_eq!(bfgs.inverse_hessian(), &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(bfgs.updates(), 0);
    }

    #[test]
    fn satisfies_secant_equation() {
        let mut bfgs = Bfgs::default();
        let x0 = [1.0, 1.0];
        let x1 = [0.5, -0.25];
        let (g0, g1) = (quadratic_gradient(&x0), quadratic_gradient(&x1));

        bfgs.initialize(&x0, &g0);
        bfgs.next(&x1, &g1);

        // H·y = s after the update.
        let h = bfgs.inverse_hessian();
        let s = sub(&x1, &x0);
        let y = sub(&g1, &g0);
        for i in 0..2 {
            let hy = h[i * 2] * y[0] + h[i * 2 + 1] * y[1];
            assert_relative_eq!(hy, s[i], epsilon = 1e-12);
        }

        // Symmetric.
        assert_relative_eq!(h[1], h[2], epsilon = 1e-15);
        assert_eq!(bfgs.updates(), 1);
    }

    #[test]
    fn skips_update_without_curvature() {
        let mut bfgs = Bfgs::default();
        bfgs.initialize(&[0.0, 0.0], &[1.0, 1.0]);
        bfgs.next(&[1.0, 0.0], &[3.0, 2.0]);

        let before = bfgs.inverse_hessian().to_vec();

        // s = [1, 0], y = [-4, -1]: s·y < 0.
        bfgs.next(&[2.0, 0.0], &[-1.0, 1.0]);

        let after = bfgs.inverse_hessian();
        assert!(before.iter().zip(after).all(|(b, a)| b.to_bits() == a.to_bits()));
        assert_eq!(bfgs.updates(), 1);
    }

    #[test]
    fn converges_to_inverse_on_quadratic() {
        // Exact line searches on a quadratic recover A⁻¹ in N steps.
        let a = [[4.0, 1.0], [1.0, 3.0]];
        let mut bfgs = Bfgs::default();
        let mut x = [1.0, 2.0];
        let mut g = quadratic_gradient(&x);
        let mut d = bfgs.initialize(&x, &g);

        for _ in 0..2 {
            let ad = [
                a[0][0] * d[0] + a[0][1] * d[1],
                a[1][0] * d[0] + a[1][1] * d[1],
            ];
            let alpha = -dot(&g, &d) / dot(&d, &ad);
            x = vector::axpy(&x, alpha, &d);
            g = quadratic_gradient(&x);
            d = bfgs.next(&x, &g);
        }

        // A⁻¹ = [[3, -1], [-1, 4]] / 11.
        let h = bfgs.inverse_hessian();
        assert_relative_eq!(h[0], 3.0 / 11.0, epsilon = 1e-12);
        assert_relative_eq!(h[1], -1.0 / 11.0, epsilon = 1e-12);
        assert_relative_eq!(h[3], 4.0 / 11.0, epsilon = 1e-12);
    }

    #[test]
    fn scaled_initial_hessian() {
        let mut bfgs = Bfgs::new(InitialHessian::Scaled);
        let x0 = [1.0, 1.0];
        let x1 = [0.5, -0.25];
        let (g0, g1) = (quadratic_gradient(&x0), quadratic_gradient(&x1));

        bfgs.initialize(&x0, &g0);
        bfgs.next(&x1, &g1);

        let h = bfgs.inverse_hessian();
        let s = sub(&x1, &x0);
        let y = sub(&g1, &g0);
        for i in 0..2 {
            let hy = h[i * 2] * y[0] + h[i * 2 + 1] * y[1];
            assert_relative_eq!(hy, s[i], epsilon = 1e-12);
        }
    }
}
