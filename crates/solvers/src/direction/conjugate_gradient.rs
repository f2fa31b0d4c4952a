use descent_core::vector::{self, dot, norm_squared, sub};

use super::{ConfigError, Direction, as_array};

/// Formula for the conjugate-gradient coefficient β in
/// `d_new = -g_new + β·d_old`.
///
/// With `y = g_new - g_old`:
///
/// | Variant | β |
/// |---|---|
/// | `FR` | `‖g_new‖² / ‖g_old‖²` |
/// | `PR` | `g_new·y / ‖g_old‖²` |
/// | `PRAbs` | `|PR|` |
/// | `PRPlus` | `max(0, PR)` |
/// | `HS` | `g_new·y / d_old·y` |
/// | `DY` | `‖g_new‖² / d_old·y` |
/// | `HZ` | `(y - 2·d_old·‖y‖²/(d_old·y))·g_new / (d_old·y)` |
/// | `FRPR` | `PR` clamped to `[-FR, FR]` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Formula {
    /// Fletcher–Reeves.
    FR,
    /// Polak–Ribière.
    PR,
    PRAbs,
    PRPlus,
    /// Hestenes–Stiefel.
    HS,
    /// Dai–Yuan.
    DY,
    /// Hager–Zhang.
    HZ,
    #[default]
    FRPR,
}

impl Formula {
    /// Computes β. The result may be non-finite when a denominator vanishes.
    #[must_use]
    pub fn beta<const N: usize>(
        self,
        g_old: &[f64; N],
        g_new: &[f64; N],
        d_old: &[f64; N],
    ) -> f64 {
        let fr = || norm_squared(g_new) / norm_squared(g_old);
        let pr = || dot(g_new, &sub(g_new, g_old)) / norm_squared(g_old);

        match self {
            Formula::FR => fr(),
            Formula::PR => pr(),
            Formula::PRAbs => pr().abs(),
            Formula::PRPlus => pr().max(0.0),
            Formula::HS => {
                let y = sub(g_new, g_old);
                dot(g_new, &y) / dot(d_old, &y)
            }
            Formula::DY => norm_squared(g_new) / dot(d_old, &sub(g_new, g_old)),
            Formula::HZ => {
                let y = sub(g_new, g_old);
                let dy = dot(d_old, &y);
                let v = vector::axpy(&y, -2.0 * norm_squared(&y) / dy, d_old);
                dot(&v, g_new) / dy
            }
            Formula::FRPR => {
                let (fr, pr) = (fr(), pr());
                if pr < -fr {
                    -fr
                } else if pr.abs() <= fr {
                    pr
                } else {
                    fr
                }
            }
        }
    }
}

/// Nonlinear conjugate gradient.
///
/// Falls back to steepest descent whenever successive gradients are far from
/// orthogonal, `(g_old·g_new) / ‖g_new‖² ≥ restart`, or β is not finite.
#[derive(Debug, Clone, PartialEq)]
pub struct ConjugateGradient {
    formula: Formula,
    restart: f64,
    gradient: Vec<f64>,
    direction: Vec<f64>,
}

impl Default for ConjugateGradient {
    fn default() -> Self {
        Self {
            formula: Formula::default(),
            restart: 0.1,
            gradient: Vec::new(),
            direction: Vec::new(),
        }
    }
}

impl ConjugateGradient {
    /// Creates a conjugate-gradient strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if `restart` is not finite and non-negative.
    pub fn new(formula: Formula, restart: f64) -> Result<Self, ConfigError> {
        if !restart.is_finite() || restart < 0.0 {
            return Err(ConfigError::Restart);
        }
        Ok(Self {
            formula,
            restart,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn formula(&self) -> Formula {
        self.formula
    }

    #[must_use]
    pub fn restart(&self) -> f64 {
        self.restart
    }

    fn remember<const N: usize>(&mut self, gradient: &[f64; N], direction: [f64; N]) -> [f64; N] {
        self.gradient.clear();
        self.gradient.extend_from_slice(gradient);
        self.direction.clear();
        self.direction.extend_from_slice(&direction);
        direction
    }
}

impl Direction for ConjugateGradient {
    fn initialize<const N: usize>(&mut self, _x: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        self.remember(gradient, vector::neg(gradient))
    }

    fn next<const N: usize>(&mut self, x: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        let (Some(g_old), Some(d_old)) = (
            as_array::<N>(&self.gradient),
            as_array::<N>(&self.direction),
        ) else {
            return self.initialize(x, gradient);
        };

        let steepest = vector::neg(gradient);

        let orthogonality = dot(g_old, gradient) / norm_squared(gradient);
        if orthogonality >= self.restart {
            return self.remember(gradient, steepest);
        }

        let beta = self.formula.beta(g_old, gradient, d_old);
        let direction = if beta.is_finite() {
            vector::axpy(&steepest, beta, d_old)
        } else {
            steepest
        };

        self.remember(gradient, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const G_OLD: [f64; 2] = [1.0, 2.0];
    const G_NEW: [f64; 2] = [3.0, -1.0];
    const D_OLD: [f64; 2] = [-1.0, -2.0];

    #[test]
    fn beta_formulas() {
        // y = [2, -3], ‖g_old‖² = 5, ‖g_new‖² = 10, g_new·y = 9, d_old·y = 4.
        let beta = |formula: Formula| formula.beta(&G_OLD, &G_NEW, &D_OLD);

        assert_relative_eq!(beta(Formula::FR), 2.0);
        assert_relative_eq!(beta(Formula::PR), 1.8);
        assert_relative_eq!(beta(Formula::PRAbs), 1.8);
        assert_relative_eq!(beta(Formula::PRPlus), 1.8);
        assert_relative_eq!(beta(Formula::HS), 2.25);
        assert_relative_eq!(beta(Formula::DY), 2.5);
        assert_relative_eq!(beta(Formula::FRPR), 1.8);

        // ‖y‖² = 13: v = y - 2·d·13/4 = [8.5, 10], v·g_new = 15.5.
        assert_relative_eq!(beta(Formula::HZ), 15.5 / 4.0);
    }

    #[test]
    fn pr_variants_handle_negative_pr() {
        // PR = g_new·(g_new - g_old) / ‖g_old‖² = (0.25 - 1) / 4 = -0.1875, FR = 0.0625.
        let g_old = [2.0, 0.0];
        let g_new = [0.5, 0.0];
        let d_old = [-2.0, 0.0];

        assert_relative_eq!(Formula::PR.beta(&g_old, &g_new, &d_old), -0.1875);
        assert_relative_eq!(Formula::PRAbs.beta(&g_old, &g_new, &d_old), 0.1875);
        assert_eq!(Formula::PRPlus.beta(&g_old, &g_new, &d_old), 0.0);
        assert_relative_eq!(Formula::FRPR.beta(&g_old, &g_new, &d_old), -0.0625);
    }

    #[test]
    fn restarts_when_gradients_are_not_orthogonal() {
        let mut cg = ConjugateGradient::default();
        let x = [0.0; 2];

        cg.initialize(&x, &[1.0, 0.0]);

        // g_old·g_new / ‖g_new‖² = 0.5 / 0.5 = 1 ≥ 0.1.
        let d = cg.next(&x, &[0.5, 0.5]);
        assert_eq!(d, [-0.5, -0.5]);
    }

    #[test]
    fn applies_beta_when_nearly_orthogonal() {
        let mut cg = ConjugateGradient::new(Formula::FR, 0.1).unwrap();
        let x = [0.0; 2];

        let d0 = cg.initialize(&x, &[2.0, 0.0]);
        assert_eq!(d0, [-2.0, 0.0]);

        // Orthogonal gradients, β = ‖g_new‖² / ‖g_old‖² = 1 / 4.
        let d1 = cg.next(&x, &[0.0, 1.0]);
        assert_relative_eq!(d1[0], -0.5);
        assert_relative_eq!(d1[1], -1.0);
    }

    #[test]
    fn non_finite_beta_restarts() {
        let mut cg = ConjugateGradient::new(Formula::DY, 0.1).unwrap();
        let x = [0.0; 2];

        cg.initialize(&x, &[0.0, 0.0]);
        let d = cg.next(&x, &[0.0, 1.0]);

        assert_eq!(d, [-0.0, -1.0]);
    }

    #[test]
    fn dimension_change_reinitializes() {
        let mut cg = ConjugateGradient::default();
        cg.initialize(&[0.0; 3], &[1.0, 1.0, 1.0]);

        assert_eq!(cg.next(&[0.0; 2], &[0.0, 2.0]), [-0.0, -2.0]);
    }

    #[test]
    fn rejects_negative_restart() {
        assert_eq!(
            ConjugateGradient::new(Formula::PR, -0.1),
            Err(ConfigError::Restart)
        );
    }
}
