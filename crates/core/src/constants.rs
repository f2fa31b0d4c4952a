//! Numerical constants shared across solvers.

/// The golden ratio: φ = (1 + √5) / 2
pub const PHI: f64 = 1.618_033_988_749_895;

/// The inverse golden ratio: 1/φ
///
/// This equals φ - 1 due to the golden ratio's unique property.
pub const INV_PHI: f64 = PHI - 1.0;

/// The golden section fraction: 1 - 1/φ ≈ 0.382.
pub const GOLDEN_SECTION: f64 = 1.0 - INV_PHI;

/// Square root of machine epsilon, the default scalar tolerance.
pub const SQRT_EPSILON: f64 = 1.490_116_119_384_765_6e-8;

/// Cube root of machine epsilon, the default central-difference step.
pub const CBRT_EPSILON: f64 = 6.055_454_452_393_343e-6;

/// Default tolerance on function, step, and gradient convergence tests.
pub const DEFAULT_TOL: f64 = 1e-8;

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn golden_ratio_identities() {
        assert_relative_eq!(PHI * PHI, PHI + 1.0, epsilon = 1e-15);
        assert_relative_eq!(INV_PHI, 1.0 / PHI, epsilon = 1e-15);
        assert_relative_eq!(GOLDEN_SECTION, INV_PHI * INV_PHI, epsilon = 1e-15);
    }

    #[test]
    fn epsilon_roots_match_machine_epsilon() {
        assert_relative_eq!(SQRT_EPSILON, f64::EPSILON.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(CBRT_EPSILON, f64::EPSILON.cbrt(), max_relative = 1e-12);
    }
}
