//! Safeguarded polynomial interpolation used by the zoom phase.

/// A sampled point of the line function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Trial {
    pub(super) alpha: f64,
    pub(super) value: f64,
    pub(super) slope: f64,
}

/// Fraction of the interval kept clear at each end.
const MARGIN: f64 = 0.1;

/// Picks the next trial step strictly inside the interval spanned by `lo` and
/// `hi`.
///
/// Uses the cubic through both values and slopes when the slopes are finite,
/// otherwise the quadratic through both values and the slope at `lo`. A
/// result that is non-finite or within 10% of either end is replaced by the
/// midpoint.
pub(super) fn interpolate(lo: &Trial, hi: &Trial) -> f64 {
    let candidate = if lo.slope.is_finite() && hi.slope.is_finite() {
        cubic(lo, hi).or_else(|| quadratic(lo, hi))
    } else {
        quadratic(lo, hi)
    };

    let (left, right) = if lo.alpha < hi.alpha {
        (lo.alpha, hi.alpha)
    } else {
        (hi.alpha, lo.alpha)
    };
    let margin = MARGIN * (right - left);

    match candidate {
        Some(alpha) if alpha > left + margin && alpha < right - margin => alpha,
        _ => 0.5 * (left + right),
    }
}

/// Minimizer of the cubic matching values and slopes at both ends.
fn cubic(lo: &Trial, hi: &Trial) -> Option<f64> {
    let d1 = lo.slope + hi.slope - 3.0 * (lo.value - hi.value) / (lo.alpha - hi.alpha);
    let discriminant = d1 * d1 - lo.slope * hi.slope;
    if discriminant < 0.0 {
        return None;
    }

    let d2 = discriminant.sqrt().copysign(hi.alpha - lo.alpha);
    let alpha = hi.alpha
        - (hi.alpha - lo.alpha) * (hi.slope + d2 - d1) / (hi.slope - lo.slope + 2.0 * d2);

    alpha.is_finite().then_some(alpha)
}

/// Minimizer of the quadratic matching both values and the slope at `lo`.
fn quadratic(lo: &Trial, hi: &Trial) -> Option<f64> {
    let delta = hi.alpha - lo.alpha;
    let curvature = hi.value - lo.value - lo.slope * delta;
    let alpha = lo.alpha - lo.slope * delta * delta / (2.0 * curvature);

    (curvature > 0.0 && alpha.is_finite()).then_some(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn sample(f: impl Fn(f64) -> (f64, f64), alpha: f64) -> Trial {
        let (value, slope) = f(alpha);
        Trial {
            alpha,
            value,
            slope,
        }
    }

    #[test]
    fn cubic_is_exact_for_cubics() {
        // Local minimum of t³ - 3t at t = 1.
        let f = |t: f64| (t.powi(3) - 3.0 * t, 3.0 * t * t - 3.0);
        let lo = sample(f, 0.0);
        let hi = sample(f, 1.8);

        assert_relative_eq!(interpolate(&lo, &hi), 1.0, epsilon = 1e-12);
        assert_relative_eq!(interpolate(&hi, &lo), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn quadratic_when_slope_is_unknown() {
        let f = |t: f64| ((t - 0.7).powi(2), 2.0 * (t - 0.7));
        let lo = sample(f, 0.0);
        let mut hi = sample(f, 2.0);
        hi.slope = f64::NAN;

        assert_relative_eq!(interpolate(&lo, &hi), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn falls_back_to_bisection_near_ends() {
        let f = |t: f64| ((t - 0.01).powi(2), 2.0 * (t - 0.01));
        let lo = sample(f, 0.0);
        let hi = sample(f, 1.0);

        assert_relative_eq!(interpolate(&lo, &hi), 0.5);
    }

    #[test]
    fn falls_back_to_bisection_for_non_finite_values() {
        let lo = Trial {
            alpha: 0.0,
            value: 1.0,
            slope: -1.0,
        };
        let hi = Trial {
            alpha: 4.0,
            value: f64::INFINITY,
            slope: f64::NAN,
        };

        assert_relative_eq!(interpolate(&lo, &hi), 2.0);
    }
}
