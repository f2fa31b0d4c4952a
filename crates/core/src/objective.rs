use std::error::Error;

use crate::{finite_difference::FiniteDifference, vector};

/// A smooth scalar function of `N` variables.
///
/// Implementors provide at least [`Objective::value`] and
/// [`Objective::gradient`]. The joint evaluation and the directional
/// derivative have defaults built from those two, which adapters override
/// when they can do better.
pub trait Objective<const N: usize> {
    type Error: Error + Send + Sync + 'static;

    /// Evaluates `f(x)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller's function fails.
    fn value(&self, x: &[f64; N]) -> Result<f64, Self::Error>;

    /// Evaluates `∇f(x)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller's function fails.
    fn gradient(&self, x: &[f64; N]) -> Result<[f64; N], Self::Error>;

    /// Evaluates `f(x)` and `∇f(x)` together.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller's function fails.
    fn value_and_gradient(&self, x: &[f64; N]) -> Result<(f64, [f64; N]), Self::Error> {
        Ok((self.value(x)?, self.gradient(x)?))
    }

    /// Evaluates `∇f(x) · d`.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller's function fails.
    fn directional_derivative(&self, x: &[f64; N], d: &[f64; N]) -> Result<f64, Self::Error> {
        Ok(vector::dot(&self.gradient(x)?, d))
    }
}

/// An objective given only by its value, with finite-difference derivatives.
#[derive(Debug, Clone, Copy)]
pub struct ValueOnly<F> {
    function: F,
    finite_difference: FiniteDifference,
}

impl<F> ValueOnly<F> {
    /// Wraps a value function using central differences.
    pub fn new(function: F) -> Self {
        Self {
            function,
            finite_difference: FiniteDifference::default(),
        }
    }

    /// Replaces the finite-difference scheme.
    #[must_use]
    pub fn with_finite_difference(self, finite_difference: FiniteDifference) -> Self {
        Self {
            finite_difference,
            ..self
        }
    }

    #[must_use]
    pub fn finite_difference(&self) -> FiniteDifference {
        self.finite_difference
    }
}

impl<F, E, const N: usize> Objective<N> for ValueOnly<F>
where
    F: Fn(&[f64; N]) -> Result<f64, E>,
    E: Error + Send + Sync + 'static,
{
    type Error = E;

    fn value(&self, x: &[f64; N]) -> Result<f64, E> {
        (self.function)(x)
    }

    fn gradient(&self, x: &[f64; N]) -> Result<[f64; N], E> {
        self.value_and_gradient(x).map(|(_, gradient)| gradient)
    }

    fn value_and_gradient(&self, x: &[f64; N]) -> Result<(f64, [f64; N]), E> {
        let value = (self.function)(x)?;
        let gradient = self
            .finite_difference
            .gradient(&self.function, x, value)?;
        Ok((value, gradient))
    }

    fn directional_derivative(&self, x: &[f64; N], d: &[f64; N]) -> Result<f64, E> {
        let value = (self.function)(x)?;
        self.finite_difference
            .directional(&self.function, x, d, value)
    }
}

/// An objective with separate value and gradient functions.
#[derive(Debug, Clone, Copy)]
pub struct ValueAndGradient<F, G> {
    value: F,
    gradient: G,
}

impl<F, G> ValueAndGradient<F, G> {
    pub fn new(value: F, gradient: G) -> Self {
        Self { value, gradient }
    }
}

impl<F, G, E, const N: usize> Objective<N> for ValueAndGradient<F, G>
where
    F: Fn(&[f64; N]) -> Result<f64, E>,
    G: Fn(&[f64; N]) -> Result<[f64; N], E>,
    E: Error + Send + Sync + 'static,
{
    type Error = E;

    fn value(&self, x: &[f64; N]) -> Result<f64, E> {
        (self.value)(x)
    }

    fn gradient(&self, x: &[f64; N]) -> Result<[f64; N], E> {
        (self.gradient)(x)
    }
}

/// Five-point Gauss-Legendre nodes and weights on `[0, 1]`.
const GAUSS_LEGENDRE: [(f64, f64); 5] = [
    (0.046_910_077_030_668_00, 0.118_463_442_528_094_54),
    (0.230_765_344_947_158_45, 0.239_314_335_249_683_23),
    (0.5, 0.284_444_444_444_444_45),
    (0.769_234_655_052_841_6, 0.239_314_335_249_683_23),
    (0.953_089_922_969_332, 0.118_463_442_528_094_54),
];

/// An objective given only by its gradient.
///
/// Values are recovered by integrating the gradient along the segment from
/// an anchor point `a` (the origin unless set):
///
/// ```text
/// f(x) - f(a) = ∫₀¹ ∇f(a + t(x - a)) · (x - a) dt
/// ```
///
/// using five-point Gauss-Legendre quadrature, so each value costs five
/// gradient evaluations. The reported value is therefore `f(x) - f(a)`: the
/// unknown constant `f(a)` shifts every value equally and does not change
/// which steps a line search accepts. The quadrature is exact, up to
/// round-off, when `f` is a polynomial of degree at most 10; otherwise its
/// error grows with `‖x - a‖`, so anchor near the region being searched.
#[derive(Debug, Clone, Copy)]
pub struct GradientOnly<G, const N: usize> {
    gradient: G,
    anchor: [f64; N],
}

impl<G, const N: usize> GradientOnly<G, N> {
    /// Wraps a gradient function, anchored at the origin.
    pub fn new(gradient: G) -> Self {
        Self {
            gradient,
            anchor: [0.0; N],
        }
    }

    /// Moves the anchor, usually to the starting point.
    #[must_use]
    pub fn with_anchor(self, anchor: [f64; N]) -> Self {
        Self { anchor, ..self }
    }

    #[must_use]
    pub fn anchor(&self) -> &[f64; N] {
        &self.anchor
    }
}

impl<G, E, const N: usize> Objective<N> for GradientOnly<G, N>
where
    G: Fn(&[f64; N]) -> Result<[f64; N], E>,
    E: Error + Send + Sync + 'static,
{
    type Error = E;

    fn value(&self, x: &[f64; N]) -> Result<f64, E> {
        if *x == self.anchor {
            return Ok(0.0);
        }

        let offset = vector::sub(x, &self.anchor);
        let mut sum = 0.0;
        for &(node, weight) in &GAUSS_LEGENDRE {
            let point = vector::axpy(&self.anchor, node, &offset);
            sum += weight * vector::dot(&(self.gradient)(&point)?, &offset);
        }
        Ok(sum)
    }

    fn gradient(&self, x: &[f64; N]) -> Result<[f64; N], E> {
        (self.gradient)(x)
    }
}

/// An objective whose value and gradient come from one function.
///
/// Asking for only one of them still evaluates both and discards the other.
#[derive(Debug, Clone, Copy)]
pub struct Joint<FG> {
    function: FG,
}

impl<FG> Joint<FG> {
    pub fn new(function: FG) -> Self {
        Self { function }
    }
}

impl<FG, E, const N: usize> Objective<N> for Joint<FG>
where
    FG: Fn(&[f64; N]) -> Result<(f64, [f64; N]), E>,
    E: Error + Send + Sync + 'static,
{
    type Error = E;

    fn value(&self, x: &[f64; N]) -> Result<f64, E> {
        (self.function)(x).map(|(value, _)| value)
    }

    fn gradient(&self, x: &[f64; N]) -> Result<[f64; N], E> {
        (self.function)(x).map(|(_, gradient)| gradient)
    }

    fn value_and_gradient(&self, x: &[f64; N]) -> Result<(f64, [f64; N]), E> {
        (self.function)(x)
    }
}
