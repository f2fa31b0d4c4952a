use descent_core::{Objective, vector};

/// A function restricted to a ray, `φ(α) = f(x + α·d)`.
///
/// Line searches only see this one-dimensional view. The value and slope at
/// `α = 0` are known up front.
pub trait LineFunction {
    type Error;

    /// Returns `(φ(0), φ'(0))`.
    fn origin(&self) -> (f64, f64);

    /// Evaluates `φ(α)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying function fails.
    fn value(&mut self, alpha: f64) -> Result<f64, Self::Error>;

    /// Evaluates `φ(α)` and `φ'(α)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying function fails.
    fn value_and_slope(&mut self, alpha: f64) -> Result<(f64, f64), Self::Error>;
}

/// An [`Objective`] restricted to the ray from `x` along `d`.
///
/// The most recent value-and-gradient evaluation is kept, so the caller can
/// pick up the gradient at the accepted step without evaluating it again.
#[derive(Debug)]
pub struct Line<'a, O, const N: usize> {
    objective: &'a O,
    x: [f64; N],
    d: [f64; N],
    origin: (f64, f64),
    last: Option<Sample<N>>,
}

#[derive(Debug, Clone, Copy)]
struct Sample<const N: usize> {
    alpha: f64,
    value: f64,
    gradient: [f64; N],
}

impl<'a, O: Objective<N>, const N: usize> Line<'a, O, N> {
    /// Creates a line from a point whose value and gradient are already known.
    pub fn new(objective: &'a O, x: [f64; N], d: [f64; N], value: f64, gradient: &[f64; N]) -> Self {
        Self {
            objective,
            x,
            d,
            origin: (value, vector::dot(gradient, &d)),
            last: None,
        }
    }

    /// Creates a line, evaluating the objective at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the objective fails at `x`.
    pub fn evaluate(objective: &'a O, x: [f64; N], d: [f64; N]) -> Result<Self, O::Error> {
        let (value, gradient) = objective.value_and_gradient(&x)?;
        Ok(Self::new(objective, x, d, value, &gradient))
    }

    /// Returns `x + α·d`.
    #[must_use]
    pub fn point(&self, alpha: f64) -> [f64; N] {
        vector::axpy(&self.x, alpha, &self.d)
    }

    /// Returns the search direction.
    #[must_use]
    pub fn direction(&self) -> &[f64; N] {
        &self.d
    }

    /// Returns the value and gradient at `α` if that was the last point
    /// evaluated with its slope.
    #[must_use]
    pub fn evaluated_at(&self, alpha: f64) -> Option<(f64, [f64; N])> {
        self.last
            .filter(|sample| sample.alpha == alpha)
            .map(|sample| (sample.value, sample.gradient))
    }
}

impl<O: Objective<N>, const N: usize> LineFunction for Line<'_, O, N> {
    type Error = O::Error;

    fn origin(&self) -> (f64, f64) {
        self.origin
    }

    fn value(&mut self, alpha: f64) -> Result<f64, O::Error> {
        self.objective.value(&self.point(alpha))
    }

    fn value_and_slope(&mut self, alpha: f64) -> Result<(f64, f64), O::Error> {
        let (value, gradient) = self.objective.value_and_gradient(&self.point(alpha))?;
        self.last = Some(Sample {
            alpha,
            value,
            gradient,
        });
        Ok((value, vector::dot(&gradient, &self.d)))
    }
}

/// A line given directly as a scalar function returning `(φ(α), φ'(α))`.
#[derive(Debug, Clone)]
pub struct FnLine<F> {
    function: F,
    origin: (f64, f64),
}

impl<F, E> FnLine<F>
where
    F: FnMut(f64) -> Result<(f64, f64), E>,
{
    /// Wraps `function`, evaluating it at `α = 0`.
    ///
    /// # Errors
    ///
    /// Returns an error if `function` fails at zero.
    pub fn new(mut function: F) -> Result<Self, E> {
        let origin = function(0.0)?;
        Ok(Self { function, origin })
    }
}

impl<F, E> LineFunction for FnLine<F>
where
    F: FnMut(f64) -> Result<(f64, f64), E>,
{
    type Error = E;

    fn origin(&self) -> (f64, f64) {
        self.origin
    }

    fn value(&mut self, alpha: f64) -> Result<f64, E> {
        (self.function)(alpha).map(|(value, _)| value)
    }

    fn value_and_slope(&mut self, alpha: f64) -> Result<(f64, f64), E> {
        (self.function)(alpha)
    }
}
