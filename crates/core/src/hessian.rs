use crate::{finite_difference::FiniteDifference, objective::Objective};

/// An objective that can also evaluate its Hessian.
///
/// Newton-type solvers need this; every other solver only needs
/// [`Objective`].
pub trait Hessian<const N: usize>: Objective<N> {
    /// Evaluates `∇²f(x)`, row by row.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller's function fails.
    fn hessian(&self, x: &[f64; N]) -> Result<[[f64; N]; N], Self::Error>;
}

/// An objective paired with an analytic Hessian.
#[derive(Debug, Clone, Copy)]
pub struct WithHessian<O, H> {
    objective: O,
    hessian: H,
}

impl<O, H> WithHessian<O, H> {
    pub fn new(objective: O, hessian: H) -> Self {
        Self { objective, hessian }
    }
}

impl<O, H, const N: usize> Objective<N> for WithHessian<O, H>
where
    O: Objective<N>,
{
    type Error = O::Error;

    fn value(&self, x: &[f64; N]) -> Result<f64, Self::Error> {
        self.objective.value(x)
    }

    fn gradient(&self, x: &[f64; N]) -> Result<[f64; N], Self::Error> {
        self.objective.gradient(x)
    }

    fn value_and_gradient(&self, x: &[f64; N]) -> Result<(f64, [f64; N]), Self::Error> {
        self.objective.value_and_gradient(x)
    }

    fn directional_derivative(&self, x: &[f64; N], d: &[f64; N]) -> Result<f64, Self::Error> {
        self.objective.directional_derivative(x, d)
    }
}

impl<O, H, const N: usize> Hessian<N> for WithHessian<O, H>
where
    O: Objective<N>,
    H: Fn(&[f64; N]) -> Result<[[f64; N]; N], O::Error>,
{
    fn hessian(&self, x: &[f64; N]) -> Result<[[f64; N]; N], Self::Error> {
        (self.hessian)(x)
    }
}

/// An objective whose Hessian is approximated by differencing its gradient.
///
/// Uses central differences unless another scheme is set. See
/// [`FiniteDifference::hessian`] for the cost.
#[derive(Debug, Clone, Copy)]
pub struct ApproxHessian<O> {
    objective: O,
    finite_difference: FiniteDifference,
}

impl<O> ApproxHessian<O> {
    pub fn new(objective: O) -> Self {
        Self {
            objective,
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

impl<O, const N: usize> Objective<N> for ApproxHessian<O>
where
    O: Objective<N>,
{
    type Error = O::Error;

    fn value(&self, x: &[f64; N]) -> Result<f64, Self::Error> {
        self.objective.value(x)
    }

    fn gradient(&self, x: &[f64; N]) -> Result<[f64; N], Self::Error> {
        self.objective.gradient(x)
    }

    fn value_and_gradient(&self, x: &[f64; N]) -> Result<(f64, [f64; N]), Self::Error> {
        self.objective.value_and_gradient(x)
    }

    fn directional_derivative(&self, x: &[f64; N], d: &[f64; N]) -> Result<f64, Self::Error> {
        self.objective.directional_derivative(x, d)
    }
}

impl<O, const N: usize> Hessian<N> for ApproxHessian<O>
where
    O: Objective<N>,
{
    fn hessian(&self, x: &[f64; N]) -> Result<[[f64; N]; N], Self::Error> {
        let gx = self.objective.gradient(x)?;
        self.finite_difference
            .hessian(|y: &[f64; N]| self.objective.gradient(y), x, &gx)
    }
}
