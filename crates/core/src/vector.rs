//! Dense vector helpers over fixed-size arrays.
//!
//! Solvers work with points and gradients as `[f64; N]`. These functions keep
//! the arithmetic in one place so each algorithm reads like its formula.

/// Returns the dot product `a · b`.
#[must_use]
pub fn dot<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Returns the squared Euclidean norm `‖v‖²`.
#[must_use]
pub fn norm_squared<const N: usize>(v: &[f64; N]) -> f64 {
    dot(v, v)
}

/// Returns the Euclidean norm `‖v‖`.
#[must_use]
pub fn norm<const N: usize>(v: &[f64; N]) -> f64 {
    norm_squared(v).sqrt()
}

/// Returns `x + alpha * d`.
#[must_use]
pub fn axpy<const N: usize>(x: &[f64; N], alpha: f64, d: &[f64; N]) -> [f64; N] {
    std::array::from_fn(|i| x[i] + alpha * d[i])
}

/// Returns `a - b`.
#[must_use]
pub fn sub<const N: usize>(a: &[f64; N], b: &[f64; N]) -> [f64; N] {
    std::array::from_fn(|i| a[i] - b[i])
}

/// Returns `alpha * v`.
#[must_use]
pub fn scale<const N: usize>(alpha: f64, v: &[f64; N]) -> [f64; N] {
    v.map(|x| alpha * x)
}

/// Returns `-v`.
#[must_use]
pub fn neg<const N: usize>(v: &[f64; N]) -> [f64; N] {
    v.map(|x| -x)
}

/// Returns `true` if every component is finite.
#[must_use]
pub fn is_finite<const N: usize>(v: &[f64; N]) -> bool {
    v.iter().all(|x| x.is_finite())
}
