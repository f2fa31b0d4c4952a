//! Search-direction strategies.
//!
//! A [`Direction`] turns the current iterate and gradient into a descent
//! direction. Strategies own their history (previous gradients, steps, or an
//! inverse-Hessian estimate) and rebuild it from scratch on
//! [`Direction::initialize`], which always returns steepest descent.
//!
//! History is heap-allocated and sized on first use, so a strategy value can
//! be configured without knowing the problem dimension.
//!
//! - [`SteepestDescent`] — `d = -g`
//! - [`ConjugateGradient`] — `d = -g + β·d_prev` with a choice of [`Formula`]
//! - [`Bfgs`] — `d = -H·g` with a dense inverse-Hessian estimate
//! - [`Lbfgs`] — `d = -H·g` from the last `m` step pairs
//!
//! [`Newton`] is not a [`Direction`]: it needs the Hessian at every iterate,
//! which the descent loop supplies through
//! [`crate::descent::minimize_newton`].

mod bfgs;
mod conjugate_gradient;
mod lbfgs;
mod newton;
mod steepest;
mod strategy;

pub use bfgs::{Bfgs, InitialHessian};
pub use conjugate_gradient::{ConjugateGradient, Formula};
pub use lbfgs::Lbfgs;
pub use newton::Newton;
pub use steepest::SteepestDescent;
pub use strategy::Strategy;

use thiserror::Error;

/// A rule for choosing search directions.
pub trait Direction {
    /// Discards all history and returns the first direction at `x`.
    fn initialize<const N: usize>(&mut self, x: &[f64; N], gradient: &[f64; N]) -> [f64; N];

    /// Returns the next direction after the iterate moved to `x`.
    fn next<const N: usize>(&mut self, x: &[f64; N], gradient: &[f64; N]) -> [f64; N];
}

/// Errors that can occur when configuring a direction strategy.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("restart threshold must be finite and non-negative")]
    Restart,

    #[error("memory must hold at least one step pair")]
    Memory,

    #[error("Hessian shift must be finite and positive")]
    Shift,

    #[error("Hessian shift growth must be finite and greater than one")]
    ShiftGrowth,

    #[error("maximum Hessian shift must be finite and above the initial shift")]
    MaxShift,
}

/// Views stored history as a fixed-size array, if its length matches.
fn as_array<const N: usize>(values: &[f64]) -> Option<&[f64; N]> {
    values.try_into().ok()
}
