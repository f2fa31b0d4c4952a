//! One-dimensional minimization.
//!
//! These routines work on a scalar function `f: ℝ → ℝ` that may fail with a
//! caller-defined error, which is propagated unchanged. They are the building
//! blocks of the exact line search, and are usable on their own.
//!
//! - [`Bracketing`] — expands outward from two points until a minimum is
//!   enclosed by a [`Bracket`]
//! - [`Brent`] — refines a bracket with inverse-parabolic interpolation and a
//!   golden-section fallback
//! - [`GoldenSection`] — derivative-free refinement with guaranteed linear
//!   convergence

pub mod bracket;
pub mod brent;
pub mod golden_section;

pub use bracket::{Bracket, Bracketing};
pub use brent::Brent;
pub use golden_section::GoldenSection;

/// The result of a one-dimensional refinement.
///
/// A result with `converged == false` is still the best point found; running
/// out of iterations is not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimum {
    /// Best abscissa found.
    pub x: f64,

    /// Function value at `x`.
    pub value: f64,

    /// Number of iterations performed.
    pub iters: usize,

    /// Whether the tolerance was met before the iteration limit.
    pub converged: bool,
}
