//! Line searches: choosing how far to move along a descent direction.
//!
//! A line search sees the objective only through a [`LineFunction`], the
//! one-dimensional restriction `φ(α) = f(x + α·d)` with `φ'(0) < 0`, and
//! returns a positive [`Step`]. Running out of budget is reported through
//! [`StepStatus::Exhausted`], never as an error; only failures of the
//! function itself are errors.
//!
//! # Searches
//!
//! - [`StrongWolfe`] — sufficient decrease plus the strong curvature
//!   condition, with a bracketing phase and a zoom phase
//! - [`Backtracking`] — sufficient decrease only
//! - [`Goldstein`] — decrease bounded above and below
//! - [`Exact`] — brackets the minimum along the ray and refines it
//! - [`Constant`] — a fixed step
//!
//! [`Policy`] selects among them at runtime.

mod backtracking;
mod constant;
mod exact;
mod goldstein;
mod initial_step;
mod interpolate;
mod line;
mod policy;
mod step;
mod strong_wolfe;

pub use backtracking::Backtracking;
pub use constant::Constant;
pub use exact::{Exact, Refiner};
pub use goldstein::Goldstein;
pub use initial_step::{FirstOrder, InitialStep};
pub use line::{FnLine, Line, LineFunction};
pub use policy::Policy;
pub use step::{Step, StepStatus};
pub use strong_wolfe::StrongWolfe;

use thiserror::Error;

/// A strategy for choosing a step length along a descent direction.
pub trait LineSearch {
    /// Finds a step along `line`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the line function fails.
    fn search<L: LineFunction>(&mut self, line: &mut L) -> Result<Step, L::Error>;

    /// Forgets state carried between searches, such as initial-step history.
    fn reset(&mut self) {}
}

/// Errors that can occur when configuring a line search.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("initial step must be finite and positive")]
    InitialStep,

    #[error("minimum step must be finite, positive, and no larger than the initial step")]
    MinStep,

    #[error("maximum step must be finite and greater than the initial step")]
    MaxStep,

    #[error("Wolfe constants must satisfy 0 < c1 < c2 < 1")]
    WolfeConstants,

    #[error("sufficient decrease constant is out of range")]
    SufficientDecrease,

    #[error("growth factor must be finite and greater than one")]
    Growth,

    #[error("shrink factor must be in (0, 1)")]
    Shrink,

    #[error("tol must be finite and positive")]
    Tol,
}

/// Whether `value` satisfies the sufficient-decrease condition at `alpha`.
///
/// Written so that a NaN value fails.
fn sufficient_decrease(value: f64, alpha: f64, origin: (f64, f64), c: f64) -> bool {
    let (f0, g0) = origin;
    value <= f0 + c * alpha * g0
}
