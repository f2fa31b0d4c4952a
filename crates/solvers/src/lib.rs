//! Line-search optimizers for smooth objectives.
//!
//! # Modules
//!
//! - [`descent`] — the iteration loop, its configuration presets, and the
//!   events it emits
//! - [`direction`] — search directions: steepest descent, nonlinear conjugate
//!   gradient, BFGS, L-BFGS, and Newton
//! - [`line_search`] — step-length selection: Strong Wolfe, backtracking,
//!   Goldstein, exact, and constant
//! - [`scalar`] — one-dimensional bracketing, Brent, and golden section
//! - [`stop`] — stopping criteria and the status they report
//!
//! # Example
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use descent_core::ValueAndGradient;
//! use descent_solvers::descent::{self, Config};
//!
//! let objective = ValueAndGradient::new(
//!     |x: &[f64; 2]| Ok::<_, Infallible>((x[0] - 3.0).powi(2) + 2.0 * (x[1] + 1.0).powi(2)),
//!     |x: &[f64; 2]| Ok::<_, Infallible>([2.0 * (x[0] - 3.0), 4.0 * (x[1] + 1.0)]),
//! );
//!
//! let solution = descent::minimize_unobserved(&objective, [0.0, 0.0], &Config::bfgs()).unwrap();
//!
//! assert!(solution.status.is_converged());
//! assert!((solution.x[0] - 3.0).abs() < 1e-6);
//! assert!((solution.x[1] + 1.0).abs() < 1e-6);
//! ```

pub mod descent;
pub mod direction;
pub mod line_search;
pub mod scalar;
pub mod stop;
