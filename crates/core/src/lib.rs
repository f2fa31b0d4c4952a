//! Core traits and types for the descent optimizers.
//!
//! This crate defines the shared abstractions that solvers and observers
//! build on:
//!
//! - [`Objective`] — a smooth scalar function with a gradient, evaluated at
//!   points `x: [f64; N]`
//! - [`ValueOnly`], [`GradientOnly`], [`ValueAndGradient`], [`Joint`] —
//!   adapters that turn the calling conventions a caller happens to have into
//!   an [`Objective`]
//! - [`Hessian`] — the extra capability Newton's method needs, with the
//!   [`WithHessian`] and [`ApproxHessian`] adapters
//! - [`FiniteDifference`] — gradient synthesis for value-only objectives, and
//!   Hessian synthesis from gradients
//! - [`Observer`] — receives solver events
//! - [`vector`] and [`constants`] — small helpers shared by every solver

pub mod constants;
pub mod finite_difference;
mod hessian;
mod objective;
mod observer;
pub mod vector;

pub use finite_difference::{FiniteDifference, Scheme};
pub use hessian::{ApproxHessian, Hessian, WithHessian};
pub use objective::{GradientOnly, Joint, Objective, ValueAndGradient, ValueOnly};
pub use observer::Observer;
