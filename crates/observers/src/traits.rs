//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event types, enabling observers
//! to work generically across different solvers.
//!
//! - [`HasIteration`] — events that know which iteration they belong to
//! - [`HasIterate`] — events that carry the current point
//! - [`HasObjective`] — events that carry an objective value
//! - [`HasGradient`] — events that carry the gradient at the current point
//!
//! # Example
//!
//! ```rust
//! use descent_core::Observer;
//! use descent_observers::traits::HasObjective;
//!
//! /// Tracks the lowest objective seen so far.
//! struct Lowest(f64);
//!
//! impl<E: HasObjective> Observer<E> for Lowest {
//!     fn observe(&mut self, event: &E) {
//!         self.0 = self.0.min(event.objective());
//!     }
//! }
//! ```

use descent_solvers::descent;

/// An event that belongs to a numbered iteration.
pub trait HasIteration {
    /// Returns the number of completed iterations when this event was emitted.
    fn iteration(&self) -> usize;
}

/// An event that carries the current point.
pub trait HasIterate<const N: usize> {
    /// Returns the point this event reports.
    fn iterate(&self) -> &[f64; N];
}

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective for this event.
    fn objective(&self) -> f64;
}

/// An event that carries a gradient.
pub trait HasGradient<const N: usize> {
    /// Returns the gradient at the point this event reports.
    fn gradient(&self) -> &[f64; N];
}

// --- descent::Event ---

impl<const N: usize> HasIteration for descent::Event<'_, N> {
    fn iteration(&self) -> usize {
        self.iter()
    }
}

impl<const N: usize> HasIterate<N> for descent::Event<'_, N> {
    fn iterate(&self) -> &[f64; N] {
        self.x()
    }
}

impl<const N: usize> HasObjective for descent::Event<'_, N> {
    fn objective(&self) -> f64 {
        self.value()
    }
}

impl<const N: usize> HasGradient<N> for descent::Event<'_, N> {
    fn gradient(&self) -> &[f64; N] {
        descent::Event::gradient(self)
    }
}
