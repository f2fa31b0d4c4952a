use super::Status;

/// The result of a descent run.
///
/// The last iterate is returned whatever the status; check [`Status`] to tell
/// convergence from running out of iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution<const N: usize> {
    /// Why the run stopped.
    pub status: Status,

    /// Final iterate.
    pub x: [f64; N],

    /// Objective value at `x`.
    pub value: f64,

    /// Gradient at `x`.
    pub gradient: [f64; N],

    /// Number of iterations performed.
    pub iters: usize,
}
