//! Line-search descent for smooth multivariate objectives.
//!
//! # Algorithm
//!
//! Starting from `x0`, each iteration
//!
//! 1. asks the direction strategy for a descent direction `d`,
//! 2. runs the line search along `d` to get a step `α`,
//! 3. moves to `x + α·d` and evaluates the value and gradient there,
//! 4. updates the stopping criteria.
//!
//! A direction that is not a descent direction, or is not finite, is replaced
//! by steepest descent and the strategy's history is discarded. Sufficient
//! decrease is enforced only inside the line search.
//!
//! Gradient descent, nonlinear conjugate gradient, BFGS and L-BFGS are all
//! this loop with different strategies; see the [`Config`] presets. Newton's
//! method is the same loop with directions from the objective's Hessian; see
//! [`minimize_newton`].
//!
//! # Observer Events
//!
//! - [`Event::Started`] — once, at the starting point
//! - [`Event::Stepped`] — after every iteration
//! - [`Event::Finished`] — once, with the solution
//!
//! Observers cannot influence the run.

mod config;
mod error;
mod event;
mod search;
mod solution;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::Error;
pub use event::Event;
pub use solution::Solution;

pub use crate::stop::Status;

use descent_core::{Hessian, Objective, Observer};

use crate::{
    direction::{Direction, Newton},
    line_search::LineSearch,
    stop::Criteria,
};

/// Minimizes `objective` from `x0` with the strategies in `config`.
///
/// The configuration is not modified: each call starts from fresh copies of
/// its strategies, so repeated calls give identical results.
///
/// # Errors
///
/// Returns an error if the objective fails, or if it is not finite at `x0` or
/// at an accepted step.
pub fn minimize<O, Obs, const N: usize>(
    objective: &O,
    x0: [f64; N],
    config: &Config,
    observer: Obs,
) -> Result<Solution<N>, Error>
where
    O: Objective<N>,
    Obs: for<'a> Observer<Event<'a, N>>,
{
    let mut direction = config.direction().clone();
    let mut line_search = *config.line_search();
    search::search(
        objective,
        x0,
        search::Strategic(&mut direction),
        &mut line_search,
        config.criteria(),
        observer,
    )
}

/// Minimizes without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if the objective fails, or if it is not finite at `x0` or
/// at an accepted step.
pub fn minimize_unobserved<O, const N: usize>(
    objective: &O,
    x0: [f64; N],
    config: &Config,
) -> Result<Solution<N>, Error>
where
    O: Objective<N>,
{
    minimize(objective, x0, config, ())
}

/// Minimizes with caller-owned strategies.
///
/// Use this to plug in a custom [`Direction`] or [`LineSearch`], or to
/// inspect a strategy's state (such as the BFGS inverse Hessian) afterwards.
/// Both strategies are reset before the first iteration.
///
/// # Errors
///
/// Returns an error if the objective fails, or if it is not finite at `x0` or
/// at an accepted step.
pub fn minimize_with<O, D, L, Obs, const N: usize>(
    objective: &O,
    x0: [f64; N],
    direction: &mut D,
    line_search: &mut L,
    criteria: &Criteria,
    observer: Obs,
) -> Result<Solution<N>, Error>
where
    O: Objective<N>,
    D: Direction,
    L: LineSearch,
    Obs: for<'a> Observer<Event<'a, N>>,
{
    search::search(
        objective,
        x0,
        search::Strategic(direction),
        line_search,
        criteria,
        observer,
    )
}

/// Minimizes with Newton directions from the objective's Hessian.
///
/// Every iteration evaluates the Hessian at the current iterate and shifts it
/// until it is positive definite; see [`Newton`]. Wrap an objective without
/// an analytic Hessian in [`descent_core::ApproxHessian`].
///
/// # Errors
///
/// Returns an error if the objective or its Hessian fails, or if the
/// objective is not finite at `x0` or at an accepted step.
pub fn minimize_newton<O, L, Obs, const N: usize>(
    objective: &O,
    x0: [f64; N],
    newton: &Newton,
    line_search: &mut L,
    criteria: &Criteria,
    observer: Obs,
) -> Result<Solution<N>, Error>
where
    O: Hessian<N>,
    L: LineSearch,
    Obs: for<'a> Observer<Event<'a, N>>,
{
    search::search(
        objective,
        x0,
        search::Newtonian(newton),
        line_search,
        criteria,
        observer,
    )
}
