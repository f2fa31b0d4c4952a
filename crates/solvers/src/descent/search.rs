use descent_core::{Hessian, Objective, Observer, vector};

use crate::{
    direction::{Direction, Newton},
    line_search::{Line, LineSearch},
    stop::{Criteria, Stopping},
};

use super::{Error, Event, Solution};

/// Where the loop gets its search directions.
pub(super) trait Steering<O, const N: usize> {
    /// Returns the first direction of the run.
    fn first(
        &mut self,
        objective: &O,
        x: &[f64; N],
        gradient: &[f64; N],
    ) -> Result<[f64; N], Error>;

    /// Returns the direction after the iterate moved to `x`.
    fn next(
        &mut self,
        objective: &O,
        x: &[f64; N],
        gradient: &[f64; N],
    ) -> Result<[f64; N], Error>;

    /// Replaces a direction that was not a descent direction.
    fn restart(&mut self, x: &[f64; N], gradient: &[f64; N]) -> [f64; N];
}

/// Steers with a [`Direction`], which never needs the objective.
pub(super) struct Strategic<'d, D>(pub(super) &'d mut D);

impl<O, D: Direction, const N: usize> Steering<O, N> for Strategic<'_, D> {
    fn first(&mut self, _: &O, x: &[f64; N], gradient: &[f64; N]) -> Result<[f64; N], Error> {
        Ok(self.0.initialize(x, gradient))
    }

    fn next(&mut self, _: &O, x: &[f64; N], gradient: &[f64; N]) -> Result<[f64; N], Error> {
        Ok(self.0.next(x, gradient))
    }

    fn restart(&mut self, x: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        self.0.initialize(x, gradient)
    }
}

/// Steers with Newton directions from the objective's Hessian.
pub(super) struct Newtonian<'n>(pub(super) &'n Newton);

impl<O: Hessian<N>, const N: usize> Steering<O, N> for Newtonian<'_> {
    fn first(
        &mut self,
        objective: &O,
        x: &[f64; N],
        gradient: &[f64; N],
    ) -> Result<[f64; N], Error> {
        self.next(objective, x, gradient)
    }

    fn next(
        &mut self,
        objective: &O,
        x: &[f64; N],
        gradient: &[f64; N],
    ) -> Result<[f64; N], Error> {
        let hessian = objective.hessian(x).map_err(Error::objective)?;
        Ok(self.0.direction(&hessian, gradient))
    }

    fn restart(&mut self, _: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        vector::neg(gradient)
    }
}

/// Core descent loop shared by every entry point.
pub(super) fn search<O, S, L, Obs, const N: usize>(
    objective: &O,
    x0: [f64; N],
    mut steering: S,
    line_search: &mut L,
    criteria: &Criteria,
    mut observer: Obs,
) -> Result<Solution<N>, Error>
where
    O: Objective<N>,
    S: Steering<O, N>,
    L: LineSearch,
    Obs: for<'a> Observer<Event<'a, N>>,
{
    let (mut value, mut gradient) = objective.value_and_gradient(&x0).map_err(Error::objective)?;
    if !value.is_finite() || !vector::is_finite(&gradient) {
        return Err(Error::NonFiniteStart);
    }

    let mut x = x0;
    observer.observe(&Event::Started {
        x: &x,
        value,
        gradient: &gradient,
    });

    let mut stopping = Stopping::new(*criteria);
    let mut status = stopping.start(&gradient);

    line_search.reset();
    let mut d = [0.0; N];
    if status.is_running() {
        d = steering.first(objective, &x, &gradient)?;
        if !is_descent(&gradient, &d) {
            d = steering.restart(&x, &gradient);
        }
    }

    while status.is_running() {
        let mut line = Line::new(objective, x, d, value, &gradient);
        let step = line_search.search(&mut line).map_err(Error::objective)?;

        let x_new = line.point(step.alpha);
        let (value_new, gradient_new) = match line.evaluated_at(step.alpha) {
            Some(evaluated) => evaluated,
            None => objective
                .value_and_gradient(&x_new)
                .map_err(Error::objective)?,
        };
        if !value_new.is_finite() || !vector::is_finite(&gradient_new) {
            return Err(Error::NonFinite {
                iter: stopping.iters() + 1,
            });
        }

        status = stopping.update(&x, &x_new, value, value_new, &gradient_new);
        (x, value, gradient) = (x_new, value_new, gradient_new);

        observer.observe(&Event::Stepped {
            iter: stopping.iters(),
            x: &x,
            value,
            gradient: &gradient,
            step,
            status,
        });

        if status.is_running() {
            d = steering.next(objective, &x, &gradient)?;
            if !is_descent(&gradient, &d) {
                d = steering.restart(&x, &gradient);
            }
        }
    }

    let solution = Solution {
        status,
        x,
        value,
        gradient,
        iters: stopping.iters(),
    };
    observer.observe(&Event::Finished {
        solution: &solution,
    });

    Ok(solution)
}

/// Whether `d` is finite and points downhill.
fn is_descent<const N: usize>(gradient: &[f64; N], d: &[f64; N]) -> bool {
    vector::is_finite(d) && vector::dot(gradient, d) < 0.0
}
