//! Recording observer.
//!
//! See [`History`].

use descent_core::Observer;

use crate::traits::{HasGradient, HasIterate, HasIteration, HasObjective};

/// One observed event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record<const N: usize> {
    pub iter: usize,
    pub x: [f64; N],
    pub value: f64,
    pub gradient: [f64; N],
}

/// An observer that records the iterate, value and gradient of every event.
///
/// Pass `&mut History` as the solver observer and inspect it afterwards.
///
/// # Example
///
/// ```rust
/// use std::convert::Infallible;
///
/// use descent_core::Joint;
/// use descent_observers::History;
/// use descent_solvers::descent::{self, Config};
///
/// let objective = Joint::new(|x: &[f64; 1]| Ok::<_, Infallible>((x[0] * x[0], [2.0 * x[0]])));
///
/// let mut history = History::new();
/// let solution = descent::minimize(&objective, [3.0], &Config::bfgs(), &mut history).unwrap();
///
/// // `Started`, one record per iteration, and `Finished`.
/// assert_eq!(history.len(), solution.iters + 2);
/// assert_eq!(history.first().map(|record| record.x), Some([3.0]));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History<const N: usize> {
    records: Vec<Record<N>>,
}

impl<const N: usize> History<N> {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Records an event.
    pub fn record<E>(&mut self, event: &E)
    where
        E: HasIteration + HasIterate<N> + HasObjective + HasGradient<N>,
    {
        self.records.push(Record {
            iter: event.iteration(),
            x: *event.iterate(),
            value: event.objective(),
            gradient: *event.gradient(),
        });
    }

    #[must_use]
    pub fn records(&self) -> &[Record<N>] {
        &self.records
    }

    #[must_use]
    pub fn first(&self) -> Option<&Record<N>> {
        self.records.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Record<N>> {
        self.records.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the recorded objective values in order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|record| record.value)
    }

    /// Discards every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<const N: usize, E> Observer<E> for History<N>
where
    E: HasIteration + HasIterate<N> + HasObjective + HasGradient<N>,
{
    fn observe(&mut self, event: &E) {
        self.record(event);
    }
}

/// Allows `&mut History<N>` to be passed to solvers that take an observer
/// by value.
impl<const N: usize, E> Observer<E> for &mut History<N>
where
    E: HasIteration + HasIterate<N> + HasObjective + HasGradient<N>,
{
    fn observe(&mut self, event: &E) {
        (*self).record(event);
    }
}
