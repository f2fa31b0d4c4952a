//! Text trace observer.
//!
//! See [`Trace`].

use std::io;

use descent_core::{Observer, vector};

use crate::traits::{HasGradient, HasIterate, HasIteration, HasObjective};

/// An observer that writes one line per event to a writer.
///
/// `N` is the problem dimension, usually inferred from the solver call.
///
/// Each line holds the iteration, the objective value and the gradient norm,
/// optionally followed by the iterate:
///
/// ```text
///     3  f = 1.234568e-2  |g| = 4.567e-1
/// ```
///
/// Observers cannot fail, so the first write error is stored and all later
/// events are ignored; check [`Trace::error`] after the run.
#[derive(Debug)]
pub struct Trace<W, const N: usize> {
    writer: W,
    show_iterate: bool,
    error: Option<io::Error>,
}

impl<W: io::Write, const N: usize> Trace<W, N> {
    /// Creates a trace that writes to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            show_iterate: false,
            error: None,
        }
    }

    /// Appends the iterate to every line.
    #[must_use]
    pub fn with_iterate(self) -> Self {
        Self {
            show_iterate: true,
            ..self
        }
    }

    /// Returns the first write error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    /// Consumes the trace, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes the line for `event`.
    pub fn write<E>(&mut self, event: &E)
    where
        E: HasIteration + HasIterate<N> + HasObjective + HasGradient<N>,
    {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.write_line(event) {
            self.error = Some(error);
        }
    }

    fn write_line<E>(&mut self, event: &E) -> io::Result<()>
    where
        E: HasIteration + HasIterate<N> + HasObjective + HasGradient<N>,
    {
        write!(
            self.writer,
            "{:>5}  f = {:.6e}  |g| = {:.3e}",
            event.iteration(),
            event.objective(),
            vector::norm(event.gradient()),
        )?;
        if self.show_iterate {
            write!(self.writer, "  x = {:?}", event.iterate())?;
        }
        writeln!(self.writer)
    }
}

impl<W: io::Write, E, const N: usize> Observer<E> for Trace<W, N>
where
    E: HasIteration + HasIterate<N> + HasObjective + HasGradient<N>,
{
    fn observe(&mut self, event: &E) {
        self.write(event);
    }
}

/// Allows `&mut Trace<W, N>` to be passed to solvers that take an observer by
/// value.
impl<W: io::Write, E, const N: usize> Observer<E> for &mut Trace<W, N>
where
    E: HasIteration + HasIterate<N> + HasObjective + HasGradient<N>,
{
    fn observe(&mut self, event: &E) {
        (*self).write(event);
    }
}
