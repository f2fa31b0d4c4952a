//! Reusable observers for the descent optimizers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across different solvers.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasIteration`], [`HasIterate`], [`HasObjective`], [`HasGradient`])
//!
//! # Observers
//!
//! - [`History`] — records the iterate, value and gradient of every event
//! - [`Trace`] — writes one line per event to any [`std::io::Write`]
//!
//! [`Observer`]: descent_core::Observer
//! [`HasIteration`]: traits::HasIteration
//! [`HasIterate`]: traits::HasIterate
//! [`HasObjective`]: traits::HasObjective
//! [`HasGradient`]: traits::HasGradient

pub mod traits;

mod history;
mod trace;

pub use history::{History, Record};
pub use trace::Trace;
