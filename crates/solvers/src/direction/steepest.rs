use descent_core::vector;

use super::Direction;

/// Steepest descent, `d = -g`. Keeps no history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SteepestDescent;

impl Direction for SteepestDescent {
    fn initialize<const N: usize>(&mut self, _x: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        vector::neg(gradient)
    }

    fn next<const N: usize>(&mut self, _x: &[f64; N], gradient: &[f64; N]) -> [f64; N] {
        vector::neg(gradient)
    }
}
