use super::Lattice;

/// Simple cubic lattice, one site per cell
#[derive(Clone, Copy, Debug, Default)]
pub struct Cubic;

impl Lattice for Cubic {
    fn basis(&self) -> &[[f64; 3]] {
        &[[0.0, 0.0, 0.0]]
    }
}
