use super::Lattice;

/// Face-centred sites plus the interpenetrating tetrahedral sublattice
const DIAMOND_BASIS: [[f64; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [0.5, 0.0, 0.5],
    [0.0, 0.5, 0.5],
    [0.5, 0.5, 0.0],
    [0.25, 0.25, 0.25],
    [0.25, 0.75, 0.75],
    [0.75, 0.25, 0.75],
    [0.75, 0.75, 0.25],
];

/// Diamond-cubic lattice, eight sites per cell
#[derive(Clone, Copy, Debug, Default)]
pub struct Diamond;

impl Lattice for Diamond {
    fn basis(&self) -> &[[f64; 3]] {
        &DIAMOND_BASIS
    }
}
