use super::Lattice;

const FCC_BASIS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [0.5, 0.0, 0.5],
    [0.0, 0.5, 0.5],
    [0.5, 0.5, 0.0],
];

/// Face-centred cubic lattice, four sites per cell
#[derive(Clone, Copy, Debug, Default)]
pub struct FaceCentered;

impl Lattice for FaceCentered {
    fn basis(&self) -> &[[f64; 3]] {
        &FCC_BASIS
    }
}
