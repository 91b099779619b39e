mod cubic;
mod diamond;
mod fcc;

pub use cubic::Cubic;
pub use diamond::Diamond;
pub use fcc::FaceCentered;

use log::info;
use rand::Rng;

use crate::{
    atoms::Atoms,
    container::Container,
    error::{Error, Result},
    species::Composition,
    utils::Vec3,
};

/// A cubic Bravais lattice with a basis
pub trait Lattice {
    /// Fractional coordinates of the sites in one unit cell
    fn basis(&self) -> &[[f64; 3]];

    /// Site coordinates of `cells` unit cells of edge `a` along every axis
    fn coords(&self, cells: usize, a: f64) -> Vec<Vec3> {
        let basis = self.basis();
        let mut coords = Vec::with_capacity(basis.len() * cells * cells * cells);
        for i in 0..cells {
            for j in 0..cells {
                for k in 0..cells {
                    let origin = Vec3::new(i as f64, j as f64, k as f64);
                    for site in basis {
                        coords.push((origin + Vec3::from(*site)) * a);
                    }
                }
            }
        }
        coords
    }
}

/// Fill `cells`³ unit cells with the primary species of `composition`, then
/// relabel random sites until the secondary species holds its share.
pub fn build<L: Lattice, R: Rng>(
    lattice: &L,
    cells: usize,
    composition: &Composition,
    rng: &mut R,
) -> Result<(Atoms, Container)> {
    if cells == 0 {
        return Err(Error::EmptyLattice);
    }
    let a = composition.lattice_constant();
    let container = Container::cubic(cells as f64 * a);

    let mut atoms = Atoms::new(composition.species());
    atoms.add_atoms(0, lattice.coords(cells, a));

    if let Some((secondary, fraction)) = composition.secondary() {
        let total = atoms.num_atoms();
        let target = ((total as f64) * fraction).round() as usize;
        let mut relabelled = 0;
        while relabelled < target {
            let i = rng.gen_range(0..total);
            if atoms.types[i] == 1 {
                continue;
            }
            atoms.set_type(i, 1);
            relabelled += 1;
        }
        info!(
            "Relabelled {} of {} sites to {}",
            relabelled, total, secondary
        );
    }

    info!(
        "Built {} atoms in a box of {:.4e} m (a = {:.4e} m)",
        atoms.num_atoms(),
        container.length(),
        a
    );
    Ok((atoms, container))
}
