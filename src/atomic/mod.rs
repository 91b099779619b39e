pub mod none;
pub mod tersoff;

pub use none::None_;
pub use tersoff::{Tersoff, TersoffParams};

use rayon::prelude::*;

use crate::{
    atoms::Atoms,
    container::Container,
    error::Result,
    neighbor::{Displaced, DistanceCache, Distances, NeighborList},
    utils::{Axis, Vec3},
};

/// Read-only view of the system needed to evaluate a potential
pub struct ForceContext<'a> {
    pub atoms: &'a Atoms,
    pub neighbor_list: &'a NeighborList,
    pub distances: &'a DistanceCache,
    pub container: &'a Container,
    /// Finite-difference step (m)
    pub displacement: f64,
}

/// Result of one potential evaluation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Interactions {
    /// Force on every atom (N)
    pub forces: Vec<Vec3>,
    /// Total potential energy (J)
    pub potential_energy: f64,
    /// `sum_i r_i . F_i` over wrapped positions (J)
    pub virial: f64,
}

/// Trait for many-body atomic potentials evaluated over a neighbor list
pub trait AtomicPotential: Sync {
    /// Get the maximum distance for effective interaction
    fn cutoff_distance(&self) -> f64;

    /// Number of atom types the potential has coefficients for, `None` if it
    /// treats every type alike
    fn num_types(&self) -> Option<usize> {
        None
    }

    /// Energy attributed to atom `idx` given the pair distances in `distances`
    fn site_energy(
        &self,
        idx: usize,
        atoms: &Atoms,
        neighbor_list: &NeighborList,
        distances: &dyn Distances,
    ) -> Result<f64>;

    /// Energy, forces and virial of the whole configuration.
    ///
    /// Forces come from central differences of the energy of each atom and
    /// its neighbor shell, with the neighbor topology held fixed.
    fn compute_forces(&self, ctx: &ForceContext) -> Result<Interactions> {
        let num_atoms = ctx.atoms.num_atoms();
        let site_energies = (0..num_atoms)
            .into_par_iter()
            .map(|i| self.site_energy(i, ctx.atoms, ctx.neighbor_list, ctx.distances))
            .collect::<Result<Vec<f64>>>()?;
        let forces = (0..num_atoms)
            .into_par_iter()
            .map(|i| central_difference(self, i, ctx))
            .collect::<Result<Vec<Vec3>>>()?;
        let virial = ctx
            .atoms
            .positions()
            .iter()
            .zip(&forces)
            .map(|(r, f)| r.dot(f))
            .sum();
        Ok(Interactions {
            forces,
            potential_energy: site_energies.iter().sum(),
            virial,
        })
    }
}

/// Energy of atom `idx` and its neighbor shell with `idx` moved to `position`
fn local_energy<A: AtomicPotential + ?Sized>(
    potential: &A,
    idx: usize,
    position: Vec3,
    ctx: &ForceContext,
) -> Result<f64> {
    let view = Displaced::new(
        ctx.distances,
        ctx.container,
        ctx.atoms.positions(),
        idx,
        position,
    );
    let mut energy = potential.site_energy(idx, ctx.atoms, ctx.neighbor_list, &view)?;
    for &j in ctx.neighbor_list.neighbors_of(idx) {
        energy += potential.site_energy(j, ctx.atoms, ctx.neighbor_list, &view)?;
    }
    Ok(energy)
}

/// `F = (E(x - d) - E(x + d)) / 2d` along every axis
fn central_difference<A: AtomicPotential + ?Sized>(
    potential: &A,
    idx: usize,
    ctx: &ForceContext,
) -> Result<Vec3> {
    let delta = ctx.displacement;
    let origin = ctx.atoms.positions[idx];
    let mut force = Vec3::default();
    for axis in Axis::ALL {
        let step = Vec3::unit(axis) * delta;
        let backward = local_energy(potential, idx, origin - step, ctx)?;
        let forward = local_energy(potential, idx, origin + step, ctx)?;
        force[axis.index()] = (backward - forward) / (2.0 * delta);
    }
    Ok(force)
}
