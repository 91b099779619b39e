use super::{AtomicPotential, ForceContext, Interactions};
use crate::{atoms::Atoms, error::Result, neighbor::Distances, neighbor::NeighborList, utils::Vec3};

/// No interaction: atoms fly freely
#[derive(Clone, Copy, Debug, Default)]
pub struct None_ {}
impl None_ {
    pub fn new() -> Self {
        Self {}
    }
}
impl AtomicPotential for None_ {
    fn cutoff_distance(&self) -> f64 {
        0.0
    }
    fn site_energy(
        &self,
        _idx: usize,
        _atoms: &Atoms,
        _neighbor_list: &NeighborList,
        _distances: &dyn Distances,
    ) -> Result<f64> {
        Ok(0.0)
    }
    fn compute_forces(&self, ctx: &ForceContext) -> Result<Interactions> {
        Ok(Interactions {
            forces: vec![Vec3::default(); ctx.atoms.num_atoms()],
            potential_energy: 0.0,
            virial: 0.0,
        })
    }
}
