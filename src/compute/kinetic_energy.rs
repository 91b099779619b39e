use super::*;

/// Kinetic energy (eV)
pub(crate) fn compute<A: AtomicPotential>(simulation: &Simulation<A>) -> f64 {
    simulation.accumulators().kinetic_energy / EV
}

/// `0.5 sum m v^2` straight from the velocities (J)
pub(crate) fn from_velocities(atoms: &Atoms) -> f64 {
    0.5 * atoms.mass_weighted_vsq()
}
