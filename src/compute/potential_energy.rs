use super::*;

/// Potential energy (eV)
pub(crate) fn compute<A: AtomicPotential>(simulation: &Simulation<A>) -> f64 {
    simulation.accumulators().potential_energy / EV
}
