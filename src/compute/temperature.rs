use super::*;

/// Instantaneous temperature `2 KE / (3 N kB)` (K)
pub(crate) fn compute<A: AtomicPotential>(simulation: &Simulation<A>) -> f64 {
    let num_atoms = simulation.atoms.num_atoms();
    if num_atoms == 0 {
        return 0.0;
    }
    2.0 * simulation.accumulators().kinetic_energy / (3.0 * num_atoms as f64 * KB)
}
