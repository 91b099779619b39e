use super::*;

/// Mean squared speed (m²/s²)
pub(crate) fn compute<A: AtomicPotential>(simulation: &Simulation<A>) -> f64 {
    let num_atoms = simulation.atoms.num_atoms();
    if num_atoms == 0 {
        return 0.0;
    }
    simulation
        .atoms
        .velocities()
        .iter()
        .map(Vec3::norm_squared)
        .sum::<f64>()
        / num_atoms as f64
}
