use super::*;

/// Virial pressure in the per-atom form `(KE + sum r.F / N) / 3V` (Pa)
pub(crate) fn virial<A: AtomicPotential>(simulation: &Simulation<A>) -> f64 {
    let acc = simulation.accumulators();
    let num_atoms = simulation.atoms.num_atoms().max(1) as f64;
    (acc.kinetic_energy + acc.virial / num_atoms) / (3.0 * simulation.container().volume())
}

/// Clausius virial pressure `(2 KE + sum r.F) / 3V` (Pa)
pub(crate) fn clausius<A: AtomicPotential>(simulation: &Simulation<A>) -> f64 {
    let acc = simulation.accumulators();
    (2.0 * acc.kinetic_energy + acc.virial) / (3.0 * simulation.container().volume())
}

/// Pressure from the momentum carried through the box faces since the last
/// flux reset (Pa)
pub(crate) fn flux<A: AtomicPotential>(simulation: &Simulation<A>) -> f64 {
    let acc = simulation.accumulators();
    if acc.flux_steps == 0 {
        return 0.0;
    }
    let l = simulation.container().length();
    let window = simulation.timestep() * acc.flux_steps as f64;
    (acc.flux.x + acc.flux.y + acc.flux.z) / (6.0 * l * l * window)
}
