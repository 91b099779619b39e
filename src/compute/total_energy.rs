use super::*;

pub(crate) fn compute<A: AtomicPotential>(simulation: &Simulation<A>) -> f64 {
    kinetic_energy::compute(simulation) + potential_energy::compute(simulation)
}
