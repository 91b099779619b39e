use super::*;

/// Velocity-verlet integrator
pub struct Verlet {}

impl Verlet {
    /// Steps the velocities of the simulation by half a timestep
    fn increment_velocity_halfstep<A: AtomicPotential>(simulation: &mut Simulation<A>) {
        let half_ts = 0.5 * simulation.timestep();
        let atoms = &mut simulation.atoms;
        for i in 0..atoms.num_atoms() {
            let increment = atoms.accelerations[i] * half_ts;
            atoms.increment_velocity(i, increment);
        }
    }
    /// Steps the positions forward, wrapping them into the box and counting
    /// the momentum carried through its faces
    fn increment_positions<A: AtomicPotential>(simulation: &mut Simulation<A>) {
        let ts = simulation.timestep();
        let atoms = &mut simulation.atoms;
        let container = &simulation.container;
        let flux = &mut simulation.accumulators.flux;
        for i in 0..atoms.num_atoms() {
            let displacement =
                atoms.velocities[i] * ts + atoms.accelerations[i] * (0.5 * ts * ts);
            let momentum = atoms.momentum(i);
            atoms.positions[i] =
                container.wrap_tracking_flux(atoms.positions[i] + displacement, momentum, flux);
            atoms.unwrapped[i] += displacement;
        }
        simulation.accumulators.flux_steps += 1;
        simulation.distances.invalidate();
    }
}

impl<A: AtomicPotential> Integrator<A> for Verlet {
    fn pre_force(simulation: &mut Simulation<A>) {
        Verlet::increment_positions(simulation);
        Verlet::increment_velocity_halfstep(simulation);
    }
    fn post_force(simulation: &mut Simulation<A>) {
        Verlet::increment_velocity_halfstep(simulation);
    }
}
