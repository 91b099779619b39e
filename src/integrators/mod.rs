pub mod thermostat;
mod verlet;
pub use verlet::Verlet;

use crate::{atomic::AtomicPotential, simulation::Simulation};

/// Simulation integrator, as hooks around the force evaluation of a step
pub trait Integrator<A: AtomicPotential> {
    fn pre_force(_simulation: &mut Simulation<A>) {}
    fn post_force(_simulation: &mut Simulation<A>) {}
}
