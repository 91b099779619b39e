use log::{debug, warn};
use rand::Rng;
use rand_distr::{Distribution, UnitSphere};

use crate::{
    atoms::Atoms,
    constants::KB,
    error::{Error, Result},
    utils::Vec3,
};

/// Scale every velocity so the kinetic energy matches `temperature`.
///
/// Returns the scale factor `sqrt(3 N kB T / sum m v^2)`.
pub fn rescale_velocities(atoms: &mut Atoms, temperature: f64) -> Result<f64> {
    let mvsq = atoms.mass_weighted_vsq();
    if mvsq == 0.0 {
        return Err(Error::DegenerateState);
    }
    let beta = (3.0 * atoms.num_atoms() as f64 * KB * temperature / mvsq).sqrt();
    atoms.velocities.iter_mut().for_each(|v| *v *= beta);
    debug!("Rescaled velocities by {:.6}", beta);
    Ok(beta)
}

/// Subtract the mean velocity until the velocity sum is below `tolerance`.
///
/// Returns the number of passes needed.
pub fn zero_momentum(atoms: &mut Atoms, tolerance: f64, max_iterations: usize) -> Result<usize> {
    let num_atoms = atoms.num_atoms();
    if num_atoms == 0 {
        return Ok(0);
    }
    let mut residual = atoms.velocity_sum().norm();
    let mut iterations = 0;
    while residual >= tolerance {
        if iterations == max_iterations {
            return Err(Error::MomentumNotConverged {
                iterations,
                residual,
            });
        }
        let mean = atoms.velocity_sum() / num_atoms as f64;
        atoms.velocities.iter_mut().for_each(|v| *v -= mean);
        residual = atoms.velocity_sum().norm();
        iterations += 1;
    }
    if iterations > 1 {
        warn!(
            "Momentum zeroing took {} passes (residual {:.3e})",
            iterations, residual
        );
    }
    Ok(iterations)
}

/// Give every atom the speed `sqrt(3 kB T / m)` in a uniformly random direction
pub fn random_velocities<R: Rng>(atoms: &mut Atoms, temperature: f64, rng: &mut R) {
    for i in 0..atoms.num_atoms() {
        let speed = (3.0 * KB * temperature / atoms.mass(i)).sqrt();
        let direction: [f64; 3] = UnitSphere.sample(rng);
        atoms.set_velocity(i, Vec3::from(direction) * speed);
    }
}
