//! Statistics derived from the trajectory
pub mod msd;
pub mod rdf;
pub mod vacf;

pub use msd::{diffusion_least_squares, diffusion_two_point, mean_square_displacement, DiffusionEstimate};
pub use rdf::radial_distribution;
pub use vacf::{Autocorrelation, VelocityHistory};
