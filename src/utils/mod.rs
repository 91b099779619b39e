/// Group of useful computations
pub mod computations;
mod direction;
mod vec3;

pub use computations::*;
pub use direction::Axis;
pub use vec3::Vec3;
