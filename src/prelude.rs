pub use super::atomic::{AtomicPotential, None_, Tersoff};
pub use super::atoms::Atoms;
pub use super::compute::Compute;
pub use super::container::Container;
pub use super::error::{Error, Result};
pub use super::lattice::{Cubic, Diamond, FaceCentered, Lattice};
pub use super::region::{Rect, Region};
pub use super::settings::{Settings, Thermostat};
pub use super::simulation::{RunSummary, Simulation};
pub use super::species::{Composition, Species};
pub use super::utils::Vec3;
