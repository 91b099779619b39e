//! Molecular dynamics of covalent crystals and alloys under a Tersoff
//! bond-order potential, with periodic boundaries and trajectory statistics.
pub mod atomic;
pub mod atoms;
pub mod compute;
pub mod constants;
pub mod container;
pub mod diagnostics;
pub mod error;
pub mod integrators;
pub mod lattice;
pub mod neighbor;
pub mod output;
pub mod prelude;
pub mod region;
pub mod settings;
pub mod simulation;
pub mod species;
pub mod utils;

pub use atomic::*;
pub use atoms::Atoms;
pub use compute::Compute;
pub use container::Container;
pub use error::{Error, Result};
pub use integrators::*;
pub use neighbor::NeighborList;
pub use output::{Output, OutputSpec, Value};
pub use settings::{Settings, Thermostat};
pub use simulation::{AtomItem, RunSummary, Simulation};
pub use species::{Composition, Species};
