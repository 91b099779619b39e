use thiserror::Error;

/// Error types
#[derive(Error, Clone, Debug, PartialEq)]
pub enum Error {
    // Configuration errors
    #[error("Lattice should contain at least one unit cell per axis")]
    EmptyLattice,

    #[error("Fraction {fraction} of {species} should lie within [0, 1]")]
    InvalidFraction { species: String, fraction: f64 },

    #[error("Species fractions should sum to 1, found {sum}")]
    FractionSum { sum: f64 },

    #[error("Composition should name one or two species, found {found}")]
    ComponentCount { found: usize },

    #[error("Unknown species '{tag}'")]
    UnknownSpecies { tag: String },

    #[error("Unknown compute '{key}'")]
    UnknownCompute { key: String },

    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    // Physics errors
    #[error("Cannot rescale velocities of a system with zero kinetic energy")]
    DegenerateState,

    #[error("Atoms {i} and {j} are {distance} m apart, too close to evaluate the potential")]
    NumericSingularity { i: usize, j: usize, distance: f64 },

    #[error("Net momentum did not vanish after {iterations} iterations (residual {residual})")]
    MomentumNotConverged { iterations: usize, residual: f64 },

    // Bookkeeping errors
    #[error("No valid cached distance between atoms {i} and {j}")]
    StaleDistance { i: usize, j: usize },

    #[error("Need {needed} samples, only {available} recorded")]
    InsufficientSamples { needed: usize, available: usize },

    #[error("Initial calculation should run before stepping")]
    NotInitialized,
}

impl Error {
    /// Whether the error comes from an invalid setup rather than the dynamics
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::EmptyLattice
                | Error::InvalidFraction { .. }
                | Error::FractionSum { .. }
                | Error::ComponentCount { .. }
                | Error::UnknownSpecies { .. }
                | Error::UnknownCompute { .. }
                | Error::InvalidSetting { .. }
                | Error::ThreadPool(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
