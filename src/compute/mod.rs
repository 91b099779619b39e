use std::{fmt, str::FromStr};

use crate::{
    atomic::AtomicPotential,
    atoms::Atoms,
    constants::{EV, KB},
    error::{Error, Result},
    simulation::Simulation,
    utils::Vec3,
};

pub(crate) mod avg_vsq;
pub(crate) mod kinetic_energy;
pub(crate) mod potential_energy;
pub(crate) mod pressure;
pub(crate) mod temperature;
pub(crate) mod total_energy;

/// Scalar observables of a simulation, selectable by name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compute {
    AvgVsq,
    KineticE,
    PotentialE,
    TotalE,
    Temperature,
    VirialPressure,
    ClausiusPressure,
    FluxPressure,
    Volume,
}
impl Compute {
    pub const ALL: [Compute; 9] = [
        Compute::AvgVsq,
        Compute::KineticE,
        Compute::PotentialE,
        Compute::TotalE,
        Compute::Temperature,
        Compute::VirialPressure,
        Compute::ClausiusPressure,
        Compute::FluxPressure,
        Compute::Volume,
    ];

    pub fn compute<A: AtomicPotential>(&self, simulation: &Simulation<A>) -> f64 {
        match self {
            Compute::AvgVsq => avg_vsq::compute(simulation),
            Compute::KineticE => kinetic_energy::compute(simulation),
            Compute::PotentialE => potential_energy::compute(simulation),
            Compute::TotalE => total_energy::compute(simulation),
            Compute::Temperature => temperature::compute(simulation),
            Compute::VirialPressure => pressure::virial(simulation),
            Compute::ClausiusPressure => pressure::clausius(simulation),
            Compute::FluxPressure => pressure::flux(simulation),
            Compute::Volume => simulation.container().volume(),
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Compute::AvgVsq => "avg_vsq",
            Compute::KineticE => "ke",
            Compute::PotentialE => "pe",
            Compute::TotalE => "etotal",
            Compute::Temperature => "temp",
            Compute::VirialPressure => "press",
            Compute::ClausiusPressure => "press_clausius",
            Compute::FluxPressure => "press_flux",
            Compute::Volume => "vol",
        }
    }
}
impl fmt::Display for Compute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}
impl FromStr for Compute {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Compute::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::UnknownCompute { key: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for c in Compute::ALL {
            assert_eq!(c.name().parse::<Compute>(), Ok(c));
        }
        assert_eq!(
            "pressure".parse::<Compute>(),
            Err(Error::UnknownCompute {
                key: "pressure".to_string()
            })
        );
    }
}
