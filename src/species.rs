use std::{fmt, str::FromStr};

use crate::{
    atomic::TersoffParams,
    constants::{AMU, NM},
    error::{Error, Result},
};

/// Tolerance on the sum of the fractions of a composition
const FRACTION_TOLERANCE: f64 = 1e-9;

/// Chemical species with their per-atom constants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Species {
    Ge,
    Sn,
    Si,
}
impl Species {
    /// Atomic mass (kg)
    pub fn mass(&self) -> f64 {
        AMU * match self {
            Species::Ge => 72.630,
            Species::Sn => 118.710,
            Species::Si => 28.0855,
        }
    }
    /// Natural diamond-cubic lattice constant (m)
    pub fn lattice_constant(&self) -> f64 {
        NM * match self {
            Species::Ge => 0.5658,
            Species::Sn => 0.6489,
            Species::Si => 0.5431,
        }
    }
    pub fn tersoff_params(&self) -> TersoffParams {
        // A, B (eV); lambda1, lambda2 (1/nm); beta, n, c, d, h; R, S (nm)
        match self {
            Species::Ge => TersoffParams::new(
                1769.0, 419.23, 24.451, 17.047, 9.01e-7, 0.75627, 106430.0, 15.65, -0.43884,
                0.28, 0.31,
            ),
            Species::Sn => TersoffParams::new(
                520.4677, 281.4117, 15.5, 12.5649, 6.01e-7, 0.74, 1.4e5, 14.5, -0.502, 0.30,
                0.34,
            ),
            Species::Si => TersoffParams::new(
                1830.8, 471.18, 24.799, 17.322, 1.1e-6, 0.78734, 100390.0, 16.217, -0.59825, 0.27,
                0.30,
            ),
        }
    }
    pub fn symbol(&self) -> &'static str {
        match self {
            Species::Ge => "Ge",
            Species::Sn => "Sn",
            Species::Si => "Si",
        }
    }
}
impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbol().fmt(f)
    }
}
impl FromStr for Species {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ge" => Ok(Species::Ge),
            "sn" => Ok(Species::Sn),
            "si" => Ok(Species::Si),
            _ => Err(Error::UnknownSpecies { tag: s.to_string() }),
        }
    }
}

/// Species present in a system and their fractions.
///
/// The first component is the primary species the lattice is filled with,
/// the optional second one replaces a fraction of its sites.
#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    components: Vec<(Species, f64)>,
}
impl Composition {
    pub fn new(components: Vec<(Species, f64)>) -> Result<Self> {
        if components.is_empty() || components.len() > 2 {
            return Err(Error::ComponentCount {
                found: components.len(),
            });
        }
        for &(species, fraction) in &components {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(Error::InvalidFraction {
                    species: species.to_string(),
                    fraction,
                });
            }
        }
        let sum: f64 = components.iter().map(|c| c.1).sum();
        if (sum - 1.0).abs() > FRACTION_TOLERANCE {
            return Err(Error::FractionSum { sum });
        }
        Ok(Self { components })
    }
    pub fn pure(species: Species) -> Self {
        Self {
            components: vec![(species, 1.0)],
        }
    }
    pub fn binary(
        primary: Species,
        primary_fraction: f64,
        secondary: Species,
        secondary_fraction: f64,
    ) -> Result<Self> {
        Self::new(vec![
            (primary, primary_fraction),
            (secondary, secondary_fraction),
        ])
    }

    pub fn components(&self) -> &[(Species, f64)] {
        &self.components
    }
    /// Species in type-index order
    pub fn species(&self) -> Vec<Species> {
        self.components.iter().map(|c| c.0).collect()
    }
    pub fn primary(&self) -> Species {
        self.components[0].0
    }
    pub fn secondary(&self) -> Option<(Species, f64)> {
        self.components.get(1).copied()
    }
    /// Lattice constant of the mixture by Vegard's law
    pub fn lattice_constant(&self) -> f64 {
        self.components
            .iter()
            .map(|(species, fraction)| species.lattice_constant() * fraction)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vegard_law_mixes_linearly() {
        let c = Composition::binary(Species::Ge, 0.75, Species::Sn, 0.25).unwrap();
        let expected = 0.75 * Species::Ge.lattice_constant() + 0.25 * Species::Sn.lattice_constant();
        assert_relative_eq!(c.lattice_constant(), expected);
        assert_relative_eq!(
            Composition::pure(Species::Si).lattice_constant(),
            Species::Si.lattice_constant()
        );
    }

    #[test]
    fn fractions_should_sum_to_one() {
        let err = Composition::binary(Species::Ge, 0.6, Species::Sn, 0.6).unwrap_err();
        assert!(matches!(err, Error::FractionSum { .. }));
        assert!(err.is_configuration());
        assert!(Composition::binary(Species::Ge, 1.2, Species::Sn, -0.2).is_err());
        assert!(Composition::new(Vec::new()).is_err());
    }

    #[test]
    fn species_parse_from_symbol() {
        assert_eq!("ge".parse::<Species>().unwrap(), Species::Ge);
        assert_eq!(" Sn ".parse::<Species>().unwrap(), Species::Sn);
        assert_eq!(
            "Xx".parse::<Species>().unwrap_err(),
            Error::UnknownSpecies {
                tag: "Xx".to_string()
            }
        );
    }
}
