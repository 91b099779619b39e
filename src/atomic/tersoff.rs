use std::f64::consts::PI;

use super::AtomicPotential;
use crate::{
    atoms::Atoms,
    constants::{EV, NM},
    error::{Error, Result},
    neighbor::{Distances, NeighborList},
    species::Species,
};

/// Pair distances below this fraction of the inner cutoff are treated as
/// coincident atoms
const SINGULAR_FRACTION: f64 = 1e-6;

/// Tersoff coefficients of one species or one species pair, in SI units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TersoffParams {
    a: f64,
    b: f64,
    lambda1: f64,
    lambda2: f64,
    beta: f64,
    n: f64,
    c: f64,
    d: f64,
    h: f64,
    r: f64,
    s: f64,
    // derived
    c2: f64,
    d2: f64,
}
impl TersoffParams {
    /// Energies in eV, inverse lengths in 1/nm and cutoffs in nm
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        a: f64,
        b: f64,
        lambda1: f64,
        lambda2: f64,
        beta: f64,
        n: f64,
        c: f64,
        d: f64,
        h: f64,
        r: f64,
        s: f64,
    ) -> Self {
        assert!(
            r > 0.0 && s > r,
            "Tersoff cutoffs should satisfy 0 < R < S, found R = {}, S = {}",
            r,
            s
        );
        Self::from_si(
            a * EV,
            b * EV,
            lambda1 / NM,
            lambda2 / NM,
            beta,
            n,
            c,
            d,
            h,
            r * NM,
            s * NM,
        )
    }
    #[allow(clippy::too_many_arguments)]
    fn from_si(
        a: f64,
        b: f64,
        lambda1: f64,
        lambda2: f64,
        beta: f64,
        n: f64,
        c: f64,
        d: f64,
        h: f64,
        r: f64,
        s: f64,
    ) -> Self {
        Self {
            a,
            b,
            lambda1,
            lambda2,
            beta,
            n,
            c,
            d,
            h,
            r,
            s,
            c2: c * c,
            d2: d * d,
        }
    }

    /// Parameters for a bond between two different species: geometric mean
    /// of the energies and cutoffs, arithmetic mean of everything else
    pub fn mixed(&self, other: &TersoffParams) -> Self {
        let geo = |x: f64, y: f64| (x * y).sqrt();
        let avg = |x: f64, y: f64| 0.5 * (x + y);
        Self::from_si(
            geo(self.a, other.a),
            geo(self.b, other.b),
            avg(self.lambda1, other.lambda1),
            avg(self.lambda2, other.lambda2),
            avg(self.beta, other.beta),
            avg(self.n, other.n),
            avg(self.c, other.c),
            avg(self.d, other.d),
            avg(self.h, other.h),
            geo(self.r, other.r),
            geo(self.s, other.s),
        )
    }

    /// Inner cutoff R (m)
    pub fn inner_cutoff(&self) -> f64 {
        self.r
    }
    /// Outer cutoff S (m)
    pub fn outer_cutoff(&self) -> f64 {
        self.s
    }

    /// Smooth cutoff function, 1 inside R and 0 beyond S
    pub fn cutoff(&self, r: f64) -> f64 {
        if r <= self.r {
            1.0
        } else if r >= self.s {
            0.0
        } else {
            0.5 + 0.5 * (PI * (r - self.r) / (self.s - self.r)).cos()
        }
    }
    pub fn attractive(&self, r: f64) -> f64 {
        self.a * (-self.lambda1 * r).exp()
    }
    pub fn repulsive(&self, r: f64) -> f64 {
        -self.b * (-self.lambda2 * r).exp()
    }
    /// Angular weight g(cos theta)
    pub fn angular(&self, cos_theta: f64) -> f64 {
        let hc = self.h - cos_theta;
        1.0 + self.c2 / self.d2 - self.c2 / (self.d2 + hc * hc)
    }
    /// Bond order b(zeta)
    pub fn bond_order(&self, zeta: f64) -> f64 {
        (1.0 + (self.beta * zeta).powf(self.n)).powf(-0.5 / self.n)
    }
}

/// Tersoff bond-order potential for one or more species.
///
/// Coefficients are stored for every ordered pair of atom types, mixing the
/// species' own parameters for unlike pairs.
#[derive(Clone, Debug)]
pub struct Tersoff {
    num_types: usize,
    coeffs: Vec<TersoffParams>,
    cutoff: f64,
}
impl Tersoff {
    /// Potential for the atom types `species`, in type-index order.
    ///
    /// The interaction cutoff is the largest outer cutoff `S` over all type
    /// pairs, whatever the composition, rather than the `S` of the majority
    /// species.
    pub fn new(species: &[Species]) -> Self {
        let num_types = species.len();
        let own: Vec<TersoffParams> = species.iter().map(Species::tersoff_params).collect();
        let mut coeffs = Vec::with_capacity(num_types * num_types);
        for i in 0..num_types {
            for j in 0..num_types {
                coeffs.push(if i == j {
                    own[i]
                } else {
                    own[i].mixed(&own[j])
                });
            }
        }
        let cutoff = coeffs
            .iter()
            .map(TersoffParams::outer_cutoff)
            .fold(0.0, f64::max);
        Self {
            num_types,
            coeffs,
            cutoff,
        }
    }
    /// Coefficients used between atom types `i` and `j`
    pub fn coeff(&self, i: usize, j: usize) -> &TersoffParams {
        &self.coeffs[self.type_idx(i, j)]
    }
    fn type_idx(&self, i: usize, j: usize) -> usize {
        i * self.num_types + j
    }
}

/// Distance between `i` and `j`, rejecting coincident atoms
fn checked_distance(
    distances: &dyn Distances,
    i: usize,
    j: usize,
    coeff: &TersoffParams,
) -> Result<f64> {
    let distance = distances.distance(i, j)?;
    if distance < SINGULAR_FRACTION * coeff.r {
        return Err(Error::NumericSingularity { i, j, distance });
    }
    Ok(distance)
}

impl AtomicPotential for Tersoff {
    fn cutoff_distance(&self) -> f64 {
        self.cutoff
    }
    fn num_types(&self) -> Option<usize> {
        Some(self.num_types)
    }

    fn site_energy(
        &self,
        idx: usize,
        atoms: &Atoms,
        neighbor_list: &NeighborList,
        distances: &dyn Distances,
    ) -> Result<f64> {
        let typei = atoms.types[idx];
        let own = self.coeff(typei, typei);
        let neighbors = neighbor_list.neighbors_of(idx);

        let mut energy = 0.0;
        for &j in neighbors {
            let coeff_ij = self.coeff(typei, atoms.types[j]);
            let r_ij = checked_distance(distances, idx, j, coeff_ij)?;
            if r_ij >= coeff_ij.s {
                continue;
            }

            let mut zeta = 0.0;
            for &k in neighbors {
                if k == j {
                    continue;
                }
                let coeff_ik = self.coeff(typei, atoms.types[k]);
                let r_ik = checked_distance(distances, idx, k, coeff_ik)?;
                if r_ik >= coeff_ik.s {
                    continue;
                }
                let r_jk = distances.distance(j, k)?;
                // law of cosines, angle at atom idx
                let cos_theta = (r_ik * r_ik + r_ij * r_ij - r_jk * r_jk) / (2.0 * r_ij * r_ik);
                zeta += coeff_ik.cutoff(r_ik) * own.angular(cos_theta);
            }

            let b_ij = own.bond_order(zeta);
            energy += coeff_ij.cutoff(r_ij)
                * (coeff_ij.attractive(r_ij) + b_ij * coeff_ij.repulsive(r_ij));
        }
        Ok(0.5 * energy)
    }
}
