use std::collections::HashMap;

use super::PairKey;
use crate::{
    container::Container,
    error::{Error, Result},
    utils::Vec3,
};

/// Source of pair distances for potential evaluation
pub trait Distances: Sync {
    fn distance(&self, i: usize, j: usize) -> Result<f64>;
}

/// Minimum-image pair distances of the current step.
///
/// Only valid between a neighbor rebuild and the next position change;
/// lookups on an invalidated cache fail with [`Error::StaleDistance`].
#[derive(Clone, Debug, Default)]
pub struct DistanceCache {
    map: HashMap<PairKey, f64>,
    valid: bool,
}
impl DistanceCache {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
    pub fn is_valid(&self) -> bool {
        self.valid
    }
    /// Whether the pair was stored, regardless of validity
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.map.contains_key(&PairKey::new(i, j))
    }

    /// Mark the cached distances as outdated
    pub fn invalidate(&mut self) {
        self.valid = false;
    }
    /// Drop every entry ahead of a rebuild
    pub fn clear(&mut self) {
        self.map.clear();
        self.valid = false;
    }
    pub fn insert(&mut self, i: usize, j: usize, distance: f64) {
        self.map.insert(PairKey::new(i, j), distance);
    }
    /// Mark a completed rebuild
    pub fn validate(&mut self) {
        self.valid = true;
    }
}
impl Distances for DistanceCache {
    fn distance(&self, i: usize, j: usize) -> Result<f64> {
        if !self.valid {
            return Err(Error::StaleDistance { i, j });
        }
        self.map
            .get(&PairKey::new(i, j))
            .copied()
            .ok_or(Error::StaleDistance { i, j })
    }
}

/// View of a cache with one atom moved to a trial position.
///
/// Pairs involving the moved atom are re-derived by minimum image, all other
/// pairs come from the cache. Only pairs the cache knows are served.
pub struct Displaced<'a> {
    cache: &'a DistanceCache,
    container: &'a Container,
    positions: &'a [Vec3],
    atom: usize,
    position: Vec3,
}
impl<'a> Displaced<'a> {
    pub fn new(
        cache: &'a DistanceCache,
        container: &'a Container,
        positions: &'a [Vec3],
        atom: usize,
        position: Vec3,
    ) -> Self {
        Self {
            cache,
            container,
            positions,
            atom,
            position,
        }
    }
}
impl Distances for Displaced<'_> {
    fn distance(&self, i: usize, j: usize) -> Result<f64> {
        let cached = self.cache.distance(i, j)?;
        let other = if i == self.atom {
            j
        } else if j == self.atom {
            i
        } else {
            return Ok(cached);
        };
        Ok(self
            .container
            .distance(self.position, self.positions[other]))
    }
}
