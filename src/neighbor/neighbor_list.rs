use rayon::prelude::*;

use super::DistanceCache;
use crate::{container::Container, utils::Vec3};

/// Neighbor lists of every atom, rebuilt from scratch every step.
///
/// `j` is a neighbor of `i` when their minimum-image distance is within the
/// search radius. The rebuild also caches the distance between every two
/// neighbors of an atom, which the angular terms need.
#[derive(Clone, Debug)]
pub struct NeighborList {
    cutoff_distance: f64,
    neighbors: Vec<Vec<usize>>,
}
impl NeighborList {
    pub fn new(num_atoms: usize, cutoff_distance: f64) -> Self {
        assert!(
            cutoff_distance > 0.0,
            "Neighbor list cutoff distance must be positive"
        );
        Self {
            cutoff_distance,
            neighbors: vec![Vec::new(); num_atoms],
        }
    }
    pub fn neighbors(&self) -> &Vec<Vec<usize>> {
        &self.neighbors
    }
    pub fn neighbors_of(&self, idx: usize) -> &[usize] {
        &self.neighbors[idx]
    }
    pub fn cutoff_distance(&self) -> f64 {
        self.cutoff_distance
    }
    /// Number of unordered neighbor pairs
    pub fn num_pairs(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Rebuild the lists and refill `cache` for the given wrapped positions.
    ///
    /// Runs on the current rayon pool. Workers only produce row buffers; the
    /// lists and the cache are filled by single-threaded merges.
    pub fn update(&mut self, positions: &[Vec3], container: &Container, cache: &mut DistanceCache) {
        let num_atoms = positions.len();
        let rc_sq = self.cutoff_distance * self.cutoff_distance;
        cache.clear();

        // Phase 1: direct neighbors
        let rows: Vec<Vec<(usize, f64)>> = (0..num_atoms)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..num_atoms)
                    .filter_map(|j| {
                        let dist_sq = container.distance_squared(positions[i], positions[j]);
                        (dist_sq <= rc_sq).then(|| (j, dist_sq.sqrt()))
                    })
                    .collect()
            })
            .collect();

        self.neighbors.clear();
        self.neighbors.resize(num_atoms, Vec::new());
        for (i, row) in rows.into_iter().enumerate() {
            for (j, r) in row {
                cache.insert(i, j, r);
                self.neighbors[i].push(j);
                self.neighbors[j].push(i);
            }
        }

        // Phase 2: pairs of neighbors sharing an atom
        let neighbors = &self.neighbors;
        let known: &DistanceCache = cache;
        let shells: Vec<Vec<(usize, usize, f64)>> = neighbors
            .par_iter()
            .map(|nbrs| {
                let mut shell = Vec::new();
                for (a, &j) in nbrs.iter().enumerate() {
                    for &k in &nbrs[a + 1..] {
                        if !known.contains(j, k) {
                            shell.push((j, k, container.distance(positions[j], positions[k])));
                        }
                    }
                }
                shell
            })
            .collect();
        for (j, k, r) in shells.into_iter().flatten() {
            cache.insert(j, k, r);
        }
        cache.validate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbor::Distances;

    #[test]
    fn pairs_across_boundary() {
        let container = Container::cubic(10.0);
        let positions = vec![
            Vec3::new(0.5, 5.0, 5.0),
            Vec3::new(9.5, 5.0, 5.0),
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(0.5, 6.5, 5.0),
        ];
        let mut list = NeighborList::new(positions.len(), 1.6);
        let mut cache = DistanceCache::new();
        list.update(&positions, &container, &mut cache);

        assert_eq!(list.neighbors_of(0), &[1, 3]);
        assert_eq!(list.neighbors_of(1), &[0]);
        assert!(list.neighbors_of(2).is_empty());
        assert_eq!(list.num_pairs(), 2);

        assert!((cache.distance(0, 1).unwrap() - 1.0).abs() < 1e-12);
        // second shell of atom 0, beyond the search radius
        let r13 = cache.distance(1, 3).unwrap();
        assert!((r13 - (1.0f64 + 2.25).sqrt()).abs() < 1e-12);
        assert!(cache.distance(2, 0).is_err());
    }

    #[test]
    fn rebuild_replaces_previous_lists() {
        let container = Container::cubic(10.0);
        let mut positions = vec![Vec3::new(1.0, 1.0, 1.0), Vec3::new(2.0, 1.0, 1.0)];
        let mut list = NeighborList::new(2, 1.5);
        let mut cache = DistanceCache::new();
        list.update(&positions, &container, &mut cache);
        assert_eq!(list.num_pairs(), 1);

        positions[1] = Vec3::new(5.0, 5.0, 5.0);
        list.update(&positions, &container, &mut cache);
        assert_eq!(list.num_pairs(), 0);
        assert!(cache.is_empty());
        assert!(cache.is_valid());
    }
}
