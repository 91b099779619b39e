pub mod distance_cache;
pub mod neighbor_list;
pub mod pair_key;

pub use distance_cache::{Displaced, DistanceCache, Distances};
pub use neighbor_list::NeighborList;
pub use pair_key::PairKey;
