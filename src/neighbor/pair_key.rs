/// Unordered pair of atom indices, stored smaller index first.
///
/// ```
/// use tmd::neighbor::PairKey;
/// assert_eq!(PairKey::new(5, 2), PairKey::new(2, 5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(usize, usize);

impl PairKey {
    pub fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self(i, j)
        } else {
            Self(j, i)
        }
    }
    pub fn first(&self) -> usize {
        self.0
    }
    pub fn second(&self) -> usize {
        self.1
    }
    /// Whether `idx` is one of the two atoms
    pub fn involves(&self, idx: usize) -> bool {
        self.0 == idx || self.1 == idx
    }
}
