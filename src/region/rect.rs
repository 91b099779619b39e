use super::Region;
use crate::utils::Vec3;

/// Axis-aligned rectangular region
#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
    lo: Vec3,
    hi: Vec3,
}
impl Rect {
    pub fn new(lo: Vec3, hi: Vec3) -> Self {
        assert!(
            lo.x < hi.x && lo.y < hi.y && lo.z < hi.z,
            "Lower corner {:?} should be below upper corner {:?}",
            lo,
            hi
        );
        Self { lo, hi }
    }
    /// Cube spanning `[lo, hi]` on every axis
    pub fn cube(lo: f64, hi: f64) -> Self {
        Self::new(Vec3::splat(lo), Vec3::splat(hi))
    }
    pub fn lengths(&self) -> Vec3 {
        self.hi - self.lo
    }
}
impl Region for Rect {
    /// Strict containment, points on the faces are outside
    fn contains(&self, coord: &Vec3) -> bool {
        self.lo.x < coord.x
            && coord.x < self.hi.x
            && self.lo.y < coord.y
            && coord.y < self.hi.y
            && self.lo.z < coord.z
            && coord.z < self.hi.z
    }
    fn volume(&self) -> f64 {
        let l = self.lengths();
        l.x * l.y * l.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_are_excluded() {
        let rect = Rect::cube(1.0, 3.0);
        assert!(rect.contains(&Vec3::splat(2.0)));
        assert!(!rect.contains(&Vec3::new(1.0, 2.0, 2.0)));
        assert!(!rect.contains(&Vec3::new(2.0, 2.0, 3.5)));
        assert_eq!(rect.volume(), 8.0);
    }
}
