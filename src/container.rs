use crate::{
    region::Rect,
    utils::{Axis, Vec3},
};

/// Cubic simulation box `[0, L)` with periodic boundaries on every axis.
///
/// All separations in the crate go through [`Container::minimum_image`].
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    length: f64,
}
impl Container {
    /// Create a fully periodic cube with edge length `length`
    pub fn cubic(length: f64) -> Self {
        assert!(
            length > 0.0 && length.is_finite(),
            "Box length should be positive, found {}",
            length
        );
        Self { length }
    }

    // Getters
    /// Edge length of the box
    pub fn length(&self) -> f64 {
        self.length
    }
    pub fn volume(&self) -> f64 {
        self.length * self.length * self.length
    }
    /// The whole box as a region
    pub fn rect(&self) -> Rect {
        Rect::cube(0.0, self.length)
    }
    /// Inner half of the box along every axis, away from the periodic faces
    pub fn central_region(&self) -> Rect {
        Rect::cube(0.25 * self.length, 0.75 * self.length)
    }

    // Periodic images

    /// Map a position back into the box
    pub fn wrap(&self, pos: Vec3) -> Vec3 {
        let mut wrapped = pos;
        for axis in Axis::ALL {
            let i = axis.index();
            wrapped[i] = self.wrap_coord(pos[i]).0;
        }
        wrapped
    }

    /// Map a position back into the box, adding the momentum carried through
    /// each face to `flux`: `+p` through an upper face, `-p` through a lower one.
    pub fn wrap_tracking_flux(&self, pos: Vec3, momentum: Vec3, flux: &mut Vec3) -> Vec3 {
        let mut wrapped = pos;
        for axis in Axis::ALL {
            let i = axis.index();
            let (coord, crossings) = self.wrap_coord(pos[i]);
            wrapped[i] = coord;
            flux[i] += crossings * momentum[i];
        }
        wrapped
    }

    /// Separation vector `a - b` of the nearest periodic images
    pub fn minimum_image(&self, a: Vec3, b: Vec3) -> Vec3 {
        let l = self.length;
        (a - b).map(|d| d - l * (d / l).round())
    }
    pub fn distance_squared(&self, a: Vec3, b: Vec3) -> f64 {
        self.minimum_image(a, b).norm_squared()
    }
    pub fn distance(&self, a: Vec3, b: Vec3) -> f64 {
        self.distance_squared(a, b).sqrt()
    }

    /// Wrapped coordinate and the signed number of box lengths removed
    fn wrap_coord(&self, x: f64) -> (f64, f64) {
        let l = self.length;
        let shift = (x / l).floor();
        let mut wrapped = x - shift * l;
        // Rounding can land a tiny negative coordinate exactly on the upper face
        if wrapped >= l {
            wrapped = 0.0;
        }
        (wrapped, shift)
    }
}
