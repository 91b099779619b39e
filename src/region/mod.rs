pub mod rect;
pub use rect::Rect;

use crate::utils::Vec3;

pub trait Region {
    fn contains(&self, coord: &Vec3) -> bool;
    fn volume(&self) -> f64;
}
