use crate::model::Rect;

pub mod guillotine;
pub mod shelf;

/// A packer places rectangles into a fixed-size canvas.
///
/// Implementations must keep placements disjoint and inside the canvas.
/// `pack` may return `None` if no free region can hold the rectangle; the
/// packer state is left untouched in that case.
pub trait Packer {
    fn can_pack(&self, w: u32, h: u32) -> bool;
    fn pack(&mut self, w: u32, h: u32) -> Option<Rect>;
}
