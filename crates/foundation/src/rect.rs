use crate::bounds::Aabb2;
use crate::math::Vec2;

/// Rectangle with an arbitrary rotation, expressed as a local axis-aligned box
/// around `origin` rotated counter-clockwise by `angle` radians.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnyRect {
    pub origin: Vec2,
    pub angle: f64,
    pub rect: Aabb2,
}

impl AnyRect {
    pub fn new(origin: Vec2, angle: f64, rect: Aabb2) -> Self {
        Self {
            origin,
            angle,
            rect,
        }
    }

    pub fn local_rect(&self) -> Aabb2 {
        self.rect
    }

    pub fn area(&self) -> f64 {
        self.rect.area()
    }

    pub fn to_global(&self, local: Vec2) -> Vec2 {
        self.origin + local.rotated(self.angle)
    }

    /// Global corners, counter-clockwise.
    pub fn global_corners(&self) -> [Vec2; 4] {
        self.rect.corners().map(|c| self.to_global(c))
    }
}
