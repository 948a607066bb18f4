use crate::math::Vec2;

/// Axis-aligned bounding box in a local frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    pub fn from_center_half_extents(half_width: f64, half_height: f64) -> Self {
        Aabb2::new([-half_width, -half_height], [half_width, half_height])
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// True when the box encloses no area (a point, a segment, or inverted).
    pub fn is_empty_interior(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Corners in counter-clockwise order starting at `min`.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.min[0], self.min[1]),
            Vec2::new(self.max[0], self.min[1]),
            Vec2::new(self.max[0], self.max[1]),
            Vec2::new(self.min[0], self.max[1]),
        ]
    }
}
