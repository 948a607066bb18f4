use serde::{Deserialize, Serialize};

use crate::bounds::Aabb2;
use crate::math::Vec2;
use crate::rect::AnyRect;

/// Snapshot of the map camera: what part of map space is on screen.
///
/// `scale` is map units per screen pixel, so a larger value means the camera
/// is zoomed further out. Screen pixels grow right and down.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Vec2,
    pub scale: f64,
    #[serde(default)]
    pub angle: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl Viewport {
    pub fn new(center: Vec2, scale: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            center,
            scale,
            angle: 0.0,
            pixel_width,
            pixel_height,
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The visible area in map space.
    pub fn global_rect(&self) -> AnyRect {
        let half_w = 0.5 * self.pixel_width * self.scale;
        let half_h = 0.5 * self.pixel_height * self.scale;
        AnyRect::new(
            self.center,
            self.angle,
            Aabb2::from_center_half_extents(half_w, half_h),
        )
    }

    pub fn is_empty_interior(&self) -> bool {
        self.global_rect().local_rect().is_empty_interior()
    }

    /// Map space to screen pixels.
    pub fn g_to_p(&self, global: Vec2) -> Vec2 {
        if self.scale <= 0.0 {
            return self.pixel_center();
        }
        let local = (global - self.center).rotated(-self.angle) * (1.0 / self.scale);
        Vec2::new(
            0.5 * self.pixel_width + local.x,
            0.5 * self.pixel_height - local.y,
        )
    }

    /// Screen pixels to map space.
    pub fn p_to_g(&self, pixel: Vec2) -> Vec2 {
        let local = Vec2::new(
            pixel.x - 0.5 * self.pixel_width,
            0.5 * self.pixel_height - pixel.y,
        );
        self.center + (local * self.scale).rotated(self.angle)
    }

    fn pixel_center(&self) -> Vec2 {
        Vec2::new(0.5 * self.pixel_width, 0.5 * self.pixel_height)
    }
}
