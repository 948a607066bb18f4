use foundation::math::Vec2;

/// Map renderer as seen from the guides layer. Calls are fire-and-forget.
pub trait MapRenderer {
    /// Zooms by `factor` keeping `pixel_point` fixed on screen.
    fn animate_scale(&mut self, factor: f64, pixel_point: Vec2, animated: bool);
}
