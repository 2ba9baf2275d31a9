use glam::Vec2;

/// World-to-window mapping for a 2D view.
///
/// World space is meters with Y up. Window space is pixels with the origin at
/// the top-left corner and Y down. `pos` is the world-space bottom-left corner
/// of the visible rectangle and `ppm` the pixels-per-meter scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    /// World position of the bottom-left corner of the view.
    pub pos: Vec2,
    /// Pixels per meter.
    pub ppm: f32,
    /// Window size in pixels.
    pub viewport: Vec2,
}

impl Camera2D {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            ppm: 1.0,
            viewport: Vec2::new(viewport_width, viewport_height),
        }
    }

    /// Window aspect ratio (width / height).
    pub fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    /// Visible width in world units.
    pub fn world_width(&self) -> f32 {
        self.viewport.x / self.ppm
    }

    /// Visible height in world units.
    pub fn world_height(&self) -> f32 {
        self.viewport.y / self.ppm
    }

    /// Handle a window resize. Keeps `pos` and `ppm`; callers refit as needed.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.viewport = Vec2::new(viewport_width.max(1.0), viewport_height.max(1.0));
    }

    /// Frame the given world width centered on the origin.
    pub fn frame_centered(&mut self, world_width: f32, world_height: f32) {
        self.pos = Vec2::new(-world_width / 2.0, -world_height / 2.0);
        self.ppm = self.viewport.x / world_width;
    }

    /// Visible rectangle as (lower-left, upper-right) world corners.
    pub fn visible_rect(&self) -> (Vec2, Vec2) {
        let upper = self.pos + Vec2::new(self.world_width(), self.world_height());
        (self.pos, upper)
    }

    /// World point → window pixel.
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            (point.x - self.pos.x) * self.ppm,
            self.viewport.y - (point.y - self.pos.y) * self.ppm,
        )
    }

    /// Window pixel → world point.
    pub fn screen_to_world(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            pixel.x / self.ppm + self.pos.x,
            (self.viewport.y - pixel.y) / self.ppm + self.pos.y,
        )
    }

    /// World length → pixels.
    pub fn length_to_screen(&self, meters: f32) -> f32 {
        meters * self.ppm
    }

    /// Pixels → world length.
    pub fn length_to_world(&self, pixels: f32) -> f32 {
        pixels / self.ppm
    }

    /// Check if a world-space point is visible in the viewport.
    pub fn is_visible(&self, point: Vec2) -> bool {
        let (lower, upper) = self.visible_rect();
        point.x >= lower.x && point.x <= upper.x && point.y >= lower.y && point.y <= upper.y
    }

    /// Check if a world-space rectangle overlaps the viewport.
    pub fn is_rect_visible(&self, rect_center: Vec2, rect_half_size: Vec2) -> bool {
        let (lower, upper) = self.visible_rect();
        let rect_lower = rect_center - rect_half_size;
        let rect_upper = rect_center + rect_half_size;

        rect_upper.x >= lower.x
            && rect_lower.x <= upper.x
            && rect_upper.y >= lower.y
            && rect_lower.y <= upper.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed() -> Camera2D {
        // 640x480 window showing [-100, 100] x [-75, 75]
        let mut cam = Camera2D::new(640.0, 480.0);
        cam.frame_centered(200.0, 150.0);
        cam
    }

    #[test]
    fn frame_centered_sets_pos_and_scale() {
        let cam = framed();
        assert!((cam.pos.x - -100.0).abs() < 1e-6);
        assert!((cam.pos.y - -75.0).abs() < 1e-6);
        assert!((cam.ppm - 3.2).abs() < 1e-6);
        assert!((cam.world_height() - 150.0).abs() < 1e-3);
    }

    #[test]
    fn world_origin_maps_to_window_center() {
        let cam = framed();
        let px = cam.world_to_screen(Vec2::ZERO);
        assert!((px.x - 320.0).abs() < 1e-3);
        assert!((px.y - 240.0).abs() < 1e-3);
    }

    #[test]
    fn y_axis_is_flipped() {
        let cam = framed();
        // Top-left pixel is the upper-left world corner
        let w = cam.screen_to_world(Vec2::ZERO);
        assert!((w.x - -100.0).abs() < 1e-3);
        assert!((w.y - 75.0).abs() < 1e-3);
    }

    #[test]
    fn screen_world_inverse() {
        let cam = framed();
        let p = Vec2::new(12.5, -33.0);
        let back = cam.screen_to_world(cam.world_to_screen(p));
        assert!((back - p).length() < 1e-3);
        assert!((cam.length_to_world(cam.length_to_screen(4.0)) - 4.0).abs() < 1e-5);
    }

    #[test]
    fn is_visible_detects_points_in_view() {
        let cam = framed();
        assert!(cam.is_visible(Vec2::ZERO));
        assert!(cam.is_visible(Vec2::new(-100.0, -75.0)));
        assert!(!cam.is_visible(Vec2::new(-101.0, 0.0)));
        assert!(!cam.is_visible(Vec2::new(0.0, 76.0)));
    }

    #[test]
    fn is_rect_visible_detects_overlap() {
        let cam = framed();
        assert!(cam.is_rect_visible(Vec2::ZERO, Vec2::splat(10.0)));
        assert!(cam.is_rect_visible(Vec2::new(-105.0, 0.0), Vec2::splat(10.0)));
        assert!(!cam.is_rect_visible(Vec2::new(-150.0, 0.0), Vec2::splat(10.0)));
    }

    #[test]
    fn resize_keeps_scale() {
        let mut cam = framed();
        cam.resize(1280.0, 480.0);
        assert!((cam.ppm - 3.2).abs() < 1e-6);
        assert!((cam.aspect() - 1280.0 / 480.0).abs() < 1e-6);
        assert!((cam.world_width() - 400.0).abs() < 1e-3);
    }
}
