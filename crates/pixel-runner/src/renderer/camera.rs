use glam::Vec2;

use crate::core::collision::Aabb;

/// Side-scrolling camera. `x`/`y` is the world position of the viewport's top-left corner.
///
/// Horizontal tracking keeps the target centred but never scrolls left of the world origin.
/// Vertical tracking is deliberately loose: the target sits `vertical_offset` below centre and
/// the camera only drifts within `[min_y, max_y]`.
#[derive(Debug, Clone)]
pub struct Camera2D {
    pub x: f32,
    pub y: f32,
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    vertical_offset: f32,
    min_y: f32,
    max_y: f32,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            vertical_offset: 0.0,
            min_y: f32::NEG_INFINITY,
            max_y: f32::INFINITY,
        }
    }

    /// Set the vertical follow offset and drift clamp.
    pub fn with_vertical_limits(mut self, offset: f32, min_y: f32, max_y: f32) -> Self {
        self.vertical_offset = offset;
        self.min_y = min_y;
        self.max_y = max_y.max(min_y);
        self
    }

    /// Resize the viewport (host canvas resized).
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Track a target position (the player's top-left corner).
    pub fn follow(&mut self, target: Vec2) {
        self.x = (target.x - self.width / 2.0).max(0.0);
        self.y = (target.y - self.height / 2.0 + self.vertical_offset).clamp(self.min_y, self.max_y);
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Translation to apply to world-space drawing.
    pub fn transform(&self) -> Vec2 {
        -self.position()
    }

    /// World x of the viewport's right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn is_visible(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Check if a world-space rectangle overlaps the viewport.
    pub fn is_rect_visible(&self, rect: &Aabb) -> bool {
        rect.right() >= self.x
            && rect.left() <= self.x + self.width
            && rect.bottom() >= self.y
            && rect.top() <= self.y + self.height
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera2D {
        Camera2D::new(800.0, 600.0).with_vertical_limits(50.0, -200.0, 200.0)
    }

    #[test]
    fn follow_centres_target_horizontally() {
        let mut cam = camera();
        cam.follow(Vec2::new(1400.0, 300.0));
        assert!((cam.x - 1000.0).abs() < 1e-6);
        assert!((cam.y - 50.0).abs() < 1e-6);
    }

    #[test]
    fn never_scrolls_left_of_origin() {
        let mut cam = camera();
        cam.follow(Vec2::new(100.0, 300.0));
        assert_eq!(cam.x, 0.0);
    }

    #[test]
    fn vertical_drift_is_clamped() {
        let mut cam = camera();
        cam.follow(Vec2::new(0.0, 5000.0));
        assert_eq!(cam.y, 200.0);
        cam.follow(Vec2::new(0.0, -5000.0));
        assert_eq!(cam.y, -200.0);
    }

    #[test]
    fn transform_is_negated_position() {
        let mut cam = camera();
        cam.follow(Vec2::new(900.0, 300.0));
        assert_eq!(cam.transform(), Vec2::new(-500.0, -50.0));
    }

    #[test]
    fn rect_visibility() {
        let cam = Camera2D::new(100.0, 100.0);
        assert!(cam.is_rect_visible(&Aabb::new(50.0, 50.0, 10.0, 10.0)));
        assert!(cam.is_rect_visible(&Aabb::new(-5.0, 50.0, 10.0, 10.0)));
        assert!(!cam.is_rect_visible(&Aabb::new(-50.0, 50.0, 10.0, 10.0)));
        assert!(cam.is_visible(Vec2::new(0.0, 0.0)));
        assert!(!cam.is_visible(Vec2::new(101.0, 50.0)));
    }
}
