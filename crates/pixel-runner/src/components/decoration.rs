//! Cosmetic scenery: ground props placed by the generator and parallax clouds.
//! Neither takes part in collision.

use glam::Vec2;

use crate::core::rng::Rng;
use crate::renderer::{Color, DrawTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationKind {
    Tree,
    Mushroom,
    Cactus,
    Coconut,
}

impl DecorationKind {
    pub const ALL: [DecorationKind; 4] = [
        DecorationKind::Tree,
        DecorationKind::Mushroom,
        DecorationKind::Cactus,
        DecorationKind::Coconut,
    ];

    /// Height of the part drawn below the anchor at scale 1; it rests on the ground.
    fn foot(self) -> f32 {
        match self {
            DecorationKind::Tree => 32.0,
            DecorationKind::Mushroom => 12.0,
            DecorationKind::Cactus => 28.0,
            DecorationKind::Coconut => 38.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Decoration {
    pub pos: Vec2,
    pub kind: DecorationKind,
    pub size: f32,
}

impl Decoration {
    pub fn new(x: f32, y: f32, kind: DecorationKind, size: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            kind,
            size,
        }
    }

    /// Anchor a prop so its base sits on `ground_y`.
    pub fn on_ground(x: f32, ground_y: f32, kind: DecorationKind, size: f32) -> Self {
        Self::new(x, ground_y - kind.foot() * size, kind, size)
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        let s = self.size;
        let at = |dx: f32, dy: f32| self.pos + Vec2::new(dx, dy) * s;
        let sz = |w: f32, h: f32| Vec2::new(w, h) * s;
        match self.kind {
            DecorationKind::Tree => {
                if target.sprite("tree", at(-32.0, -64.0), sz(64.0, 96.0), 1.0) {
                    return;
                }
                target.fill_rect(at(-6.0, 0.0), sz(12.0, 32.0), Color::hex(0x8B5A2B));
                target.fill_circle(at(0.0, -8.0), 24.0 * s, Color::hex(0x228B22));
                target.fill_circle(at(-12.0, 0.0), 16.0 * s, Color::hex(0x2E8B57));
                target.fill_circle(at(12.0, 0.0), 16.0 * s, Color::hex(0x2E8B57));
            }
            DecorationKind::Mushroom => {
                target.fill_rect(at(-3.0, 0.0), sz(6.0, 12.0), Color::hex(0xFFF8DC));
                target.fill_rect(at(-10.0, -7.0), sz(20.0, 7.0), Color::hex(0xFF3B3B));
                target.fill_circle(at(-4.0, -3.0), 1.5 * s, Color::WHITE);
                target.fill_circle(at(0.0, -5.0), 1.2 * s, Color::WHITE);
                target.fill_circle(at(4.0, -2.0), 1.0 * s, Color::WHITE);
            }
            DecorationKind::Cactus => {
                let green = Color::hex(0x2ECC40);
                target.fill_rect(at(-5.0, 0.0), sz(10.0, 28.0), green);
                target.fill_circle(at(0.0, 0.0), 8.0 * s, green);
                target.fill_rect(at(-12.0, 10.0), sz(6.0, 12.0), green);
                target.fill_rect(at(6.0, 12.0), sz(6.0, 10.0), green);
            }
            DecorationKind::Coconut => {
                target.fill_rect(at(-3.0, 0.0), sz(6.0, 38.0), Color::hex(0xB8860B));
                let frond = Color::hex(0x228B22);
                for i in 0..5 {
                    let angle = -0.7 + i as f32 * 0.35;
                    let tip = at(28.0 * angle.sin(), -28.0 * angle.cos());
                    target.fill_circle(tip, 4.0 * s, frond);
                    target.fill_circle((tip + self.pos) / 2.0, 3.0 * s, frond);
                }
                let nut = Color::hex(0x6B4F1D);
                target.fill_circle(at(0.0, 6.0), 3.0 * s, nut);
                target.fill_circle(at(-4.0, 8.0), 2.0 * s, nut);
                target.fill_circle(at(4.0, 8.0), 2.0 * s, nut);
            }
        }
    }
}

/// Background cloud. Lives in screen space and wraps around the viewport.
#[derive(Debug, Clone)]
pub struct Cloud {
    base_x: f32,
    pub y: f32,
    pub scale: f32,
    /// Own drift, world units per second.
    drift: f32,
    /// Fraction of camera motion applied (0 = fixed to screen, 1 = fixed to world).
    parallax: f32,
}

/// How far past either viewport edge a cloud travels before wrapping.
const CLOUD_MARGIN: f32 = 100.0;

impl Cloud {
    pub fn new(x: f32, y: f32, scale: f32, drift: f32, parallax: f32) -> Self {
        Self {
            base_x: x,
            y,
            scale,
            drift,
            parallax,
        }
    }

    /// A handful of clouds spread across the viewport.
    pub fn scatter(count: usize, viewport_width: f32, rng: &mut Rng) -> Vec<Cloud> {
        let spacing = (viewport_width + 2.0 * CLOUD_MARGIN) / count.max(1) as f32;
        (0..count)
            .map(|i| {
                Cloud::new(
                    i as f32 * spacing + rng.range(0.0, spacing * 0.5),
                    rng.range(60.0, 140.0),
                    rng.range(0.7, 1.2),
                    -rng.range(5.0, 15.0),
                    rng.range(0.2, 0.5),
                )
            })
            .collect()
    }

    pub fn update(&mut self, dt: f32) {
        self.base_x += self.drift * dt;
    }

    /// On-screen x for the given camera, wrapped into `[-margin, width + margin)`.
    pub fn screen_x(&self, camera_x: f32, viewport_width: f32) -> f32 {
        let span = viewport_width + 2.0 * CLOUD_MARGIN;
        (self.base_x - camera_x * self.parallax).rem_euclid(span) - CLOUD_MARGIN
    }

    /// Draw in screen space; the caller has reset the offset.
    pub fn draw(&self, target: &mut dyn DrawTarget, camera_x: f32, viewport_width: f32) {
        let center = Vec2::new(self.screen_x(camera_x, viewport_width), self.y);
        let s = self.scale;
        let white = Color::WHITE.with_alpha(0.8);
        for (dx, dy, r) in [
            (-20.0, 0.0, 15.0),
            (-10.0, -10.0, 18.0),
            (10.0, -8.0, 16.0),
            (20.0, 0.0, 12.0),
            (0.0, 8.0, 20.0),
        ] {
            target.fill_circle(center + Vec2::new(dx, dy) * s, r * s, white);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn props_rest_on_ground() {
        let tree = Decoration::on_ground(0.0, 500.0, DecorationKind::Tree, 1.5);
        assert!((tree.pos.y + 32.0 * 1.5 - 500.0).abs() < 1e-4);
    }

    #[test]
    fn cloud_wraps_around_viewport() {
        let cloud = Cloud::new(50.0, 100.0, 1.0, 0.0, 0.5);
        for cam in [0.0, 800.0, 12_345.0, 1_000_000.0] {
            let x = cloud.screen_x(cam, 800.0);
            assert!((-100.0..900.0).contains(&x), "x = {}", x);
        }
    }

    #[test]
    fn cloud_parallax_moves_slower_than_camera() {
        let cloud = Cloud::new(400.0, 100.0, 1.0, 0.0, 0.25);
        let a = cloud.screen_x(0.0, 800.0);
        let b = cloud.screen_x(100.0, 800.0);
        assert!((a - b - 25.0).abs() < 1e-3);
    }

    #[test]
    fn drift() {
        let mut cloud = Cloud::new(400.0, 100.0, 1.0, -10.0, 0.0);
        cloud.update(1.0);
        assert!((cloud.screen_x(0.0, 800.0) - 290.0).abs() < 1e-3);
    }
}
