use glam::Vec2;

use super::animation::{Bob, FrameCycle};
use crate::core::collision::{check_collision, Aabb, Bounded};
use crate::renderer::{Color, DrawTarget};

/// Extra life pickup.
#[derive(Debug, Clone)]
pub struct Heart {
    pub rect: Aabb,
    pub collected: bool,
    anim: FrameCycle,
    bob: Bob,
    glow: Bob,
}

impl Heart {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Aabb::new(x, y, 20.0, 18.0),
            collected: false,
            anim: FrameCycle::new(0.2, 4),
            bob: Bob::new(3.0, 3.0),
            glow: Bob::new(4.0, 1.0),
        }
    }

    pub fn update(&mut self, dt: f32, player: &Aabb) -> bool {
        if self.collected {
            return false;
        }
        self.anim.tick(dt);
        self.bob.tick(dt);
        self.glow.tick(dt);
        if check_collision(&self.rect, player) {
            self.collected = true;
            return true;
        }
        false
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        if self.collected {
            return;
        }
        let pos = self.rect.pos + Vec2::new(0.0, self.bob.offset());
        let center = pos + self.rect.size / 2.0;
        target.fill_circle(center, 16.0, Color::hex(0xFF69B4).with_alpha(0.15 + 0.25 * self.glow.pulse()));
        if target.sprite("heart", pos, self.rect.size, 1.0) {
            return;
        }
        // Beat: grow a pixel on odd frames.
        let beat = (self.anim.frame() % 2) as f32;
        let red = Color::hex(0xFF1744);
        target.fill_circle(pos + Vec2::new(5.5, 5.5), 5.5 + beat * 0.5, red);
        target.fill_circle(pos + Vec2::new(14.5, 5.5), 5.5 + beat * 0.5, red);
        target.fill_rect(pos + Vec2::new(1.0, 6.0), Vec2::new(18.0, 5.0), red);
        target.fill_rect(pos + Vec2::new(4.0, 11.0), Vec2::new(12.0, 4.0), red);
        target.fill_rect(pos + Vec2::new(7.0, 15.0), Vec2::new(6.0, 3.0), red);
        target.fill_rect(pos + Vec2::new(4.0, 3.0), Vec2::new(3.0, 3.0), Color::WHITE.with_alpha(0.7));
    }
}

impl Bounded for Heart {
    fn bounds(&self) -> Aabb {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.016;

    #[test]
    fn collected_once() {
        let mut heart = Heart::new(100.0, 100.0);
        let player = Aabb::new(90.0, 90.0, 32.0, 48.0);
        assert!(heart.update(DT, &player));
        assert!(heart.collected);
        assert!(!heart.update(DT, &player));
    }

    #[test]
    fn ignores_distant_player() {
        let mut heart = Heart::new(100.0, 100.0);
        assert!(!heart.update(DT, &Aabb::new(300.0, 100.0, 32.0, 48.0)));
        assert!(!heart.collected);
    }
}
