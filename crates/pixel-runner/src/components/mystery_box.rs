use glam::Vec2;

use super::animation::Bob;
use super::weapon::WeaponKind;
use crate::core::collision::{check_collision, Aabb, Bounded};
use crate::renderer::{Color, DrawTarget};

/// Crate holding a random amount of one weapon.
#[derive(Debug, Clone)]
pub struct MysteryBox {
    pub rect: Aabb,
    pub weapon: WeaponKind,
    pub active: bool,
    pulse: Bob,
}

impl MysteryBox {
    pub const SIZE: f32 = 32.0;

    pub fn new(x: f32, y: f32, weapon: WeaponKind) -> Self {
        Self {
            rect: Aabb::new(x, y, Self::SIZE, Self::SIZE),
            weapon,
            active: true,
            pulse: Bob::new(5.0, 1.0),
        }
    }

    /// Returns the contained weapon on the tick the player touches the box.
    pub fn update(&mut self, dt: f32, player: &Aabb) -> Option<WeaponKind> {
        if !self.active {
            return None;
        }
        self.pulse.tick(dt);
        if check_collision(&self.rect, player) {
            self.active = false;
            return Some(self.weapon);
        }
        None
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        if !self.active {
            return;
        }
        let pos = self.rect.pos;
        if target.sprite("mystery_box", pos, self.rect.size, 1.0) {
            return;
        }
        target.fill_rect(pos, self.rect.size, Color::hex(0xF4B400));
        target.stroke_rect(pos + Vec2::splat(3.0), self.rect.size - Vec2::splat(6.0), 2.0, Color::hex(0xB8860B));
        target.stroke_rect(pos, self.rect.size, 2.0, Color::BLACK);
        let mark = Color::WHITE.with_alpha(0.6 + 0.4 * self.pulse.pulse());
        target.text(pos + self.rect.size / 2.0, "?", 20.0, mark);
    }
}

impl Bounded for MysteryBox {
    fn bounds(&self) -> Aabb {
        self.rect
    }
}
