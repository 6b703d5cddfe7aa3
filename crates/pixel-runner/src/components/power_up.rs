use glam::Vec2;

use super::animation::{Bob, FrameCycle};
use crate::core::collision::{check_collision, Aabb, Bounded};
use crate::core::rng::Rng;
use crate::renderer::{Color, DrawTarget};

/// Points granted per multiplier step.
pub const POWER_UP_BASE_SCORE: u64 = 500;

/// Leftward drift, in world units per second.
const DRIFT_SPEED: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct PowerUp {
    pub rect: Aabb,
    pub multiplier: u32,
    pub collected: bool,
    anim: FrameCycle,
    bob: Bob,
    glow: Bob,
}

impl PowerUp {
    pub const SIZE: f32 = 24.0;
    pub const MULTIPLIERS: [u32; 4] = [2, 3, 5, 10];
    const WEIGHTS: [f32; 4] = [50.0, 30.0, 15.0, 5.0];

    pub fn new(x: f32, y: f32, multiplier: u32) -> Self {
        Self {
            rect: Aabb::new(x, y, Self::SIZE, Self::SIZE),
            multiplier,
            collected: false,
            anim: FrameCycle::new(0.1, 8),
            bob: Bob::new(2.0, 4.0),
            glow: Bob::new(3.0, 1.0),
        }
    }

    pub fn random_multiplier(rng: &mut Rng) -> u32 {
        Self::MULTIPLIERS[rng.weighted(&Self::WEIGHTS)]
    }

    pub fn score(&self) -> u64 {
        POWER_UP_BASE_SCORE * self.multiplier as u64
    }

    /// Returns true on pickup. Drifting off the back of the camera discards it unclaimed.
    pub fn update(&mut self, dt: f32, player: &Aabb, camera_x: f32) -> bool {
        if self.collected {
            return false;
        }
        self.anim.tick(dt);
        self.bob.tick(dt);
        self.glow.tick(dt);
        self.rect.pos.x -= DRIFT_SPEED * dt;

        if check_collision(&self.rect, player) {
            self.collected = true;
            return true;
        }
        if self.rect.pos.x < camera_x - 50.0 {
            self.collected = true;
        }
        false
    }

    fn color(&self) -> Color {
        match self.multiplier {
            2 => Color::hex(0x32CD32),
            3 => Color::hex(0x1E90FF),
            5 => Color::hex(0xFF8C00),
            _ => Color::hex(0xFF1493),
        }
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        if self.collected {
            return;
        }
        let pos = self.rect.pos + Vec2::new(0.0, self.bob.offset());
        let center = pos + Vec2::splat(Self::SIZE / 2.0);
        let color = self.color();

        target.fill_circle(center, Self::SIZE * 0.75, color.with_alpha(0.2 + 0.3 * self.glow.pulse()));
        let name = format!("powerup_x{}", self.multiplier);
        if target.sprite(&name, pos, self.rect.size, 1.0) {
            return;
        }
        target.fill_rect(pos, self.rect.size, color);
        target.stroke_rect(pos, self.rect.size, 2.0, Color::WHITE);
        // Sparkle orbiting with the animation frame.
        let angle = self.anim.frame() as f32 / 8.0 * std::f32::consts::TAU;
        let sparkle = center + Vec2::new(angle.cos(), angle.sin()) * (Self::SIZE * 0.6);
        target.fill_circle(sparkle, 2.0, Color::WHITE);
        target.text(center, &format!("x{}", self.multiplier), 12.0, Color::WHITE);
    }
}

impl Bounded for PowerUp {
    fn bounds(&self) -> Aabb {
        self.rect
    }
}
