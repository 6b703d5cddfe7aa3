use glam::Vec2;

use super::enemy::Enemy;
use crate::api::types::AudioSink;
use crate::core::collision::Bounded;
use crate::renderer::{Color, DrawTarget};

/// Blast lifetime in seconds.
pub const EXPLOSION_DURATION: f32 = 0.4;
/// Enemies whose center lies within this distance of the blast die.
pub const KILL_RADIUS: f32 = 60.0;

#[derive(Debug, Clone)]
pub struct Explosion {
    pub center: Vec2,
    pub active: bool,
    timer: f32,
}

impl Explosion {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            active: true,
            timer: EXPLOSION_DURATION,
        }
    }

    /// Create a blast at `center` and kill every active enemy in range. Returns the blast and
    /// the number of enemies it killed.
    pub fn detonate(center: Vec2, enemies: &mut [Enemy], sounds: &mut dyn AudioSink) -> (Self, usize) {
        let mut kills = 0;
        for enemy in enemies.iter_mut().filter(|e| e.active) {
            if enemy.bounds().center().distance(center) < KILL_RADIUS && enemy.kill(Some(&mut *sounds)) {
                kills += 1;
            }
        }
        (Self::new(center), kills)
    }

    pub fn update(&mut self, dt: f32) {
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.active = false;
        }
    }

    /// 0 at detonation, 1 when it fades out.
    pub fn progress(&self) -> f32 {
        (1.0 - self.timer / EXPLOSION_DURATION).clamp(0.0, 1.0)
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        if !self.active {
            return;
        }
        let progress = self.progress();
        let radius = 18.0 + 32.0 * progress;
        let alpha = 1.0 - progress;
        target.fill_circle(self.center, radius + 6.0, Color::hex(0xFFFF00).with_alpha(alpha * 0.35));
        target.fill_circle(self.center, radius, Color::hex(0xFFA500).with_alpha(alpha));
    }
}
