use glam::Vec2;

use super::enemy::Enemy;
use super::weapon::WeaponKind;
use crate::api::types::AudioSink;
use crate::core::collision::{check_collision, Aabb, Bounded};
use crate::renderer::{Color, DrawTarget};

const BOMB_GRAVITY: f32 = 600.0;

/// A fired bullet or lobbed bomb.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub rect: Aabb,
    pub vel: Vec2,
    pub kind: WeaponKind,
    pub active: bool,
}

impl Projectile {
    /// Launch from `origin` (center of the muzzle) toward `direction` (-1 left, +1 right).
    pub fn new(origin: Vec2, direction: f32, kind: WeaponKind) -> Self {
        let (size, vel) = match kind {
            WeaponKind::Gun => (8.0, Vec2::new(400.0 * direction, 0.0)),
            WeaponKind::Bomb => (18.0, Vec2::new(220.0 * direction, -180.0)),
        };
        Self {
            rect: Aabb::from_pos_size(origin - Vec2::splat(size / 2.0), Vec2::splat(size)),
            vel,
            kind,
            active: true,
        }
    }

    /// Advance one tick.
    ///
    /// Bullets kill the first enemy they touch. Bombs detonate on an enemy or when they reach
    /// `ground_y`; the detonation point is returned so the caller can spawn the blast.
    /// Leaving `keep_alive` deactivates the projectile silently.
    pub fn update(
        &mut self,
        dt: f32,
        enemies: &mut [Enemy],
        sounds: &mut dyn AudioSink,
        ground_y: f32,
        keep_alive: &Aabb,
    ) -> Option<Vec2> {
        if !self.active {
            return None;
        }

        self.rect.pos += self.vel * dt;

        if self.kind == WeaponKind::Bomb {
            self.vel.y += BOMB_GRAVITY * dt;
            if self.rect.bottom() > ground_y {
                self.active = false;
                return Some(Vec2::new(self.rect.center().x, ground_y));
            }
        }

        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.active && check_collision(&self.rect, &e.bounds()))
        {
            self.active = false;
            return match self.kind {
                WeaponKind::Bomb => Some(self.rect.center()),
                WeaponKind::Gun => {
                    enemy.kill(Some(sounds));
                    None
                }
            };
        }

        if !check_collision(&self.rect, keep_alive) {
            self.active = false;
        }
        None
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        if !self.active {
            return;
        }
        let sprite = match self.kind {
            WeaponKind::Gun => "bullet_gun",
            WeaponKind::Bomb => "bomb_fire",
        };
        if target.sprite(sprite, self.rect.pos, self.rect.size, 1.0) {
            return;
        }
        match self.kind {
            WeaponKind::Gun => target.fill_rect(self.rect.pos, self.rect.size, Color::hex(0xFFFF00)),
            WeaponKind::Bomb => {
                let r = self.rect.size.x / 2.0;
                target.fill_circle(self.rect.center(), r + 1.0, Color::WHITE);
                target.fill_circle(self.rect.center(), r, Color::hex(0x444444));
            }
        }
    }
}

impl Bounded for Projectile {
    fn bounds(&self) -> Aabb {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::SoundEvent;
    use crate::components::enemy::EnemyKind;

    const DT: f32 = 0.016;

    fn world() -> Aabb {
        Aabb::new(-1000.0, -1000.0, 5000.0, 3000.0)
    }

    #[test]
    fn bullet_flies_straight_and_kills_first_enemy() {
        let mut sounds: Vec<SoundEvent> = Vec::new();
        let mut enemies = vec![
            Enemy::new(150.0, 95.0, EnemyKind::Snail),
            Enemy::new(160.0, 95.0, EnemyKind::Snail),
        ];
        let mut bullet = Projectile::new(Vec2::new(100.0, 100.0), 1.0, WeaponKind::Gun);
        for _ in 0..20 {
            bullet.update(DT, &mut enemies, &mut sounds, 500.0, &world());
            assert!((bullet.rect.center().y - 100.0).abs() < 1e-4);
        }
        assert!(!bullet.active);
        assert!(!enemies[0].active);
        assert!(enemies[1].active);
        assert_eq!(sounds, vec![SoundEvent::DeadMinion]);
    }

    #[test]
    fn bomb_arcs_and_detonates_on_ground() {
        let mut sounds: Vec<SoundEvent> = Vec::new();
        let mut bomb = Projectile::new(Vec2::new(100.0, 450.0), -1.0, WeaponKind::Bomb);
        assert!(bomb.vel.y < 0.0);
        assert!(bomb.vel.x < 0.0);
        let mut blast = None;
        for _ in 0..200 {
            if let Some(at) = bomb.update(DT, &mut [], &mut sounds, 500.0, &world()) {
                blast = Some(at);
                break;
            }
        }
        let at = blast.expect("bomb should land");
        assert_eq!(at.y, 500.0);
        assert!(at.x < 100.0);
        assert!(!bomb.active);
        assert!(sounds.is_empty());
    }

    #[test]
    fn bomb_detonates_on_enemy_without_direct_kill() {
        let mut sounds: Vec<SoundEvent> = Vec::new();
        let mut enemies = vec![Enemy::new(105.0, 90.0, EnemyKind::Bird)];
        let mut bomb = Projectile::new(Vec2::new(100.0, 100.0), 1.0, WeaponKind::Bomb);
        let at = bomb.update(DT, &mut enemies, &mut sounds, 500.0, &world());
        assert!(at.is_some());
        assert!(enemies[0].active);
    }

    #[test]
    fn leaves_keep_alive_region() {
        let mut sounds: Vec<SoundEvent> = Vec::new();
        let mut bullet = Projectile::new(Vec2::new(0.0, 0.0), 1.0, WeaponKind::Gun);
        let region = Aabb::new(-10.0, -10.0, 20.0, 20.0);
        bullet.update(0.1, &mut [], &mut sounds, 500.0, &region);
        assert!(!bullet.active);
    }
}
