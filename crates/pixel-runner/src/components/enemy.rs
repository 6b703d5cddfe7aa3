use glam::Vec2;

use super::animation::{Bob, FrameCycle};
use crate::api::types::{AudioSink, SoundEvent};
use crate::core::collision::{check_collision, Aabb, Bounded};
use crate::core::rng::Rng;
use crate::renderer::{Color, DrawTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Snail,
    Penguin,
    Turtle,
    Bird,
    Chiken,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Snail,
        EnemyKind::Penguin,
        EnemyKind::Turtle,
        EnemyKind::Bird,
        EnemyKind::Chiken,
    ];

    /// Relative spawn weights, indexed like `ALL`.
    pub const SPAWN_WEIGHTS: [f32; 5] = [30.0, 25.0, 15.0, 15.0, 15.0];

    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Snail => Vec2::new(24.0, 16.0),
            EnemyKind::Penguin => Vec2::new(20.0, 28.0),
            EnemyKind::Turtle => Vec2::new(26.0, 18.0),
            EnemyKind::Bird => Vec2::new(20.0, 16.0),
            EnemyKind::Chiken => Vec2::new(22.0, 20.0),
        }
    }

    pub fn base_speed(self) -> f32 {
        match self {
            EnemyKind::Snail => 30.0,
            EnemyKind::Penguin => 60.0,
            EnemyKind::Turtle => 40.0,
            EnemyKind::Bird => 80.0,
            EnemyKind::Chiken => 100.0,
        }
    }

    pub fn flies(self) -> bool {
        self == EnemyKind::Bird
    }

    /// Touching these slows the player down.
    pub fn freezes(self) -> bool {
        matches!(self, EnemyKind::Penguin | EnemyKind::Turtle)
    }

    pub fn sprite(self) -> &'static str {
        match self {
            EnemyKind::Snail => "snail",
            EnemyKind::Penguin => "penguin",
            EnemyKind::Turtle => "turtle",
            EnemyKind::Bird => "bird",
            EnemyKind::Chiken => "chiken",
        }
    }

    pub fn random(rng: &mut Rng) -> Self {
        Self::ALL[rng.weighted(&Self::SPAWN_WEIGHTS)]
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub rect: Aabb,
    pub kind: EnemyKind,
    pub active: bool,
    speed: f32,
    direction: f32,
    anim: FrameCycle,
    bob: Option<Bob>,
}

impl Enemy {
    pub fn new(x: f32, y: f32, kind: EnemyKind) -> Self {
        let bob = match kind {
            EnemyKind::Bird => Some(Bob::new(4.0, 10.0)),
            EnemyKind::Chiken => Some(Bob::new(8.0, 6.0)),
            _ => None,
        };
        Self {
            rect: Aabb::from_pos_size(Vec2::new(x, y), kind.size()),
            kind,
            active: true,
            speed: kind.base_speed(),
            direction: -1.0,
            anim: FrameCycle::new(0.2, 4),
            bob,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Move one tick. Returns true when the enemy ran into the player, which also removes it.
    pub fn update(&mut self, dt: f32, player: &Aabb, camera_x: f32, rng: &mut Rng) -> bool {
        if !self.active {
            return false;
        }

        self.anim.tick(dt);
        if let Some(bob) = self.bob.as_mut() {
            bob.tick(dt);
        }

        match self.kind {
            EnemyKind::Snail | EnemyKind::Bird => {
                self.rect.pos.x -= self.speed * dt;
            }
            EnemyKind::Penguin | EnemyKind::Turtle => {
                self.rect.pos.x += self.direction * self.speed * dt;
                let flip = if self.kind == EnemyKind::Penguin { 0.005 } else { 0.003 };
                if rng.chance(flip) {
                    self.direction = -self.direction;
                }
            }
            EnemyKind::Chiken => {
                self.rect.pos.x -= self.speed * dt;
                if rng.chance(0.01) {
                    self.speed = rng.range(60.0, 140.0);
                }
            }
        }

        if check_collision(&self.bounds(), player) {
            self.active = false;
            return true;
        }

        if self.rect.pos.x < camera_x - 100.0 {
            self.active = false;
        }
        false
    }

    /// Projectile/explosion death. Returns false if already dead.
    pub fn kill(&mut self, sounds: Option<&mut dyn AudioSink>) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        if let Some(sink) = sounds {
            sink.play(SoundEvent::DeadMinion);
        }
        true
    }

    fn bob_offset(&self) -> f32 {
        self.bob.as_ref().map_or(0.0, Bob::offset)
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        if !self.active {
            return;
        }
        let pos = self.rect.pos + Vec2::new(0.0, self.bob_offset());
        if target.sprite(self.kind.sprite(), pos, self.rect.size, 1.0) {
            return;
        }

        let frame = self.anim.frame();
        let at = |dx: f32, dy: f32| pos + Vec2::new(dx, dy);
        let mut rect = |dx: f32, dy: f32, w: f32, h: f32, c: u32| {
            target.fill_rect(at(dx, dy), Vec2::new(w, h), Color::hex(c));
        };
        match self.kind {
            EnemyKind::Snail => {
                rect(8.0, 0.0, 16.0, 12.0, 0x8B4513);
                rect(12.0, 2.0, 8.0, 8.0, 0x654321);
                rect(0.0, 8.0, 12.0, 8.0, 0xDEB887);
                let eye = (frame % 2) as f32;
                rect(2.0, 8.0 + eye, 2.0, 2.0, 0x000000);
                rect(6.0, 8.0 + eye, 2.0, 2.0, 0x000000);
            }
            EnemyKind::Penguin => {
                rect(4.0, 4.0, 12.0, 20.0, 0x000000);
                rect(6.0, 8.0, 8.0, 12.0, 0xFFFFFF);
                rect(6.0, 0.0, 8.0, 8.0, 0x000000);
                rect(8.0, 4.0, 4.0, 2.0, 0xFFA500);
                let foot = if frame % 2 == 0 { 1.0 } else { -1.0 };
                rect(4.0 + foot, 24.0, 3.0, 4.0, 0xFFA500);
                rect(13.0 - foot, 24.0, 3.0, 4.0, 0xFFA500);
            }
            EnemyKind::Turtle => {
                rect(4.0, 0.0, 18.0, 12.0, 0x2E8B57);
                rect(8.0, 3.0, 10.0, 6.0, 0x3CB371);
                rect(0.0, 6.0, 6.0, 6.0, 0x9ACD32);
                let leg = (frame % 2) as f32;
                rect(6.0 + leg, 12.0, 4.0, 6.0, 0x9ACD32);
                rect(16.0 - leg, 12.0, 4.0, 6.0, 0x9ACD32);
            }
            EnemyKind::Bird => {
                rect(4.0, 4.0, 12.0, 8.0, 0x4169E1);
                rect(2.0, 2.0, 8.0, 8.0, 0x4169E1);
                rect(0.0, 4.0, 4.0, 2.0, 0xFFA500);
                let wing = if frame % 2 == 0 { 2.0 } else { -2.0 };
                rect(6.0, wing, 6.0, 4.0, 0x191970);
                rect(16.0, 6.0, 4.0, 4.0, 0x4169E1);
            }
            EnemyKind::Chiken => {
                rect(4.0, 6.0, 16.0, 10.0, 0xFFFFFF);
                rect(2.0, 0.0, 8.0, 8.0, 0xFFFFFF);
                rect(4.0, -3.0, 4.0, 3.0, 0xDC143C);
                rect(0.0, 3.0, 3.0, 2.0, 0xFFA500);
                let step = (frame % 2) as f32 * 2.0;
                rect(8.0 + step, 16.0, 2.0, 4.0, 0xFFA500);
                rect(14.0 - step, 16.0, 2.0, 4.0, 0xFFA500);
            }
        }
    }
}

impl Bounded for Enemy {
    /// Collision box follows the drawn (bobbing) position.
    fn bounds(&self) -> Aabb {
        let mut rect = self.rect;
        rect.pos.y += self.bob_offset();
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.016;

    fn far_player() -> Aabb {
        Aabb::new(-10_000.0, -10_000.0, 32.0, 48.0)
    }

    #[test]
    fn snail_drifts_left() {
        let mut rng = Rng::new(1);
        let mut snail = Enemy::new(500.0, 484.0, EnemyKind::Snail);
        for _ in 0..10 {
            assert!(!snail.update(DT, &far_player(), 0.0, &mut rng));
        }
        assert!((snail.rect.pos.x - (500.0 - 30.0 * DT * 10.0)).abs() < 1e-3);
    }

    #[test]
    fn touching_player_reports_hit_once() {
        let mut rng = Rng::new(1);
        let mut penguin = Enemy::new(100.0, 472.0, EnemyKind::Penguin);
        let player = Aabb::new(90.0, 452.0, 32.0, 48.0);
        assert!(penguin.update(DT, &player, 0.0, &mut rng));
        assert!(!penguin.active);
        assert!(!penguin.update(DT, &player, 0.0, &mut rng));
    }

    #[test]
    fn culled_behind_camera() {
        let mut rng = Rng::new(1);
        let mut bird = Enemy::new(850.0, 300.0, EnemyKind::Bird);
        bird.update(DT, &far_player(), 1000.0, &mut rng);
        assert!(!bird.active);
    }

    #[test]
    fn bird_bobs_within_amplitude() {
        let mut rng = Rng::new(3);
        let mut bird = Enemy::new(5000.0, 300.0, EnemyKind::Bird);
        for _ in 0..100 {
            bird.update(DT, &far_player(), 0.0, &mut rng);
            let y = bird.bounds().pos.y;
            assert!((290.0..=310.0).contains(&y));
            assert_eq!(bird.rect.pos.y, 300.0);
        }
    }

    #[test]
    fn chiken_speed_stays_in_range() {
        let mut rng = Rng::new(9);
        let mut chiken = Enemy::new(100_000.0, 480.0, EnemyKind::Chiken);
        for _ in 0..2000 {
            chiken.update(DT, &far_player(), 0.0, &mut rng);
            let s = chiken.speed();
            assert!(s == 100.0 || (60.0..140.0).contains(&s));
        }
    }

    #[test]
    fn kill_plays_sound_once() {
        let mut sounds: Vec<SoundEvent> = Vec::new();
        let mut snail = Enemy::new(0.0, 0.0, EnemyKind::Snail);
        assert!(snail.kill(Some(&mut sounds)));
        assert!(!snail.kill(Some(&mut sounds)));
        assert_eq!(sounds, vec![SoundEvent::DeadMinion]);
        assert!(!snail.active);
    }

    #[test]
    fn only_penguin_and_turtle_freeze() {
        let freezing: Vec<_> = EnemyKind::ALL.iter().filter(|k| k.freezes()).collect();
        assert_eq!(freezing, vec![&EnemyKind::Penguin, &EnemyKind::Turtle]);
    }
}
