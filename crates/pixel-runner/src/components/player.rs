//! The player character: input-driven movement, two-stage jumping, platform collision,
//! damage invincibility and the weapon inventory.

use glam::Vec2;

use super::animation::FrameCycle;
use super::platform::Platform;
use super::weapon::{Inventory, WeaponKind};
use crate::api::config::PlayerTuning;
use crate::core::collision::{collision_side, resolve_collision, Aabb, Bounded, Side};
use crate::core::rng::Rng;
use crate::input::state::InputState;
use crate::renderer::{Color, DrawTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// What happened during one `Player::update`, for the engine's sound triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerEvents {
    pub jumped: bool,
    pub landed: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Aabb,
    pub vel: Vec2,
    pub grounded: bool,
    pub alive: bool,
    tuning: PlayerTuning,
    speed: f32,
    facing: Facing,
    jump_count: u8,
    jump_was_down: bool,
    invincible_timer: f32,
    inventory: Inventory,
    current_weapon: Option<WeaponKind>,
    last_safe: Vec2,
    anim: FrameCycle,
}

impl Player {
    pub fn new(tuning: PlayerTuning) -> Self {
        let spawn = Vec2::new(tuning.spawn_x, tuning.spawn_y);
        Self {
            rect: Aabb::from_pos_size(spawn, Vec2::new(tuning.width, tuning.height)),
            vel: Vec2::ZERO,
            grounded: false,
            alive: true,
            speed: tuning.speed,
            facing: Facing::Right,
            jump_count: 0,
            jump_was_down: false,
            invincible_timer: 0.0,
            inventory: Inventory::default(),
            current_weapon: None,
            last_safe: spawn,
            anim: FrameCycle::new(0.1, 4),
            tuning,
        }
    }

    pub fn update(
        &mut self,
        dt: f32,
        input: &InputState,
        platforms: &[Platform],
        viewport_height: f32,
    ) -> PlayerEvents {
        let mut events = PlayerEvents::default();
        if !self.alive {
            return events;
        }

        self.invincible_timer = (self.invincible_timer - dt).max(0.0);

        let left = input.left();
        let right = input.right();
        if left {
            self.vel.x = -self.speed;
            self.facing = Facing::Left;
        } else if right {
            self.vel.x = self.speed;
            self.facing = Facing::Right;
        }

        let jump_down = input.jump();
        if jump_down && !self.jump_was_down {
            events.jumped = self.try_jump();
        }
        self.jump_was_down = jump_down;

        self.vel.y += self.tuning.gravity * dt;

        if self.grounded && !left && !right {
            self.vel.x *= self.tuning.friction;
            if self.vel.x.abs() < self.tuning.friction_cutoff {
                self.vel.x = 0.0;
            }
        }

        self.rect.pos += self.vel * dt;

        let was_grounded = self.grounded;
        self.grounded = false;
        self.resolve_platforms(platforms);
        self.check_footing(platforms);
        if self.grounded && !was_grounded {
            self.jump_count = 0;
            events.landed = true;
        }

        if self.rect.pos.x < 0.0 {
            self.rect.pos.x = 0.0;
            self.vel.x = self.vel.x.max(0.0);
        }
        if self.rect.pos.y > viewport_height + self.tuning.fall_margin {
            self.alive = false;
            log::debug!("player fell out of the world at x={:.0}", self.rect.pos.x);
        }

        self.anim.tick(dt);
        events
    }

    fn try_jump(&mut self) -> bool {
        if self.grounded {
            self.vel.y = -self.tuning.jump_power;
            self.jump_count = 1;
            self.grounded = false;
            true
        } else if self.jump_count < self.tuning.max_jumps {
            self.vel.y = -self.tuning.jump_power * self.tuning.double_jump_multiplier;
            self.jump_count = self.tuning.max_jumps;
            true
        } else {
            false
        }
    }

    fn resolve_platforms(&mut self, platforms: &[Platform]) {
        for platform in platforms {
            let Some(mut side) = collision_side(&self.rect, &platform.rect) else {
                continue;
            };

            // A side hit with the feet barely below the top edge is a seam between
            // neighbouring blocks; step onto it instead of stopping dead.
            if matches!(side, Side::Left | Side::Right)
                && self.vel.y >= 0.0
                && self.rect.bottom() - platform.rect.top() <= self.tuning.foot_tolerance
            {
                side = Side::Top;
            }

            match side {
                Side::Top if self.vel.y >= 0.0 => {
                    resolve_collision(&mut self.rect, &platform.rect, side);
                    self.vel.y = 0.0;
                    self.grounded = true;
                    self.last_safe = self.rect.pos;
                }
                Side::Bottom if self.vel.y < 0.0 => {
                    resolve_collision(&mut self.rect, &platform.rect, side);
                    self.vel.y = 0.0;
                }
                Side::Left if self.vel.x > 0.0 => {
                    resolve_collision(&mut self.rect, &platform.rect, side);
                    self.vel.x = 0.0;
                }
                Side::Right if self.vel.x < 0.0 => {
                    resolve_collision(&mut self.rect, &platform.rect, side);
                    self.vel.x = 0.0;
                }
                _ => {}
            }
        }
    }

    /// Ground the player when a platform top is within `foot_tolerance` under the feet.
    fn check_footing(&mut self, platforms: &[Platform]) {
        if self.grounded || self.vel.y < 0.0 {
            return;
        }
        let feet = self.rect.bottom();
        let tolerance = self.tuning.foot_tolerance;
        if let Some(platform) = platforms
            .iter()
            .find(|p| self.rect.overlaps_x(&p.rect) && (feet - p.rect.top()).abs() <= tolerance)
        {
            self.rect.pos.y = platform.rect.top() - self.rect.size.y;
            self.vel.y = 0.0;
            self.grounded = true;
            self.last_safe = self.rect.pos;
        }
    }

    /// Apply a hit. Returns false while still invincible from the previous one.
    pub fn take_damage(&mut self) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.invincible_timer = self.tuning.invincibility_secs;
        true
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    pub fn invincible_remaining(&self) -> f32 {
        self.invincible_timer
    }

    /// Add 1-5 units of `kind` and arm it. Returns the amount granted.
    pub fn obtain_weapon(&mut self, kind: WeaponKind, rng: &mut Rng) -> u32 {
        let amount = rng.range_inclusive(1, 5);
        self.inventory.add(kind, amount);
        self.current_weapon = Some(kind);
        amount
    }

    /// Spend one unit of the armed weapon.
    pub fn use_weapon(&mut self) -> bool {
        match self.current_weapon {
            Some(kind) => self.inventory.take_one(kind),
            None => false,
        }
    }

    pub fn switch_weapon(&mut self, kind: WeaponKind) -> bool {
        if self.inventory.count(kind) == 0 {
            return false;
        }
        self.current_weapon = Some(kind);
        true
    }

    /// After firing: if the armed weapon ran dry, arm the other one or disarm.
    pub fn settle_weapon(&mut self) {
        if let Some(kind) = self.current_weapon {
            if self.inventory.count(kind) == 0 {
                let other = kind.other();
                self.current_weapon = (self.inventory.count(other) > 0).then_some(other);
            }
        }
    }

    /// Force the armed weapon regardless of stock.
    pub fn set_current_weapon(&mut self, kind: Option<WeaponKind>) {
        self.current_weapon = kind;
    }

    pub fn current_weapon(&self) -> Option<WeaponKind> {
        self.current_weapon
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn jump_count(&self) -> u8 {
        self.jump_count
    }

    pub fn last_safe(&self) -> Vec2 {
        self.last_safe
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn position(&self) -> Vec2 {
        self.rect.pos
    }

    /// Respawn at the last grounded position. Inventory is lost.
    pub fn reset(&mut self) {
        self.respawn_at(self.last_safe);
        self.inventory.clear();
        self.current_weapon = None;
    }

    /// Back to the configured spawn for a new run.
    pub fn hard_reset(&mut self) {
        *self = Player::new(self.tuning.clone());
    }

    fn respawn_at(&mut self, pos: Vec2) {
        self.rect.pos = pos;
        self.vel = Vec2::ZERO;
        self.grounded = false;
        self.alive = true;
        self.jump_count = 0;
        self.jump_was_down = false;
        self.invincible_timer = 0.0;
        self.anim.reset();
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        if !self.alive {
            return;
        }
        // Blink at 10 Hz while invincible.
        if self.is_invincible() && (self.invincible_timer * 10.0) as i32 % 2 == 0 {
            return;
        }

        let pos = self.rect.pos;
        let sprite = match self.facing {
            Facing::Left => "player_left",
            Facing::Right => "player_right",
        };
        if target.sprite(sprite, pos, self.rect.size, 1.0) {
            return;
        }

        let body = Color::hex(0xFF6B35);
        let at = |dx: f32, dy: f32| pos + Vec2::new(dx, dy);
        target.fill_rect(at(8.0, 16.0), Vec2::new(16.0, 24.0), body);
        target.fill_rect(at(6.0, 4.0), Vec2::new(20.0, 16.0), Color::hex(0xFCDC00));
        target.fill_rect(at(10.0, 8.0), Vec2::splat(3.0), Color::BLACK);
        target.fill_rect(at(19.0, 8.0), Vec2::splat(3.0), Color::BLACK);
        target.fill_rect(at(24.0, 18.0), Vec2::new(6.0, 12.0), body);
        target.fill_rect(at(2.0, 18.0), Vec2::new(6.0, 12.0), body);

        let legs = Color::hex(0x5C94FC);
        let stride = if self.vel.x.abs() > 50.0 && self.grounded {
            if self.anim.frame() % 2 == 0 { 2.0 } else { -2.0 }
        } else {
            0.0
        };
        target.fill_rect(at(8.0, 40.0), Vec2::new(6.0, 8.0), legs);
        target.fill_rect(at(18.0 + stride, 40.0), Vec2::new(6.0, 8.0), legs);
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb {
        self.rect
    }
}
