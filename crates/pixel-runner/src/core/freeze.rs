use crate::components::player::Player;

/// Debuff length in seconds.
pub const FREEZE_DURATION: f32 = 2.0;
/// Speed multiplier while frozen.
pub const FREEZE_FACTOR: f32 = 0.5;

// Absorbs f32 drift from summing per-frame deltas.
const EXPIRY_EPSILON: f32 = 1e-4;

/// Temporary speed penalty. Remembers the player's speed from before the first trigger and
/// restores exactly that value on expiry.
#[derive(Debug, Clone, Default)]
pub struct FreezeDebuff {
    remaining: f32,
    original_speed: Option<f32>,
}

impl FreezeDebuff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start or refresh the debuff. A refresh never re-saves the already halved speed.
    pub fn trigger(&mut self, player: &mut Player) {
        if self.original_speed.is_none() {
            let speed = player.speed();
            self.original_speed = Some(speed);
            player.set_speed(speed * FREEZE_FACTOR);
        }
        self.remaining = FREEZE_DURATION;
    }

    /// Count down. Returns true on the tick the player's speed is restored.
    pub fn tick(&mut self, dt: f32, player: &mut Player) -> bool {
        if self.original_speed.is_none() {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= EXPIRY_EPSILON {
            self.clear(player);
            return true;
        }
        false
    }

    /// End the debuff now, restoring speed.
    pub fn clear(&mut self, player: &mut Player) {
        if let Some(speed) = self.original_speed.take() {
            player.set_speed(speed);
        }
        self.remaining = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.original_speed.is_some()
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}
