//! Logical action flags derived from raw input events.
//!
//! Keyboard keys, the virtual joystick and touch buttons all feed the same flags.
//! Flags are level-triggered here; jump and shoot edge detection happens in the
//! player and the engine respectively.

use std::collections::HashSet;

use super::queue::{custom, InputEvent};
use crate::components::weapon::WeaponKind;

/// DOM key codes the game listens to.
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const DIGIT_1: u32 = 49;
    pub const DIGIT_2: u32 = 50;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const F: u32 = 70;
    pub const J: u32 = 74;
    pub const W: u32 = 87;
}

/// Joystick deflection needed before it counts as left/right.
const JOYSTICK_DEAD_ZONE: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Jump,
    Shoot,
}

#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<u32>,
    joystick_x: f32,
    jump_button: bool,
    jump_pulse: f32,
    shoot_button: bool,
    pointer_down: bool,
    forced: HashSet<Action>,
    weapon_request: Option<WeaponKind>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one raw event into the flags.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key_code } => {
                self.keys_down.insert(key_code);
                match key_code {
                    keys::DIGIT_1 => self.weapon_request = WeaponKind::from_slot(1),
                    keys::DIGIT_2 => self.weapon_request = WeaponKind::from_slot(2),
                    _ => {}
                }
            }
            InputEvent::KeyUp { key_code } => {
                self.keys_down.remove(&key_code);
            }
            InputEvent::PointerDown { .. } => self.pointer_down = true,
            InputEvent::PointerUp { .. } => self.pointer_down = false,
            InputEvent::Custom { kind, a } => match kind {
                custom::JOYSTICK => self.joystick_x = a.clamp(-1.0, 1.0),
                custom::JUMP_BUTTON => self.jump_button = a > 0.5,
                custom::JUMP_PULSE => self.jump_pulse = self.jump_pulse.max(a),
                custom::SHOOT_BUTTON => self.shoot_button = a > 0.5,
                custom::WEAPON_SLOT => {
                    if a >= 0.0 {
                        self.weapon_request = WeaponKind::from_slot(a.round() as u32);
                    }
                }
                _ => log::debug!("ignoring custom input kind {}", kind),
            },
        }
    }

    /// Hold or release an action directly (tests, scripted producers).
    pub fn set(&mut self, action: Action, pressed: bool) {
        if pressed {
            self.forced.insert(action);
        } else {
            self.forced.remove(&action);
        }
    }

    /// Queue a weapon selection, consumed by the next tick.
    pub fn request_weapon(&mut self, kind: WeaponKind) {
        self.weapon_request = Some(kind);
    }

    /// Advance timed inputs (the tap-to-jump pulse).
    pub fn tick(&mut self, dt: f32) {
        self.jump_pulse = (self.jump_pulse - dt).max(0.0);
    }

    fn key(&self, code: u32) -> bool {
        self.keys_down.contains(&code)
    }

    fn forced(&self, action: Action) -> bool {
        self.forced.contains(&action)
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        match action {
            Action::Left => self.left(),
            Action::Right => self.right(),
            Action::Jump => self.jump(),
            Action::Shoot => self.shoot(),
        }
    }

    pub fn left(&self) -> bool {
        self.key(keys::ARROW_LEFT)
            || self.key(keys::A)
            || self.joystick_x < -JOYSTICK_DEAD_ZONE
            || self.forced(Action::Left)
    }

    pub fn right(&self) -> bool {
        self.key(keys::ARROW_RIGHT)
            || self.key(keys::D)
            || self.joystick_x > JOYSTICK_DEAD_ZONE
            || self.forced(Action::Right)
    }

    pub fn jump(&self) -> bool {
        self.key(keys::SPACE)
            || self.key(keys::ARROW_UP)
            || self.key(keys::W)
            || self.jump_button
            || self.jump_pulse > 0.0
            || self.forced(Action::Jump)
    }

    pub fn shoot(&self) -> bool {
        self.key(keys::F)
            || self.key(keys::J)
            || self.pointer_down
            || self.shoot_button
            || self.forced(Action::Shoot)
    }

    /// Take the pending weapon selection, if any.
    pub fn take_weapon_request(&mut self) -> Option<WeaponKind> {
        self.weapon_request.take()
    }

    /// Release everything (focus lost, restart).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_and_wasd_map_to_same_action() {
        let mut input = InputState::new();
        input.apply(&InputEvent::KeyDown { key_code: keys::A });
        assert!(input.left());
        input.apply(&InputEvent::KeyUp { key_code: keys::A });
        assert!(!input.left());
        input.apply(&InputEvent::KeyDown { key_code: keys::ARROW_RIGHT });
        assert!(input.right());
    }

    #[test]
    fn joystick_dead_zone() {
        let mut input = InputState::new();
        input.apply(&InputEvent::Custom { kind: custom::JOYSTICK, a: -0.2 });
        assert!(!input.left());
        input.apply(&InputEvent::Custom { kind: custom::JOYSTICK, a: -0.8 });
        assert!(input.left());
        assert!(!input.right());
    }

    #[test]
    fn jump_pulse_expires() {
        let mut input = InputState::new();
        input.apply(&InputEvent::Custom { kind: custom::JUMP_PULSE, a: 0.1 });
        assert!(input.jump());
        input.tick(0.05);
        assert!(input.jump());
        input.tick(0.06);
        assert!(!input.jump());
    }

    #[test]
    fn pointer_counts_as_shoot() {
        let mut input = InputState::new();
        input.apply(&InputEvent::PointerDown { x: 1.0, y: 1.0 });
        assert!(input.is_pressed(Action::Shoot));
        input.apply(&InputEvent::PointerUp { x: 1.0, y: 1.0 });
        assert!(!input.is_pressed(Action::Shoot));
    }

    #[test]
    fn weapon_request_is_consumed_once() {
        let mut input = InputState::new();
        input.apply(&InputEvent::KeyDown { key_code: keys::DIGIT_2 });
        assert_eq!(input.take_weapon_request(), Some(WeaponKind::Bomb));
        assert_eq!(input.take_weapon_request(), None);
    }

    #[test]
    fn forced_actions() {
        let mut input = InputState::new();
        input.set(Action::Jump, true);
        assert!(input.jump());
        input.set(Action::Jump, false);
        assert!(!input.jump());
    }
}
