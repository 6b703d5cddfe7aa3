/// Raw input events from any producer: keyboard, mouse/touch, or the on-screen controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at screen coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at screen coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A key was pressed (DOM `keyCode`).
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// Event from the UI layer (virtual joystick, touch buttons).
    /// `kind` is one of the `custom::*` constants; `a` carries the payload.
    Custom { kind: u32, a: f32 },
}

/// `Custom` event kinds understood by `InputState`.
pub mod custom {
    /// Virtual joystick moved; `a` = normalised x in [-1, 1].
    pub const JOYSTICK: u32 = 1;
    /// On-screen jump button; `a` = 1 pressed, 0 released.
    pub const JUMP_BUTTON: u32 = 2;
    /// Tap-to-jump; holds jump for `a` seconds.
    pub const JUMP_PULSE: u32 = 3;
    /// On-screen fire button; `a` = 1 pressed, 0 released.
    pub const SHOOT_BUTTON: u32 = 4;
    /// Weapon slot picked from the HUD; `a` = 1-based slot.
    pub const WEAPON_SLOT: u32 = 5;
}

/// A queue of input events.
/// The host writes events between frames; the engine drains them at the start of each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: 32 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], InputEvent::KeyDown { key_code: 32 });
        assert!(q.is_empty());
    }
}
