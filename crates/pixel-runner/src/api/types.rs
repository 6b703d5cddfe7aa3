use serde::Serialize;

/// A sound event emitted by the game logic.
/// The numeric value maps to an audio clip in the host's sound manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum SoundEvent {
    Hit = 0,
    Success = 1,
    Shoot = 2,
    Explosion = 3,
    Dead = 4,
    DeadMinion = 5,
    Jump = 6,
    Bagor = 7,
}

impl SoundEvent {
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Fire-and-forget audio trigger. Implementations must not fail; a clip that can't play is skipped.
pub trait AudioSink {
    fn play(&mut self, sound: SoundEvent);
}

/// Queue the events for the host to drain after the tick.
impl AudioSink for Vec<SoundEvent> {
    fn play(&mut self, sound: SoundEvent) {
        self.push(sound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable() {
        assert_eq!(SoundEvent::Hit.id(), 0);
        assert_eq!(SoundEvent::Bagor.id(), 7);
    }

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<SoundEvent> = Vec::new();
        sink.play(SoundEvent::Shoot);
        sink.play(SoundEvent::Explosion);
        assert_eq!(sink, vec![SoundEvent::Shoot, SoundEvent::Explosion]);
    }
}
