//! Frame clocks and sinusoidal bobbing shared by animated entities.

/// Cycles a frame index every `frame_time` seconds.
#[derive(Debug, Clone)]
pub struct FrameCycle {
    frame: u32,
    frame_count: u32,
    frame_time: f32,
    timer: f32,
}

impl FrameCycle {
    pub fn new(frame_time: f32, frame_count: u32) -> Self {
        Self {
            frame: 0,
            frame_count: frame_count.max(1),
            frame_time,
            timer: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.timer += dt;
        if self.timer > self.frame_time {
            self.frame = (self.frame + 1) % self.frame_count;
            self.timer = 0.0;
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.timer = 0.0;
    }
}

/// Vertical sine offset: `sin(phase) * amplitude`, phase advancing at `rate` rad/s.
#[derive(Debug, Clone)]
pub struct Bob {
    phase: f32,
    rate: f32,
    amplitude: f32,
}

impl Bob {
    pub fn new(rate: f32, amplitude: f32) -> Self {
        Self {
            phase: 0.0,
            rate,
            amplitude,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.phase += dt * self.rate;
    }

    pub fn offset(&self) -> f32 {
        self.phase.sin() * self.amplitude
    }

    /// Normalised pulse in [0, 1], used for glow effects.
    pub fn pulse(&self) -> f32 {
        (self.phase.sin() + 1.0) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_cycle_wraps() {
        let mut cycle = FrameCycle::new(0.1, 4);
        for _ in 0..4 {
            cycle.tick(0.11);
        }
        assert_eq!(cycle.frame(), 0);
        cycle.tick(0.11);
        assert_eq!(cycle.frame(), 1);
    }

    #[test]
    fn bob_stays_within_amplitude() {
        let mut bob = Bob::new(4.0, 10.0);
        for _ in 0..500 {
            bob.tick(0.016);
            assert!(bob.offset().abs() <= 10.0 + 1e-4);
            assert!((0.0..=1.0).contains(&bob.pulse()));
        }
    }
}
