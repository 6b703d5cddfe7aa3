/// Capped variable timestep.
///
/// Real elapsed time between animation frames is used as `dt`, but clamped to `max_dt`
/// so a backgrounded tab or a slow frame can't produce a huge physics step.
/// Pausing drops the anchor; the first frame after `resume` measures from the resume time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_dt: f32,
    /// Timestamp (ms) of the previous frame, `None` while paused or before the first frame.
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt,
            last_ms: None,
        }
    }

    /// Set the elapsed-time baseline to `now_ms`.
    pub fn anchor(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Forget the baseline (engine paused or stopped).
    pub fn release(&mut self) {
        self.last_ms = None;
    }

    pub fn is_anchored(&self) -> bool {
        self.last_ms.is_some()
    }

    /// Advance to `now_ms`. Returns the clamped delta in seconds.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, self.max_dt)
    }

    /// The dt ceiling in seconds.
    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_frame_passes_through() {
        let mut clock = FrameClock::new(0.016);
        clock.anchor(1000.0);
        let dt = clock.tick(1010.0);
        assert!((dt - 0.010).abs() < 1e-6);
    }

    #[test]
    fn long_frame_is_capped() {
        let mut clock = FrameClock::new(0.016);
        clock.anchor(0.0);
        let dt = clock.tick(5000.0); // tab was backgrounded
        assert_eq!(dt, 0.016);
    }

    #[test]
    fn first_tick_without_anchor_is_zero() {
        let mut clock = FrameClock::new(0.016);
        assert_eq!(clock.tick(123.0), 0.0);
        assert!(clock.is_anchored());
    }

    #[test]
    fn backwards_clock_never_goes_negative() {
        let mut clock = FrameClock::new(0.016);
        clock.anchor(100.0);
        assert_eq!(clock.tick(50.0), 0.0);
    }

    #[test]
    fn release_then_anchor_discards_paused_time() {
        let mut clock = FrameClock::new(0.016);
        clock.anchor(0.0);
        clock.tick(16.0);
        clock.release();
        clock.anchor(60_000.0);
        let dt = clock.tick(60_008.0);
        assert!((dt - 0.008).abs() < 1e-6);
    }
}
