/// Session clock.
/// Accumulates the frame deltas handed in by the host; all timers are measured against it.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    /// Seconds since the card was created.
    now: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame delta. Negative or non-finite deltas are ignored
    /// so the clock never runs backwards.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.now += frame_dt;
        }
        self.now
    }

    /// Current time in seconds.
    pub fn now(&self) -> f32 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_deltas() {
        let mut clock = Clock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert!((clock.now() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn never_runs_backwards() {
        let mut clock = Clock::new();
        clock.advance(1.0);
        clock.advance(-0.5);
        clock.advance(f32::NAN);
        assert_eq!(clock.now(), 1.0);
    }
}
