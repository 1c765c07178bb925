use crate::constants::{LAG_ADJUSTED_SEC, LAG_THRESHOLD_SEC};

/// Frame clock fed with raw wall-clock deltas.
///
/// Deltas above the lag threshold (a backgrounded tab, a debugger pause) are
/// replaced with a single short step.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    elapsed: f32,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a raw delta in seconds and return the smoothed one.
    pub fn step(&mut self, raw_dt: f32) -> f32 {
        let dt = if !raw_dt.is_finite() || raw_dt < 0.0 {
            0.0
        } else if raw_dt > LAG_THRESHOLD_SEC {
            LAG_ADJUSTED_SEC
        } else {
            raw_dt
        };
        self.elapsed += dt;
        self.frames += 1;
        dt
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
