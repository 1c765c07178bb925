//! Easing curves used by the tween scheduler.

/// Named easing curves. Input progress is clamped to \[0, 1\] and every curve
/// maps 0 to 0 and 1 to 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out, the default for tweens that don't name a curve.
    #[default]
    Power1Out,
    /// Quintic ease-out.
    Power4Out,
    ExpoOut,
}

impl Ease {
    #[inline]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power4Out => 1.0 - (1.0 - t).powi(5),
            Ease::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
        }
    }
}
