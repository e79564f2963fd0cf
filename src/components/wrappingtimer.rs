//! Timer that wraps modulo a period.
//!
//! Used to track cyclic phases such as the run cycle that drives footstep
//! cues. Changing the period with [`WrappingTimer::adjust_period`] keeps the
//! relative position inside the cycle, so cadence can follow movement speed
//! without a visible jump.

/// Accumulator wrapped into `[0, period)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrappingTimer {
    timer: f32,
    period: f32,
}

impl WrappingTimer {
    /// Create a timer at phase zero.
    ///
    /// # Panics
    ///
    /// Panics if `period` is not strictly positive.
    pub fn new(period: f32) -> Self {
        assert!(
            period > 0.0,
            "WrappingTimer period must be positive, got {period}"
        );
        WrappingTimer { timer: 0.0, period }
    }

    /// Advance by `dt` and wrap. Any finite `dt`, including many periods at
    /// once or a negative step, leaves the accumulator in `[0, period)`.
    ///
    /// # Panics
    ///
    /// Panics if `dt` is NaN or infinite.
    pub fn update(&mut self, dt: f32) {
        assert!(dt.is_finite(), "WrappingTimer delta must be finite, got {dt}");
        self.timer = (self.timer + dt).rem_euclid(self.period);
        // rem_euclid can round up to exactly the period for tiny negatives
        if self.timer >= self.period {
            self.timer = 0.0;
        }
    }

    /// Change the period while preserving the normalised phase.
    ///
    /// # Panics
    ///
    /// Panics if `period` is not strictly positive.
    pub fn adjust_period(&mut self, period: f32) {
        assert!(
            period > 0.0,
            "WrappingTimer period must be positive, got {period}"
        );
        let s = self.get();
        self.period = period;
        self.timer = s * self.period;
        if self.timer >= self.period {
            self.timer = 0.0;
        }
    }

    /// Normalised phase in `[0, 1)`.
    pub fn get(&self) -> f32 {
        self.timer / self.period
    }

    /// Raw accumulator in `[0, period)`.
    pub fn accumulator(&self) -> f32 {
        self.timer
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
    }
}
