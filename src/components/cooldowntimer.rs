//! Countdown gate used to rate-limit repeated actions.
//!
//! A [`CooldownTimer`] starts "cooling down" when triggered and becomes
//! [`ready`](CooldownTimer::ready) once `duration` seconds have elapsed. The
//! player uses them to gate grip attempts, facing changes and the hurt window.
//!
//! Timers are polled: call [`update`](CooldownTimer::update) once per tick
//! with the frame delta.

/// Polled countdown timer.
///
/// A freshly created timer is ready; call [`trigger`](Self::trigger) to start
/// the countdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CooldownTimer {
    /// Length of the cooldown in seconds.
    pub duration: f32,
    /// Seconds elapsed since the last trigger.
    pub elapsed: f32,
}

impl CooldownTimer {
    pub fn new(duration: f32) -> Self {
        CooldownTimer {
            duration,
            elapsed: duration,
        }
    }

    /// Advance the countdown. Elapsed time saturates at `duration`.
    pub fn update(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// True once the cooldown has fully elapsed.
    pub fn ready(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Restart the countdown.
    pub fn trigger(&mut self) {
        self.elapsed = 0.0;
    }

    /// Force the timer into the ready state.
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
    }

    /// Seconds left before the timer becomes ready.
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }
}
