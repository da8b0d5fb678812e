//! Tick-driven tweens for the shell chrome.
//!
//! A [`Tween`] moves one `f32` towards a target over a fixed duration. The
//! host advances it with elapsed milliseconds; nothing reads a clock.

/// Curve applied to the linear time fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Quadratic deceleration: fast start, gentle landing.
    Decelerate,
}

impl Easing {
    /// Map a time fraction (clamped to `[0.0, 1.0]`) to a progress fraction.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Decelerate => t * (2.0 - t),
        }
    }
}

/// An animated value.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: u32,
    elapsed_ms: u32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            elapsed_ms: 0,
            easing,
        }
    }

    /// A tween resting at `value`.
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, 0, Easing::Linear)
    }

    /// Restart towards `to` from wherever the value is now. The running
    /// transition is dropped, not queued.
    pub fn retarget(&mut self, to: f32, duration_ms: u32, easing: Easing) {
        *self = Self::new(self.value(), to, duration_ms, easing);
    }

    /// Advance by `dt_ms`; returns the new value.
    pub fn tick(&mut self, dt_ms: u32) -> f32 {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn value(&self) -> f32 {
        if self.duration_ms == 0 {
            return self.to;
        }
        let t = self.elapsed_ms as f32 / self.duration_ms as f32;
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}
