//! Back-swipe detection.
//!
//! [`FlingTracker`] turns raw touch events into flings; [`GestureRouter`]
//! decides whether a fling means "go back". Anything that is not a back
//! swipe is left for the content surface to scroll or zoom with.

use webshell_types::config::GestureThresholds;
use webshell_types::input::{TouchEvent, TouchPoint};

/// A completed fling: total displacement and release velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fling {
    pub dx: f32,
    pub dy: f32,
    /// Pixels per second.
    pub velocity_x: f32,
    /// Pixels per second.
    pub velocity_y: f32,
}

/// What the shell should do with a fling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureIntent {
    NavigateBack,
    PassThrough,
}

/// Classifies flings against fixed thresholds.
#[derive(Debug, Clone)]
pub struct GestureRouter {
    thresholds: GestureThresholds,
}

impl GestureRouter {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self { thresholds }
    }

    /// A fling is a back swipe when it is mostly horizontal, long and fast
    /// enough, moves rightwards, and there is history to go back to.
    pub fn classify(&self, fling: &Fling, can_go_back: bool) -> GestureIntent {
        let horizontal = fling.dx.abs() > fling.dy.abs()
            && fling.dx.abs() > self.thresholds.min_distance_px
            && fling.velocity_x.abs() > self.thresholds.min_velocity_px_s;

        if horizontal && fling.dx > 0.0 && can_go_back {
            GestureIntent::NavigateBack
        } else {
            GestureIntent::PassThrough
        }
    }
}

/// Follows a single pointer from down to up.
#[derive(Debug, Default)]
pub struct FlingTracker {
    down: Option<TouchPoint>,
}

impl FlingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a touch event; returns the fling when the pointer lifts.
    ///
    /// Velocity is averaged over the whole gesture. A gesture shorter than
    /// a millisecond is treated as lasting one.
    pub fn on_touch(&mut self, event: &TouchEvent) -> Option<Fling> {
        match event {
            TouchEvent::Down(p) => {
                self.down = Some(*p);
                None
            },
            TouchEvent::Move(_) => None,
            TouchEvent::Up(up) => {
                let down = self.down.take()?;
                let dx = up.x - down.x;
                let dy = up.y - down.y;
                let secs = up.time_ms.saturating_sub(down.time_ms).max(1) as f32 / 1000.0;
                Some(Fling {
                    dx,
                    dy,
                    velocity_x: dx / secs,
                    velocity_y: dy / secs,
                })
            },
            TouchEvent::Cancel => {
                self.down = None;
                None
            },
        }
    }
}
