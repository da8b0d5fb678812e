//! Platform-agnostic touch input.
//!
//! Hosts map their native motion events to these types before handing them
//! to the shell. Coordinates are in surface pixels, timestamps in
//! milliseconds from an arbitrary monotonic origin.

use serde::{Deserialize, Serialize};

/// A touch sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
    pub time_ms: u64,
}

impl TouchPoint {
    pub const fn new(x: f32, y: f32, time_ms: u64) -> Self {
        Self { x, y, time_ms }
    }
}

/// A single-pointer touch event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TouchEvent {
    /// Finger went down.
    Down(TouchPoint),
    /// Finger moved while down.
    Move(TouchPoint),
    /// Finger lifted.
    Up(TouchPoint),
    /// The gesture was taken over by someone else (e.g. the system).
    Cancel,
}

impl TouchEvent {
    /// The sample carried by this event, if any.
    pub fn point(&self) -> Option<TouchPoint> {
        match self {
            Self::Down(p) | Self::Move(p) | Self::Up(p) => Some(*p),
            Self::Cancel => None,
        }
    }
}
