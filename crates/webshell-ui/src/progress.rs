//! Page-load progress indicator.
//!
//! Consumes 0-100 progress ticks from the content surface and exposes a
//! displayed value and opacity for the host to paint as a thin bar. The
//! latest tick always wins: ticks are not required to be monotonic, since a
//! new navigation restarts from 0.

use webshell_types::config::ProgressTiming;

use crate::animation::{Easing, Tween};

/// Value at which the indicator considers the load complete.
pub const COMPLETE: u8 = 100;

/// What the bar is doing after a tick of 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    /// Fully opaque, waiting before the fade-out.
    Holding { remaining_ms: u32 },
    /// Alpha is animating towards zero.
    FadingOut,
}

/// A point-in-time view of the indicator for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub visible: bool,
    /// Displayed value in `[0.0, 100.0]`.
    pub value: f32,
    /// Opacity in `[0.0, 1.0]`.
    pub alpha: f32,
}

/// Animated progress bar model.
#[derive(Debug, Clone)]
pub struct ProgressIndicator {
    timing: ProgressTiming,
    visible: bool,
    value: Tween,
    alpha: Tween,
    target: u8,
    completion: Option<Completion>,
}

impl ProgressIndicator {
    pub fn new(timing: ProgressTiming) -> Self {
        Self {
            timing,
            visible: false,
            value: Tween::settled(0.0),
            alpha: Tween::settled(0.0),
            target: 0,
            completion: None,
        }
    }

    /// Feed a progress tick. Values above 100 are clamped.
    ///
    /// Returns `true` if the target value changed.
    pub fn on_progress(&mut self, progress: u8) -> bool {
        let progress = progress.min(COMPLETE);

        if !self.visible {
            self.visible = true;
            self.alpha = Tween::new(0.0, 1.0, self.timing.fade_in_ms, Easing::Linear);
            log::debug!("progress bar shown");
        } else if self.completion.take().is_some() {
            // A new load began while the previous one was fading out.
            self.alpha.retarget(1.0, self.timing.fade_in_ms, Easing::Linear);
        }

        self.value.retarget(
            f32::from(progress),
            self.timing.transition_ms,
            Easing::Decelerate,
        );

        let changed = self.target != progress;
        self.target = progress;

        if progress == COMPLETE {
            self.completion = Some(Completion::Holding {
                remaining_ms: self.timing.hold_ms,
            });
        }
        changed
    }

    /// Advance the animations by `dt_ms`. Returns `true` while the bar is
    /// still visible.
    pub fn advance(&mut self, dt_ms: u32) -> bool {
        if !self.visible {
            return false;
        }

        self.value.tick(dt_ms);
        match self.completion {
            Some(Completion::Holding { remaining_ms }) if dt_ms < remaining_ms => {
                self.alpha.tick(dt_ms);
                self.completion = Some(Completion::Holding {
                    remaining_ms: remaining_ms - dt_ms,
                });
            },
            Some(Completion::Holding { remaining_ms }) => {
                self.alpha.tick(remaining_ms);
                self.alpha.retarget(0.0, self.timing.fade_out_ms, Easing::Linear);
                self.alpha.tick(dt_ms - remaining_ms);
                self.completion = Some(Completion::FadingOut);
            },
            _ => {
                self.alpha.tick(dt_ms);
            },
        }

        if self.completion == Some(Completion::FadingOut) && self.alpha.is_finished() {
            self.reset();
            log::debug!("progress bar hidden");
        }
        self.visible
    }

    /// Hide immediately and forget the displayed value.
    pub fn reset(&mut self) {
        self.visible = false;
        self.value = Tween::settled(0.0);
        self.alpha = Tween::settled(0.0);
        self.target = 0;
        self.completion = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Most recent tick (the value the bar is animating towards).
    pub fn target(&self) -> u8 {
        self.target
    }

    pub fn displayed_value(&self) -> f32 {
        self.value.value()
    }

    pub fn alpha(&self) -> f32 {
        if self.visible { self.alpha.value() } else { 0.0 }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            visible: self.visible,
            value: self.displayed_value(),
            alpha: self.alpha(),
        }
    }
}
