//! Immersive display: system bars stay hidden.
//!
//! The system may reveal its bars (e.g. on an edge swipe). The shell then
//! waits a moment and hides them again. Only the latest reveal counts.

use std::cell::Cell;
use std::rc::Rc;

use crate::scheduler::Scheduler;
use crate::watchdog::WatchdogTimer;

#[derive(Debug)]
pub struct ImmersiveController {
    immersive: Rc<Cell<bool>>,
    rehide: WatchdogTimer,
    rehide_ms: u64,
}

impl ImmersiveController {
    pub fn new(scheduler: Scheduler, rehide_ms: u64) -> Self {
        Self {
            immersive: Rc::new(Cell::new(false)),
            rehide: WatchdogTimer::new(scheduler),
            rehide_ms,
        }
    }

    /// Hide the system bars now.
    pub fn enter(&mut self) {
        self.rehide.cancel();
        if !self.immersive.replace(true) {
            log::debug!("System UI hidden");
        }
    }

    /// The host reports whether the system bars are currently visible.
    pub fn on_system_ui_visibility_changed(&mut self, bars_visible: bool) {
        if !bars_visible {
            self.immersive.set(true);
            self.rehide.cancel();
            return;
        }
        self.immersive.set(false);
        let flag = Rc::downgrade(&self.immersive);
        self.rehide.schedule(self.rehide_ms, move || {
            if let Some(flag) = flag.upgrade() {
                flag.set(true);
                log::debug!("System UI hidden again");
            }
        });
    }

    /// Leave immersive mode for good (teardown).
    pub fn release(&mut self) {
        self.rehide.cancel();
        self.immersive.set(false);
    }

    pub fn is_immersive(&self) -> bool {
        self.immersive.get()
    }

    pub fn rehide_pending(&self) -> bool {
        self.rehide.is_pending()
    }
}
