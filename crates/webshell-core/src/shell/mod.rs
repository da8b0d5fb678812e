//! Host-facing facade over [`LifecycleCoordinator`].
//!
//! The coordinator lives in an `Rc<RefCell<_>>` so the watchdog can reach
//! it weakly. Every entry point here borrows it for the duration of one
//! event, then runs the renderer callbacks that event produced with no
//! borrow held. A callback may therefore call back into the shell.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use webshell_types::config::ShellConfig;
use webshell_types::input::TouchEvent;

use crate::coordinator::{LifecycleCoordinator, LoadSession, Notice, Phase, ViewState};
use crate::intercept::InterceptedResponse;
use crate::scheduler::Scheduler;
use crate::surface::{ContentSurface, ElementId, HideCallback};

/// The shell a host embeds.
pub struct Shell<S: ContentSurface + 'static> {
    core: Rc<RefCell<LifecycleCoordinator<S>>>,
    scheduler: Scheduler,
}

impl<S: ContentSurface + 'static> Shell<S> {
    pub fn new(surface: S, scheduler: Scheduler, config: ShellConfig) -> Self {
        let core_scheduler = scheduler.clone();
        let core = Rc::new_cyclic(|this| {
            RefCell::new(LifecycleCoordinator::new(
                surface,
                core_scheduler,
                config,
                Weak::clone(this),
            ))
        });
        Self { core, scheduler }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Run `f` against the coordinator, then flush deferred callbacks.
    fn dispatch<R>(&self, f: impl FnOnce(&mut LifecycleCoordinator<S>) -> R) -> R {
        let out = f(&mut self.core.borrow_mut());
        self.flush_deferred();
        out
    }

    fn flush_deferred(&self) {
        loop {
            let callbacks = self.core.borrow_mut().take_deferred();
            if callbacks.is_empty() {
                break;
            }
            for callback in callbacks {
                callback();
            }
        }
    }

    // ---------------------------------------------------------------
    // Host lifecycle
    // ---------------------------------------------------------------

    pub fn start(&self) {
        self.dispatch(|c| c.start());
    }

    /// Host is going away. Idempotent; also runs on drop.
    pub fn on_teardown(&self) {
        self.dispatch(|c| c.teardown());
    }

    pub fn is_torn_down(&self) -> bool {
        self.core.borrow().is_torn_down()
    }

    /// Advance time: fire due timers, then step animations.
    pub fn advance(&self, dt_ms: u32) {
        // Timers borrow the coordinator themselves.
        self.scheduler.advance(u64::from(dt_ms));
        self.dispatch(|c| c.advance_animations(dt_ms));
    }

    // ---------------------------------------------------------------
    // Content-surface events
    // ---------------------------------------------------------------

    pub fn navigation_started(&self, url: &str) {
        self.dispatch(|c| c.navigation_started(url));
    }

    /// Report a redirect of the current load so its finish is recognised.
    pub fn navigation_redirected(&self, url: &str) {
        self.dispatch(|c| c.navigation_redirected(url));
    }

    /// Ignored unless `url` belongs to the current load.
    pub fn navigation_finished(&self, url: &str) {
        self.dispatch(|c| c.navigation_finished(url));
    }

    pub fn navigation_error(&self, is_main_frame: bool, error_code: i32, description: &str) {
        self.dispatch(|c| c.navigation_error(is_main_frame, error_code, description));
    }

    pub fn progress_changed(&self, progress: u8) {
        self.dispatch(|c| c.progress_changed(progress));
    }

    /// The renderer wants `element` shown fullscreen. `hide` is invoked
    /// exactly once: on exit, on teardown, or right away if another
    /// element is already fullscreen.
    pub fn entered_fullscreen(&self, element: ElementId, hide: HideCallback) {
        self.dispatch(|c| c.entered_fullscreen(element, hide));
    }

    pub fn exited_fullscreen(&self) {
        self.dispatch(|c| c.exited_fullscreen());
    }

    pub fn intercept_request(&self, url: &str) -> Option<InterceptedResponse> {
        self.core.borrow().intercept_request(url)
    }

    // ---------------------------------------------------------------
    // User actions
    // ---------------------------------------------------------------

    pub fn reload(&self) {
        self.dispatch(|c| c.reload());
    }

    pub fn retry(&self) {
        self.dispatch(|c| c.retry());
    }

    pub fn can_start_refresh(&self) -> bool {
        self.core.borrow().can_start_refresh()
    }

    pub fn on_refresh(&self) -> bool {
        self.dispatch(|c| c.on_refresh())
    }

    /// Returns `false` when the host should handle back itself (close).
    pub fn on_back_pressed(&self) -> bool {
        self.dispatch(|c| c.on_back_pressed())
    }

    /// Returns `true` when the event was consumed as a back swipe.
    pub fn on_touch(&self, event: &TouchEvent) -> bool {
        self.dispatch(|c| c.on_touch(event))
    }

    pub fn on_system_ui_visibility_changed(&self, bars_visible: bool) {
        self.dispatch(|c| c.on_system_ui_visibility_changed(bars_visible));
    }

    // ---------------------------------------------------------------
    // Outputs
    // ---------------------------------------------------------------

    pub fn take_notices(&self) -> Vec<Notice> {
        self.core.borrow_mut().take_notices()
    }

    pub fn view(&self) -> ViewState {
        self.core.borrow().view()
    }

    pub fn phase(&self) -> Phase {
        self.core.borrow().phase()
    }

    /// The load currently in charge of the page, if any.
    pub fn session(&self) -> Option<LoadSession> {
        self.core.borrow().session().cloned()
    }

    /// Inspect the content surface. `None` after teardown.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.core.borrow().surface().map(f)
    }
}

impl<S: ContentSurface + 'static> Drop for Shell<S> {
    fn drop(&mut self) {
        self.on_teardown();
    }
}
