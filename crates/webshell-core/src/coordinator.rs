//! Page-lifecycle and overlay-state coordinator.
//!
//! Reconciles renderer callbacks (navigation start/finish/error, progress,
//! fullscreen) with user actions (refresh, back, fling) and the slow-load
//! watchdog. All methods run on the UI thread; the host serializes events,
//! so nothing here locks.
//!
//! Every navigation start opens a new [`LoadSession`]. A finish only counts
//! if its URL belongs to the current session (the URL it started for, or a
//! redirect target reported since); finishes of superseded loads are
//! dropped. Errors carry no URL and apply to the current session. A session
//! that errored keeps the error screen up and ignores its own trailing
//! finish; only a finish belonging to a later session clears it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Weak;

use serde::{Deserialize, Serialize};
use url::Url;
use webshell_types::config::ShellConfig;
use webshell_types::input::TouchEvent;
use webshell_ui::progress::{COMPLETE, ProgressIndicator, ProgressSnapshot};

use crate::error_overlay::ErrorOverlayController;
use crate::fullscreen::{DisplayFlags, Entry, FullscreenOverlayController};
use crate::gesture::{FlingTracker, GestureIntent, GestureRouter};
use crate::immersive::ImmersiveController;
use crate::intercept::{self, InterceptedResponse};
use crate::load_error::LoadErrorKind;
use crate::scheduler::Scheduler;
use crate::surface::{ContentSurface, ElementId, HideCallback};
use crate::watchdog::WatchdogTimer;

// -----------------------------------------------------------------------
// Session and phase
// -----------------------------------------------------------------------

/// Visible lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing loaded yet, or torn down.
    Idle,
    /// A load is in flight.
    Loading,
    /// The last load finished.
    Loaded,
    /// The error screen is up.
    ErrorShown,
}

/// Identifies one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

/// One page navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSession {
    pub id: SessionId,
    pub url: String,
    /// Redirect targets reported while this session was current.
    pub redirects: Vec<String>,
    /// Highest progress seen in this session (0-100).
    pub progress: u8,
    /// A main-frame error was reported for this session.
    pub errored: bool,
}

impl LoadSession {
    /// Whether a finish for `url` belongs to this session.
    ///
    /// URLs are compared after parsing, ignoring the fragment. A session
    /// opened without a URL owns nothing.
    pub fn owns(&self, url: &str) -> bool {
        let key = comparable_url(url);
        !key.is_empty()
            && std::iter::once(&self.url)
                .chain(&self.redirects)
                .any(|candidate| comparable_url(candidate) == key)
    }
}

fn comparable_url(url: &str) -> String {
    match Url::parse(url.trim()) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.into()
        },
        Err(_) => url.trim().to_string(),
    }
}

/// Advisory messages for the host to surface (e.g. as a snackbar).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The load is taking long. The host offers `retry_label`, which maps
    /// to [`crate::Shell::retry`].
    SlowLoad { message: String, retry_label: String },
}

/// Everything the host needs to paint the shell chrome.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub phase: Phase,
    pub content_visible: bool,
    /// `Some` exactly while the error screen is up.
    pub error_message: Option<String>,
    pub fullscreen_element: Option<ElementId>,
    pub display: DisplayFlags,
    pub immersive: bool,
    pub progress: ProgressSnapshot,
    pub session: Option<SessionId>,
    pub watchdog_pending: bool,
}

// -----------------------------------------------------------------------
// LifecycleCoordinator
// -----------------------------------------------------------------------

/// The hub: owns the session, the overlays and the watchdog, and issues
/// commands to the content surface.
pub struct LifecycleCoordinator<S: ContentSurface + 'static> {
    config: ShellConfig,
    /// `None` once torn down.
    surface: Option<S>,
    phase: Phase,
    session: Option<LoadSession>,
    next_session: u64,

    error_overlay: ErrorOverlayController,
    fullscreen: FullscreenOverlayController,
    progress: ProgressIndicator,
    gestures: GestureRouter,
    fling: FlingTracker,
    immersive: ImmersiveController,
    watchdog: WatchdogTimer,

    content_visible: bool,
    notices: VecDeque<Notice>,
    /// Renderer callbacks to run once the caller has released its borrow.
    deferred: Vec<HideCallback>,

    /// Handed to the watchdog so an expiry after teardown is a no-op.
    this: Weak<RefCell<Self>>,
}

impl<S: ContentSurface + 'static> LifecycleCoordinator<S> {
    pub(crate) fn new(
        surface: S,
        scheduler: Scheduler,
        config: ShellConfig,
        this: Weak<RefCell<Self>>,
    ) -> Self {
        Self {
            progress: ProgressIndicator::new(config.progress.clone()),
            gestures: GestureRouter::new(config.gestures.clone()),
            immersive: ImmersiveController::new(scheduler.clone(), config.immersive_rehide_ms),
            watchdog: WatchdogTimer::new(scheduler),
            config,
            surface: Some(surface),
            phase: Phase::Idle,
            session: None,
            next_session: 0,
            error_overlay: ErrorOverlayController::new(),
            fullscreen: FullscreenOverlayController::new(),
            fling: FlingTracker::new(),
            content_visible: true,
            notices: VecDeque::new(),
            deferred: Vec::new(),
            this,
        }
    }

    // ---------------------------------------------------------------
    // Host lifecycle
    // ---------------------------------------------------------------

    /// Enter immersive mode and load the configured start URL.
    pub fn start(&mut self) {
        self.immersive.enter();
        let url = self.config.start_url.clone();
        if let Some(surface) = self.surface.as_mut() {
            log::info!("Loading start page {url}");
            surface.load(&url);
        }
    }

    /// Cancel timers, dismiss every overlay and release the surface.
    /// Idempotent.
    pub fn teardown(&mut self) {
        let Some(mut surface) = self.surface.take() else {
            return;
        };
        self.watchdog.cancel();
        self.immersive.release();
        if let Some(restore) = self.fullscreen.exit() {
            self.deferred.push(restore);
        }
        self.error_overlay.hide();
        self.progress.reset();
        self.session = None;
        self.phase = Phase::Idle;
        self.notices.clear();
        surface.destroy();
        log::info!("Shell torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.surface.is_none()
    }

    // ---------------------------------------------------------------
    // Content-surface events
    // ---------------------------------------------------------------

    pub fn navigation_started(&mut self, url: &str) {
        if self.is_torn_down() {
            return;
        }
        let id = self.begin_session(url);
        // An error screen stays up until this session finishes.
        if self.phase != Phase::ErrorShown {
            self.phase = Phase::Loading;
        }
        log::debug!("Navigation {id:?} started: {url}");
    }

    /// The renderer followed a redirect while loading the current session.
    /// A later finish for `url` then completes that session.
    pub fn navigation_redirected(&mut self, url: &str) {
        if self.is_torn_down() {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            log::debug!("Navigation {:?} redirected to {url}", session.id);
            session.redirects.push(url.to_string());
        }
    }

    pub fn navigation_finished(&mut self, url: &str) {
        if self.is_torn_down() {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            log::debug!("Ignoring finish with no session: {url}");
            return;
        };
        if !session.owns(url) {
            log::debug!(
                "Ignoring stale finish for {url}: {:?} is loading {}",
                session.id,
                session.url
            );
            return;
        }
        if session.errored {
            log::debug!("Ignoring finish of failed navigation {:?}: {url}", session.id);
            return;
        }
        log::debug!("Navigation {:?} finished: {url}", session.id);

        self.watchdog.cancel();
        self.error_overlay.hide();
        self.phase = Phase::Loaded;
        self.sync_content_visibility();
    }

    pub fn navigation_error(&mut self, is_main_frame: bool, error_code: i32, description: &str) {
        if self.is_torn_down() {
            return;
        }
        if !is_main_frame {
            log::debug!("Ignoring sub-frame error {error_code}: {description}");
            return;
        }
        log::warn!("Main-frame load error {error_code}: {description}");

        let message = LoadErrorKind::classify(error_code).message(&self.config.strings);
        match self.session.as_mut() {
            Some(session) => session.errored = true,
            None => {
                self.begin_session("");
                if let Some(session) = self.session.as_mut() {
                    session.errored = true;
                }
            },
        }
        self.error_overlay.show(message);
        self.phase = Phase::ErrorShown;
        self.sync_content_visibility();
        if let Some(surface) = self.surface.as_mut() {
            surface.stop_loading();
        }
    }

    pub fn progress_changed(&mut self, progress: u8) {
        if self.is_torn_down() {
            return;
        }
        let progress = progress.min(COMPLETE);
        if let Some(session) = self.session.as_mut() {
            session.progress = session.progress.max(progress);
        }
        self.progress.on_progress(progress);
    }

    pub fn entered_fullscreen(&mut self, element: ElementId, hide: HideCallback) {
        if self.is_torn_down() {
            self.deferred.push(hide);
            return;
        }
        match self.fullscreen.enter(element, hide) {
            Entry::Mounted => self.sync_content_visibility(),
            Entry::Rejected(hide) => self.deferred.push(hide),
        }
    }

    pub fn exited_fullscreen(&mut self) {
        if let Some(restore) = self.fullscreen.exit() {
            self.deferred.push(restore);
            self.sync_content_visibility();
        }
    }

    pub fn intercept_request(&self, url: &str) -> Option<InterceptedResponse> {
        intercept::intercept_request(url)
    }

    // ---------------------------------------------------------------
    // User actions
    // ---------------------------------------------------------------

    /// Reload the page, arming the slow-load watchdog. The error screen is
    /// dismissed right away, whatever the outcome.
    pub fn reload(&mut self) {
        if self.is_torn_down() {
            return;
        }
        // The page being reloaded is wherever the last redirect landed.
        let url = self
            .session
            .as_ref()
            .map(|s| s.redirects.last().unwrap_or(&s.url).clone())
            .unwrap_or_default();
        let id = self.begin_session(&url);
        log::info!("Reloading as {id:?}");

        self.start_watchdog();
        self.error_overlay.hide();
        self.phase = Phase::Loading;
        self.sync_content_visibility();
        if let Some(surface) = self.surface.as_mut() {
            surface.reload();
        }
    }

    /// Retry action from the slow-load notice or the error screen.
    pub fn retry(&mut self) {
        log::debug!("Retry requested");
        self.reload();
    }

    /// Whether a pull-to-refresh may begin: the content must be scrolled
    /// to the very top.
    pub fn can_start_refresh(&self) -> bool {
        self.surface
            .as_ref()
            .is_some_and(|s| s.current_scroll_top() == 0)
    }

    /// Pull-to-refresh released. Reloads only when the content is at the
    /// top; the host stops its spinner as soon as this returns.
    pub fn on_refresh(&mut self) -> bool {
        if !self.can_start_refresh() {
            log::debug!("Refresh ignored: content is scrolled");
            return false;
        }
        self.reload();
        true
    }

    /// Back button. Returns `false` when there is no history, in which
    /// case the host should close.
    pub fn on_back_pressed(&mut self) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        if surface.can_go_back() {
            surface.go_back();
            log::debug!("Navigating back");
            true
        } else {
            log::info!("No history; handing back press to the host");
            false
        }
    }

    /// Touch input. Returns `true` when a back swipe was consumed; every
    /// other event belongs to the content surface.
    pub fn on_touch(&mut self, event: &TouchEvent) -> bool {
        let Some(fling) = self.fling.on_touch(event) else {
            return false;
        };
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        match self.gestures.classify(&fling, surface.can_go_back()) {
            GestureIntent::NavigateBack => {
                surface.go_back();
                log::debug!("Back swipe: navigating back");
                true
            },
            GestureIntent::PassThrough => false,
        }
    }

    pub fn on_system_ui_visibility_changed(&mut self, bars_visible: bool) {
        if self.is_torn_down() {
            return;
        }
        self.immersive.on_system_ui_visibility_changed(bars_visible);
    }

    /// Step presentational animations.
    pub fn advance_animations(&mut self, dt_ms: u32) {
        self.progress.advance(dt_ms);
    }

    // ---------------------------------------------------------------
    // Outputs
    // ---------------------------------------------------------------

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub(crate) fn take_deferred(&mut self) -> Vec<HideCallback> {
        std::mem::take(&mut self.deferred)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> Option<&LoadSession> {
        self.session.as_ref()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            phase: self.phase,
            content_visible: self.content_visible,
            error_message: self.error_overlay.message().map(str::to_string),
            fullscreen_element: self.fullscreen.active_element(),
            display: self.fullscreen.flags(),
            immersive: self.immersive.is_immersive(),
            progress: self.progress.snapshot(),
            session: self.session.as_ref().map(|s| s.id),
            watchdog_pending: self.watchdog.is_pending(),
        }
    }

    // ---------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------

    fn begin_session(&mut self, url: &str) -> SessionId {
        self.next_session += 1;
        let id = SessionId(self.next_session);
        self.session = Some(LoadSession {
            id,
            url: url.to_string(),
            redirects: Vec::new(),
            progress: 0,
            errored: false,
        });
        id
    }

    fn start_watchdog(&mut self) {
        let this = Weak::clone(&self.this);
        self.watchdog
            .schedule(self.config.watchdog_timeout_ms, move || {
                if let Some(core) = this.upgrade() {
                    core.borrow_mut().on_watchdog_expired();
                }
            });
    }

    fn on_watchdog_expired(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if self.is_torn_down() || session.errored || session.progress >= COMPLETE {
            return;
        }
        log::warn!(
            "Navigation {:?} still at {}% after {} ms",
            session.id,
            session.progress,
            self.config.watchdog_timeout_ms
        );
        self.notices.push_back(Notice::SlowLoad {
            message: self.config.strings.page_load_timeout.clone(),
            retry_label: self.config.strings.retry.clone(),
        });
    }

    /// The surface is visible unless an overlay covers it.
    fn sync_content_visibility(&mut self) {
        let visible = !self.error_overlay.hides_content() && !self.fullscreen.hides_content();
        if visible == self.content_visible {
            return;
        }
        self.content_visible = visible;
        if let Some(surface) = self.surface.as_mut() {
            surface.set_visible(visible);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_error::codes;
    use crate::test_utils::{MockSurface, SurfaceCall};
    use std::cell::Cell;
    use std::rc::Rc;

    type Core = Rc<RefCell<LifecycleCoordinator<MockSurface>>>;

    fn coordinator() -> (Core, Scheduler, MockSurface) {
        let scheduler = Scheduler::new();
        let surface = MockSurface::new();
        let (s, mock) = (scheduler.clone(), surface.clone());
        let core = Rc::new_cyclic(|this| {
            RefCell::new(LifecycleCoordinator::new(
                surface,
                s,
                ShellConfig::default(),
                Weak::clone(this),
            ))
        });
        (core, scheduler, mock)
    }

    #[test]
    fn start_loads_configured_url() {
        let (core, _, mock) = coordinator();
        core.borrow_mut().start();
        assert_eq!(
            mock.calls(),
            vec![SurfaceCall::Load(ShellConfig::default().start_url)]
        );
        assert!(core.borrow().view().immersive);
    }

    #[test]
    fn start_then_finish_is_loaded() {
        let (core, _, _) = coordinator();
        let mut c = core.borrow_mut();
        c.navigation_started("https://a.test/");
        assert_eq!(c.phase(), Phase::Loading);
        c.progress_changed(100);
        c.navigation_finished("https://a.test/");
        assert_eq!(c.phase(), Phase::Loaded);
        assert!(c.view().content_visible);
    }

    #[test]
    fn progress_is_monotonic_within_session_and_resets_on_start() {
        let (core, _, _) = coordinator();
        let mut c = core.borrow_mut();
        c.navigation_started("https://a.test/");
        c.progress_changed(60);
        c.progress_changed(30);
        assert_eq!(c.session().unwrap().progress, 60);
        c.navigation_started("https://b.test/");
        assert_eq!(c.session().unwrap().progress, 0);
    }

    #[test]
    fn main_frame_connect_error_shows_error_screen() {
        let (core, _, mock) = coordinator();
        {
            let mut c = core.borrow_mut();
            c.navigation_started("https://a.test/");
            c.progress_changed(50);
            c.navigation_error(true, codes::CONNECT, "net::ERR_CONNECTION_REFUSED");
        }
        let view = core.borrow().view();
        assert_eq!(view.phase, Phase::ErrorShown);
        assert!(!view.content_visible);
        assert_eq!(
            view.error_message.as_deref(),
            Some(ShellConfig::default().strings.no_internet.as_str())
        );
        assert_eq!(mock.count(&SurfaceCall::StopLoading), 1);
        assert_eq!(mock.count(&SurfaceCall::SetVisible(false)), 1);
    }

    #[test]
    fn unknown_error_code_is_in_message() {
        let (core, _, _) = coordinator();
        let mut c = core.borrow_mut();
        c.navigation_started("https://a.test/");
        c.navigation_error(true, 42, "weird");
        assert!(c.view().error_message.unwrap().contains("42"));
    }

    #[test]
    fn sub_frame_error_is_ignored() {
        let (core, _, mock) = coordinator();
        let mut c = core.borrow_mut();
        c.navigation_started("https://a.test/");
        c.navigation_error(false, codes::HOST_LOOKUP, "ads.test");
        assert_eq!(c.phase(), Phase::Loading);
        assert!(c.view().error_message.is_none());
        assert_eq!(mock.count(&SurfaceCall::StopLoading), 0);
    }

    #[test]
    fn stale_finish_of_failed_session_is_ignored() {
        let (core, _, _) = coordinator();
        let mut c = core.borrow_mut();
        c.navigation_started("https://a.test/");
        c.navigation_error(true, codes::TIMEOUT, "timeout");
        c.navigation_finished("https://a.test/");
        assert_eq!(c.phase(), Phase::ErrorShown);
        assert!(c.view().error_message.is_some());
    }

    #[test]
    fn new_navigation_keeps_error_until_it_finishes() {
        let (core, _, mock) = coordinator();
        let mut c = core.borrow_mut();
        c.navigation_started("https://a.test/");
        c.navigation_error(true, codes::HOST_LOOKUP, "dns");
        c.navigation_started("https://b.test/");
        assert_eq!(c.phase(), Phase::ErrorShown);
        assert!(c.view().error_message.is_some());

        c.navigation_finished("https://b.test/");
        assert_eq!(c.phase(), Phase::Loaded);
        assert!(c.view().error_message.is_none());
        assert!(c.view().content_visible);
        assert_eq!(mock.count(&SurfaceCall::SetVisible(true)), 1);
    }

    #[test]
    fn session_owns_its_url_and_redirects() {
        let (core, _, _) = coordinator();
        let mut c = core.borrow_mut();
        c.navigation_started("https://a.test");
        c.navigation_redirected("https://www.a.test/home");
        let session = c.session().unwrap();
        assert!(session.owns("https://a.test/"));
        assert!(session.owns("https://a.test/#top"));
        assert!(session.owns("https://www.a.test/home"));
        assert!(!session.owns("https://b.test/"));
        assert!(!session.owns(""));
    }

    #[test]
    fn finish_for_superseded_url_is_ignored() {
        let (core, _, _) = coordinator();
        let mut c = core.borrow_mut();
        c.navigation_started("https://a.test/");
        c.navigation_started("https://b.test/");
        c.navigation_finished("https://a.test/");
        assert_eq!(c.phase(), Phase::Loading);
        c.navigation_finished("https://b.test/");
        assert_eq!(c.phase(), Phase::Loaded);
    }

    #[test]
    fn finish_at_redirect_target_completes_session() {
        let (core, _, _) = coordinator();
        let mut c = core.borrow_mut();
        c.navigation_started("http://a.test/");
        c.navigation_redirected("https://a.test/");
        c.navigation_finished("https://a.test/");
        assert_eq!(c.phase(), Phase::Loaded);
    }

    #[test]
    fn reload_follows_last_redirect() {
        let (core, _, _) = coordinator();
        let mut c = core.borrow_mut();
        c.navigation_started("http://a.test/");
        c.navigation_redirected("https://a.test/");
        c.reload();
        assert_eq!(c.session().unwrap().url, "https://a.test/");
        assert!(c.session().unwrap().redirects.is_empty());
    }

    #[test]
    fn error_without_session_owns_no_finish() {
        let (core, _, _) = coordinator();
        let mut c = core.borrow_mut();
        c.navigation_error(true, codes::CONNECT, "refused");
        c.navigation_finished("https://a.test/");
        assert_eq!(c.phase(), Phase::ErrorShown);
    }

    #[test]
    fn finish_without_session_is_ignored() {
        let (core, _, _) = coordinator();
        let mut c = core.borrow_mut();
        c.navigation_finished("https://a.test/");
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn reload_while_error_shown_hides_overlay_and_arms_watchdog() {
        let (core, _, mock) = coordinator();
        let mut c = core.borrow_mut();
        c.navigation_started("https://a.test/");
        c.navigation_error(true, codes::CONNECT, "refused");
        c.reload();

        let view = c.view();
        assert_eq!(view.phase, Phase::Loading);
        assert!(view.error_message.is_none());
        assert!(view.content_visible);
        assert!(view.watchdog_pending);
        assert_eq!(mock.count(&SurfaceCall::Reload), 1);
        assert_eq!(c.session().unwrap().url, "https://a.test/");
        assert_eq!(c.session().unwrap().progress, 0);
    }

    #[test]
    fn slow_reload_emits_notice() {
        let (core, scheduler, _) = coordinator();
        core.borrow_mut().reload();
        core.borrow_mut().progress_changed(40);
        scheduler.advance(10_000);

        let notices = core.borrow_mut().take_notices();
        assert_eq!(notices.len(), 1);
        let Notice::SlowLoad {
            message,
            retry_label,
        } = &notices[0];
        assert_eq!(message, &ShellConfig::default().strings.page_load_timeout);
        assert_eq!(retry_label, "Retry");
        assert!(core.borrow_mut().take_notices().is_empty());
    }

    #[test]
    fn completed_reload_emits_no_notice() {
        let (core, scheduler, _) = coordinator();
        core.borrow_mut().reload();
        core.borrow_mut().navigation_started("https://a.test/");
        core.borrow_mut().progress_changed(100);
        scheduler.advance(10_000);
        assert!(core.borrow_mut().take_notices().is_empty());
    }

    #[test]
    fn failed_reload_emits_no_slow_notice() {
        let (core, scheduler, _) = coordinator();
        core.borrow_mut().reload();
        core.borrow_mut().navigation_started("https://a.test/");
        core.borrow_mut().navigation_error(true, codes::HOST_LOOKUP, "dns");
        scheduler.advance(10_000);
        assert!(core.borrow_mut().take_notices().is_empty());
    }

    #[test]
    fn finish_cancels_watchdog() {
        let (core, scheduler, _) = coordinator();
        core.borrow_mut().reload();
        core.borrow_mut().navigation_started("https://a.test/");
        core.borrow_mut().navigation_finished("https://a.test/");
        assert!(!core.borrow().view().watchdog_pending);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn refresh_only_at_top() {
        let (core, _, mock) = coordinator();
        mock.set_scroll_top(120);
        assert!(!core.borrow().can_start_refresh());
        assert!(!core.borrow_mut().on_refresh());
        assert_eq!(mock.count(&SurfaceCall::Reload), 0);

        mock.set_scroll_top(0);
        assert!(core.borrow_mut().on_refresh());
        assert_eq!(mock.count(&SurfaceCall::Reload), 1);
    }

    #[test]
    fn back_with_history_goes_back() {
        let (core, _, mock) = coordinator();
        mock.set_can_go_back(true);
        assert!(core.borrow_mut().on_back_pressed());
        assert_eq!(mock.calls(), vec![SurfaceCall::GoBack]);
    }

    #[test]
    fn back_without_history_is_unhandled() {
        let (core, _, mock) = coordinator();
        assert!(!core.borrow_mut().on_back_pressed());
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn back_swipe_navigates_back() {
        use webshell_types::input::TouchPoint;

        let (core, _, mock) = coordinator();
        mock.set_can_go_back(true);
        let mut c = core.borrow_mut();
        assert!(!c.on_touch(&TouchEvent::Down(TouchPoint::new(10.0, 300.0, 0))));
        assert!(c.on_touch(&TouchEvent::Up(TouchPoint::new(180.0, 310.0, 200))));
        assert_eq!(mock.count(&SurfaceCall::GoBack), 1);
    }

    #[test]
    fn second_fullscreen_request_is_deferred_for_rejection() {
        let (core, _, _) = coordinator();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let mut c = core.borrow_mut();
        c.entered_fullscreen(ElementId(1), Box::new(|| {}));
        c.entered_fullscreen(ElementId(2), Box::new(move || h.set(h.get() + 1)));

        for cb in c.take_deferred() {
            cb();
        }
        assert_eq!(hits.get(), 1);
        assert_eq!(c.view().fullscreen_element, Some(ElementId(1)));
        assert!(!c.view().content_visible);
    }

    #[test]
    fn exiting_fullscreen_over_error_keeps_content_hidden() {
        let (core, _, _) = coordinator();
        let mut c = core.borrow_mut();
        c.entered_fullscreen(ElementId(1), Box::new(|| {}));
        c.navigation_started("https://a.test/");
        c.navigation_error(true, 7, "boom");
        c.exited_fullscreen();
        assert!(!c.view().content_visible);
        assert!(c.view().error_message.is_some());
    }

    #[test]
    fn teardown_releases_surface_once() {
        let (core, scheduler, mock) = coordinator();
        let mut c = core.borrow_mut();
        c.reload();
        c.entered_fullscreen(ElementId(3), Box::new(|| {}));
        c.teardown();
        c.teardown();

        assert!(c.is_torn_down());
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.take_deferred().len(), 1);
        assert!(c.view().fullscreen_element.is_none());
        assert_eq!(mock.count(&SurfaceCall::Destroy), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn events_after_teardown_are_ignored() {
        let (core, _, mock) = coordinator();
        let mut c = core.borrow_mut();
        c.teardown();
        c.navigation_started("https://a.test/");
        c.progress_changed(30);
        c.navigation_error(true, codes::CONNECT, "refused");
        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.session().is_none());
        assert!(!c.on_back_pressed());
        assert_eq!(mock.calls(), vec![SurfaceCall::Destroy]);
    }

    #[test]
    fn watchdog_after_coordinator_dropped_is_noop() {
        let (core, scheduler, _) = coordinator();
        core.borrow_mut().reload();
        drop(core);
        assert_eq!(scheduler.advance(10_000), 0);
    }
}
