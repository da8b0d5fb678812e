//! Fullscreen element overlay (e.g. HTML5 video).
//!
//! At most one element is mounted at a time and the first request wins. The
//! renderer's hide-callbacks are handed back to the caller instead of being
//! invoked here, so the caller can run them once it no longer holds any
//! borrow the renderer might re-enter through.

use crate::surface::{ElementId, HideCallback};

/// The mounted element and how to tell the renderer it was dismissed.
#[derive(Default)]
pub struct FullscreenState {
    pub element: Option<ElementId>,
    pub restore: Option<HideCallback>,
}

impl std::fmt::Debug for FullscreenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FullscreenState")
            .field("element", &self.element)
            .field("restore", &self.restore.is_some())
            .finish()
    }
}

/// Outcome of [`FullscreenOverlayController::enter`].
pub enum Entry {
    /// The element is now mounted.
    Mounted,
    /// Another element was already mounted. The request's callback must be
    /// invoked right away.
    Rejected(HideCallback),
}

/// Window flags owned by the overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayFlags {
    pub fullscreen: bool,
}

#[derive(Debug, Default)]
pub struct FullscreenOverlayController {
    state: FullscreenState,
    flags: DisplayFlags,
}

impl FullscreenOverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `element` in place of the content surface.
    pub fn enter(&mut self, element: ElementId, restore: HideCallback) -> Entry {
        if let Some(active) = self.state.element {
            log::debug!("Rejecting fullscreen {element:?}: {active:?} is already active");
            return Entry::Rejected(restore);
        }
        self.state.element = Some(element);
        self.state.restore = Some(restore);
        self.flags.fullscreen = true;
        log::info!("Entered fullscreen with {element:?}");
        Entry::Mounted
    }

    /// Unmount the active element and clear the fullscreen flag.
    ///
    /// Returns the stored callback, which the caller invokes exactly once.
    /// A second call, or a call with nothing mounted, returns `None`.
    pub fn exit(&mut self) -> Option<HideCallback> {
        let element = self.state.element.take()?;
        self.flags.fullscreen = false;
        log::info!("Exited fullscreen from {element:?}");
        self.state.restore.take()
    }

    pub fn is_active(&self) -> bool {
        self.state.element.is_some()
    }

    pub fn active_element(&self) -> Option<ElementId> {
        self.state.element
    }

    pub fn hides_content(&self) -> bool {
        self.is_active()
    }

    pub fn flags(&self) -> DisplayFlags {
        self.flags
    }
}
