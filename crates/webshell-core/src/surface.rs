//! Content-surface collaborator.
//!
//! The shell never renders web content itself. The host wraps its embedded
//! renderer in a [`ContentSurface`] and forwards the renderer's callbacks to
//! the shell's event methods.

use serde::{Deserialize, Serialize};

/// Commands the shell issues to the embedded renderer.
pub trait ContentSurface {
    /// Start loading `url`.
    fn load(&mut self, url: &str);

    /// Reload the current page.
    fn reload(&mut self);

    /// Abort the in-flight load, if any.
    fn stop_loading(&mut self);

    /// Navigate one step back in the renderer's history.
    fn go_back(&mut self);

    /// Whether there is history to go back to.
    fn can_go_back(&self) -> bool;

    /// Vertical scroll offset of the content, in pixels.
    fn current_scroll_top(&self) -> i32;

    /// Show or hide the renderer's view.
    fn set_visible(&mut self, visible: bool);

    /// Release the renderer. Called exactly once, on teardown.
    fn destroy(&mut self);
}

/// Opaque handle to an element the renderer wants shown fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// Notifies the renderer that its fullscreen element was dismissed.
pub type HideCallback = Box<dyn FnOnce()>;
