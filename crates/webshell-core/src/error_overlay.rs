//! Blocking error screen.

/// Whether the error screen is up, and what it says.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ErrorState {
    active: bool,
    message: String,
}

/// Shows and hides the error screen in place of the content surface.
///
/// While the screen is active the content surface must be hidden; the
/// coordinator reads [`ErrorOverlayController::hides_content`] when it
/// reconciles surface visibility.
#[derive(Debug, Default)]
pub struct ErrorOverlayController {
    state: ErrorState,
}

impl ErrorOverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the screen with `message`. Re-showing updates the message.
    /// Returns `true` if the screen was not already up.
    pub fn show(&mut self, message: impl Into<String>) -> bool {
        self.state.message = message.into();
        let newly_shown = !self.state.active;
        self.state.active = true;
        if newly_shown {
            log::info!("Error screen shown: {}", self.state.message);
        }
        newly_shown
    }

    /// Hide the screen. Returns `true` if it was up.
    pub fn hide(&mut self) -> bool {
        if !self.state.active {
            return false;
        }
        self.state.active = false;
        self.state.message.clear();
        log::debug!("Error screen hidden");
        true
    }

    /// Message currently on screen.
    pub fn message(&self) -> Option<&str> {
        self.state.active.then_some(self.state.message.as_str())
    }

    pub fn hides_content(&self) -> bool {
        self.state.active
    }
}
