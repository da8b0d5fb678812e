//! Page-lifecycle and overlay coordinator for a single-page web shell.
//!
//! The host owns a content surface (a web view) and forwards its callbacks
//! and user input into a [`Shell`]. The shell decides what is visible: the
//! page, the error screen, or a fullscreen element. It also issues reload,
//! stop and back commands back to the surface and reports slow loads.
//!
//! Time is driven by the host through [`Shell::advance`]; nothing here
//! spawns threads or reads the wall clock.

pub mod coordinator;
pub mod error_overlay;
pub mod fullscreen;
pub mod gesture;
pub mod immersive;
pub mod intercept;
pub mod load_error;
pub mod scheduler;
pub mod shell;
pub mod surface;
pub mod watchdog;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use coordinator::{LifecycleCoordinator, LoadSession, Notice, Phase, SessionId, ViewState};
pub use fullscreen::DisplayFlags;
pub use gesture::{Fling, GestureIntent, GestureRouter};
pub use intercept::InterceptedResponse;
pub use load_error::LoadErrorKind;
pub use scheduler::{Scheduler, TaskId};
pub use shell::Shell;
pub use surface::{ContentSurface, ElementId, HideCallback};
pub use watchdog::WatchdogTimer;
