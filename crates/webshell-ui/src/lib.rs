//! Presentational primitives for webshell.
//!
//! Nothing here draws: the host samples these models from its render loop
//! and paints them however it likes. Time only moves when the host calls
//! `advance`.

pub mod animation;
pub mod progress;

pub use animation::{Easing, Tween};
pub use progress::{ProgressIndicator, ProgressSnapshot};
