//! Error types for webshell.

use std::io;

/// Errors produced by the webshell framework.
///
/// Page-load failures are not represented here: they are handled inside the
/// lifecycle coordinator and rendered on the error overlay.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("config error: {0}")]
    Config(String),

    #[error("scenario error: {0}")]
    Scenario(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;
