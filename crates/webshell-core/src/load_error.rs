//! Main-frame load error classification.
//!
//! Renderers report failures as integer codes. Codes that mean "the network
//! is not reachable" collapse into one friendly message; everything else is
//! surfaced with its code so it can be reported.

use webshell_types::config::ShellStrings;

/// Renderer error codes with special handling.
pub mod codes {
    /// Server or proxy hostname lookup failed.
    pub const HOST_LOOKUP: i32 = -2;
    /// Failed to connect to the server.
    pub const CONNECT: i32 = -6;
    /// Connection timed out.
    pub const TIMEOUT: i32 = -8;
}

/// User-facing category of a main-frame load failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Host lookup, connect or timeout failure.
    NetworkUnreachable,
    /// Any other failure; the code is shown verbatim.
    Other(i32),
}

impl LoadErrorKind {
    pub fn classify(code: i32) -> Self {
        match code {
            codes::HOST_LOOKUP | codes::CONNECT | codes::TIMEOUT => Self::NetworkUnreachable,
            other => Self::Other(other),
        }
    }

    /// Text for the error overlay.
    pub fn message(&self, strings: &ShellStrings) -> String {
        match self {
            Self::NetworkUnreachable => strings.no_internet.clone(),
            Self::Other(code) => strings.error_code_message(*code),
        }
    }
}
