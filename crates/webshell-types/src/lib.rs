//! Foundation types for webshell.
//!
//! This crate contains the platform-agnostic types shared by every webshell
//! crate: the error enum, the TOML-backed shell configuration, and the touch
//! input events a host forwards to the shell.

pub mod config;
pub mod error;
pub mod input;
