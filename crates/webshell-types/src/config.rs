//! Shell configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working shell. Unknown keys are rejected to catch typos early.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ShellError};

/// Placeholder substituted by [`ShellStrings::error_code_message`].
pub const ERROR_CODE_PLACEHOLDER: &str = "{code}";

/// Timings for the page-load progress indicator, in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressTiming {
    /// Alpha fade-in when the bar first appears.
    pub fade_in_ms: u32,
    /// Eased transition between two displayed values.
    pub transition_ms: u32,
    /// Pause at 100% before the fade-out starts.
    pub hold_ms: u32,
    /// Alpha fade-out after completion.
    pub fade_out_ms: u32,
}

impl Default for ProgressTiming {
    fn default() -> Self {
        Self {
            fade_in_ms: 200,
            transition_ms: 500,
            hold_ms: 200,
            fade_out_ms: 200,
        }
    }
}

/// Fling thresholds for back-swipe detection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureThresholds {
    /// Minimum horizontal travel in pixels.
    pub min_distance_px: f32,
    /// Minimum horizontal velocity in pixels per second.
    pub min_velocity_px_s: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            min_distance_px: 100.0,
            min_velocity_px_s: 100.0,
        }
    }
}

/// User-facing strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellStrings {
    /// Shown for host-lookup, connect and timeout failures.
    pub no_internet: String,
    /// Shown for every other main-frame error. Must contain `{code}`.
    pub error_code: String,
    /// Slow-load notice text.
    pub page_load_timeout: String,
    /// Label of the retry action attached to the slow-load notice.
    pub retry: String,
}

impl Default for ShellStrings {
    fn default() -> Self {
        Self {
            no_internet: "No internet connection. Check your network and pull down to retry."
                .to_string(),
            error_code: "Something went wrong (error code {code}).".to_string(),
            page_load_timeout: "The page is taking longer than usual to load.".to_string(),
            retry: "Retry".to_string(),
        }
    }
}

impl ShellStrings {
    /// Render the error-code template for `code`.
    pub fn error_code_message(&self, code: i32) -> String {
        self.error_code
            .replace(ERROR_CODE_PLACEHOLDER, &code.to_string())
    }
}

/// Top-level shell configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// URL loaded when the shell starts.
    pub start_url: String,
    /// Delay after a reload before the slow-load notice may appear.
    pub watchdog_timeout_ms: u64,
    /// Delay before immersive mode is re-applied once the system bars show.
    pub immersive_rehide_ms: u64,
    pub progress: ProgressTiming,
    pub gestures: GestureThresholds,
    pub strings: ShellStrings,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            start_url: "https://www.speedhunters.com/".to_string(),
            watchdog_timeout_ms: 10_000,
            immersive_rehide_ms: 2_000,
            progress: ProgressTiming::default(),
            gestures: GestureThresholds::default(),
            strings: ShellStrings::default(),
        }
    }
}

impl ShellConfig {
    /// Parse and validate a configuration from TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("Loaded shell config from {}", path.display());
        Ok(config)
    }

    /// Reject values the coordinator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.start_url.trim().is_empty() {
            return Err(ShellError::Config("start_url must not be empty".into()));
        }
        if self.watchdog_timeout_ms == 0 {
            return Err(ShellError::Config(
                "watchdog_timeout_ms must be non-zero".into(),
            ));
        }
        if !self.strings.error_code.contains(ERROR_CODE_PLACEHOLDER) {
            return Err(ShellError::Config(format!(
                "strings.error_code must contain {ERROR_CODE_PLACEHOLDER}"
            )));
        }
        if self.gestures.min_distance_px < 0.0 || self.gestures.min_velocity_px_s < 0.0 {
            return Err(ShellError::Config(
                "gesture thresholds must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let cfg = ShellConfig::default();
        assert_eq!(cfg.watchdog_timeout_ms, 10_000);
        assert_eq!(cfg.immersive_rehide_ms, 2_000);
        assert_eq!(cfg.progress.fade_in_ms, 200);
        assert_eq!(cfg.progress.transition_ms, 500);
        assert_eq!(cfg.progress.hold_ms, 200);
        assert_eq!(cfg.progress.fade_out_ms, 200);
        assert!((cfg.gestures.min_distance_px - 100.0).abs() < f32::EPSILON);
        assert!((cfg.gestures.min_velocity_px_s - 100.0).abs() < f32::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = ShellConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, ShellConfig::default());
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let src = r#"
            start_url = "https://example.org/"
            watchdog_timeout_ms = 5000

            [gestures]
            min_distance_px = 60.0

            [strings]
            retry = "Try again"
        "#;
        let cfg = ShellConfig::from_toml_str(src).unwrap();
        assert_eq!(cfg.start_url, "https://example.org/");
        assert_eq!(cfg.watchdog_timeout_ms, 5000);
        assert!((cfg.gestures.min_distance_px - 60.0).abs() < f32::EPSILON);
        // Untouched siblings keep their defaults.
        assert!((cfg.gestures.min_velocity_px_s - 100.0).abs() < f32::EPSILON);
        assert_eq!(cfg.strings.retry, "Try again");
        assert_eq!(cfg.strings.no_internet, ShellStrings::default().no_internet);
    }

    #[test]
    fn unknown_key_rejected() {
        let err = ShellConfig::from_toml_str("watchdog_timout_ms = 1").unwrap_err();
        assert!(matches!(err, ShellError::TomlParse(_)));
    }

    #[test]
    fn zero_watchdog_rejected() {
        let err = ShellConfig::from_toml_str("watchdog_timeout_ms = 0").unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
    }

    #[test]
    fn error_template_requires_placeholder() {
        let src = "[strings]\nerror_code = \"Something broke\"";
        let err = ShellConfig::from_toml_str(src).unwrap_err();
        assert!(format!("{err}").contains("{code}"));
    }

    #[test]
    fn error_code_message_substitutes_code() {
        let strings = ShellStrings::default();
        let msg = strings.error_code_message(42);
        assert!(msg.contains("42"));
        assert!(!msg.contains(ERROR_CODE_PLACEHOLDER));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ShellConfig::load(Path::new("/nonexistent/webshell.toml")).unwrap_err();
        assert!(matches!(err, ShellError::Io(_)));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn error_code_message_always_names_code(code in any::<i32>()) {
                let msg = ShellStrings::default().error_code_message(code);
                prop_assert!(msg.contains(&code.to_string()));
                prop_assert!(!msg.contains(ERROR_CODE_PLACEHOLDER));
            }

            #[test]
            fn any_positive_watchdog_is_accepted(ms in 1u64..=600_000) {
                let cfg = ShellConfig::from_toml_str(&format!("watchdog_timeout_ms = {ms}")).unwrap();
                prop_assert_eq!(cfg.watchdog_timeout_ms, ms);
            }
        }
    }
}
