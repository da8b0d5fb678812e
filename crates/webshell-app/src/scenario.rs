//! Scripted event sequences replayed through a [`Shell`].
//!
//! A scenario is a JSON document:
//!
//! ```json
//! { "name": "offline start", "steps": [
//!     { "type": "start" },
//!     { "type": "navigation_error", "code": -2 },
//!     { "type": "expect", "phase": "error_shown", "content_visible": false }
//! ] }
//! ```

use std::path::Path;

use serde::Deserialize;

use webshell_core::{ElementId, Notice, Phase, Shell};
use webshell_types::error::{Result, ShellError};
use webshell_types::input::TouchEvent;

use crate::surface::SimulatedSurface;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub steps: Vec<Step>,
}

fn main_frame() -> bool {
    true
}

/// One host event, user action, clock tick or assertion.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Start,
    NavigationStarted {
        url: String,
    },
    NavigationRedirected {
        url: String,
    },
    NavigationFinished {
        url: String,
    },
    NavigationError {
        #[serde(default = "main_frame")]
        main_frame: bool,
        code: i32,
        #[serde(default)]
        description: String,
    },
    Progress {
        value: u8,
    },
    EnterFullscreen {
        element: ElementId,
    },
    ExitFullscreen,
    Touch {
        event: TouchEvent,
    },
    Scroll {
        top: i32,
    },
    Back,
    Refresh,
    Reload,
    Retry,
    SystemUi {
        bars_visible: bool,
    },
    Intercept {
        url: String,
    },
    Advance {
        ms: u32,
    },
    Teardown,
    /// Fail the run unless the view matches every given field.
    Expect {
        phase: Option<Phase>,
        content_visible: Option<bool>,
        error_visible: Option<bool>,
        fullscreen: Option<bool>,
        notices: Option<usize>,
    },
}

impl Scenario {
    pub fn from_json_str(source: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(source)?;
        if scenario.steps.is_empty() {
            return Err(ShellError::Scenario("scenario has no steps".into()));
        }
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }
}

/// Outcome of a finished run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    pub notices: Vec<Notice>,
    pub exit_requested: bool,
}

/// Replays scenario steps against a shell, collecting notices.
pub struct Runner<'a> {
    shell: &'a Shell<SimulatedSurface>,
    pending: Vec<Notice>,
    summary: RunSummary,
}

impl<'a> Runner<'a> {
    pub fn new(shell: &'a Shell<SimulatedSurface>) -> Self {
        Self {
            shell,
            pending: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    pub fn run(mut self, scenario: &Scenario) -> Result<RunSummary> {
        log::info!(
            "Running scenario '{}' ({} steps)",
            scenario.name,
            scenario.steps.len()
        );
        for (index, step) in scenario.steps.iter().enumerate() {
            self.step(index + 1, step)?;
        }
        Ok(self.summary)
    }

    fn step(&mut self, index: usize, step: &Step) -> Result<()> {
        let shell = self.shell;
        log::debug!("step {index}: {step:?}");
        match step {
            Step::Start => shell.start(),
            Step::NavigationStarted { url } => shell.navigation_started(url),
            Step::NavigationRedirected { url } => shell.navigation_redirected(url),
            Step::NavigationFinished { url } => shell.navigation_finished(url),
            Step::NavigationError {
                main_frame,
                code,
                description,
            } => shell.navigation_error(*main_frame, *code, description),
            Step::Progress { value } => shell.progress_changed(*value),
            Step::EnterFullscreen { element } => {
                let element = *element;
                shell.entered_fullscreen(
                    element,
                    Box::new(move || log::info!("[renderer] {element:?} left fullscreen")),
                );
            },
            Step::ExitFullscreen => shell.exited_fullscreen(),
            Step::Touch { event } => {
                let consumed = shell.on_touch(event);
                match event.point() {
                    Some(p) if consumed => {
                        log::info!("Touch at ({}, {}) consumed as back swipe", p.x, p.y);
                    },
                    Some(p) => log::debug!("Touch at ({}, {}) passed to content", p.x, p.y),
                    None => log::debug!("Touch cancelled"),
                }
            },
            Step::Scroll { top } => {
                shell.with_surface(|s| s.scroll_to(*top));
            },
            Step::Back => {
                if !shell.on_back_pressed() {
                    log::info!("Back unhandled: host would close");
                    self.summary.exit_requested = true;
                }
            },
            Step::Refresh => {
                if !shell.on_refresh() {
                    log::info!("Refresh declined");
                }
            },
            Step::Reload => shell.reload(),
            Step::Retry => shell.retry(),
            Step::SystemUi { bars_visible } => shell.on_system_ui_visibility_changed(*bars_visible),
            Step::Intercept { url } => match shell.intercept_request(url) {
                Some(response) => log::info!(
                    "Intercepted {url}: {} bytes of {}",
                    response.body.len(),
                    response.content_type
                ),
                None => log::info!("Not intercepted: {url}"),
            },
            Step::Advance { ms } => shell.advance(*ms),
            Step::Teardown => shell.on_teardown(),
            Step::Expect {
                phase,
                content_visible,
                error_visible,
                fullscreen,
                notices,
            } => {
                self.check(index, *phase, *content_visible, *error_visible, *fullscreen, *notices)?;
            },
        }

        for notice in shell.take_notices() {
            let Notice::SlowLoad {
                message,
                retry_label,
            } = &notice;
            log::warn!("Notice: {message} [{retry_label}]");
            self.pending.push(notice.clone());
            self.summary.notices.push(notice);
        }
        self.summary.steps = index;
        log::info!("after step {index}: {:?}", shell.view());
        let scheduler = shell.scheduler();
        if let Some(deadline) = scheduler.next_deadline() {
            log::debug!(
                "next timer due in {} ms",
                deadline.saturating_sub(scheduler.now_ms())
            );
        }
        Ok(())
    }

    fn check(
        &mut self,
        index: usize,
        phase: Option<Phase>,
        content_visible: Option<bool>,
        error_visible: Option<bool>,
        fullscreen: Option<bool>,
        notices: Option<usize>,
    ) -> Result<()> {
        let view = self.shell.view();
        let mismatch = |what: &str, expected: String, actual: String| {
            ShellError::Scenario(format!(
                "step {index}: expected {what} {expected}, got {actual}"
            ))
        };

        if let Some(phase) = phase
            && phase != view.phase
        {
            return Err(mismatch("phase", format!("{phase:?}"), format!("{:?}", view.phase)));
        }
        if let Some(visible) = content_visible
            && visible != view.content_visible
        {
            return Err(mismatch(
                "content_visible",
                visible.to_string(),
                view.content_visible.to_string(),
            ));
        }
        if let Some(shown) = error_visible
            && shown != view.error_message.is_some()
        {
            return Err(mismatch(
                "error_visible",
                shown.to_string(),
                view.error_message.is_some().to_string(),
            ));
        }
        if let Some(active) = fullscreen
            && active != view.display.fullscreen
        {
            return Err(mismatch(
                "fullscreen",
                active.to_string(),
                view.display.fullscreen.to_string(),
            ));
        }
        // Counts notices raised since the previous expectation.
        let raised = std::mem::take(&mut self.pending).len();
        if let Some(count) = notices
            && count != raised
        {
            return Err(mismatch("notices", count.to_string(), raised.to_string()));
        }
        Ok(())
    }
}
