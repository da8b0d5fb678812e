//! In-memory content surface for headless runs.
//!
//! Keeps a back stack and a scroll offset and logs every command. It never
//! emits navigation events by itself; the scenario drives those.

use std::cell::Cell;

use webshell_core::ContentSurface;

#[derive(Debug, Default)]
pub struct SimulatedSurface {
    history: Vec<String>,
    scroll_top: Cell<i32>,
    visible: bool,
    destroyed: bool,
}

impl SimulatedSurface {
    pub fn new() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    /// Pretend the user scrolled the page.
    pub fn scroll_to(&self, top: i32) {
        self.scroll_top.set(top.max(0));
    }

    pub fn current_url(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Commands after `destroy` are logged and dropped.
    fn released(&self, command: &str) -> bool {
        if self.destroyed {
            log::warn!("[surface] {command} after destroy ignored");
        }
        self.destroyed
    }
}

impl ContentSurface for SimulatedSurface {
    fn load(&mut self, url: &str) {
        if self.released("load") {
            return;
        }
        log::info!("[surface] load {url}");
        self.history.push(url.to_string());
        self.scroll_top.set(0);
    }

    fn reload(&mut self) {
        if self.released("reload") {
            return;
        }
        log::info!("[surface] reload {}", self.current_url().unwrap_or("<blank>"));
    }

    fn stop_loading(&mut self) {
        log::info!("[surface] stop loading");
    }

    fn go_back(&mut self) {
        if self.released("go_back") {
            return;
        }
        if self.history.len() > 1 {
            self.history.pop();
            self.scroll_top.set(0);
        }
        log::info!("[surface] back to {}", self.current_url().unwrap_or("<blank>"));
    }

    fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    fn current_scroll_top(&self) -> i32 {
        self.scroll_top.get()
    }

    fn set_visible(&mut self, visible: bool) {
        if self.released("set_visible") {
            return;
        }
        self.visible = visible;
        log::info!("[surface] visible = {visible}");
    }

    fn destroy(&mut self) {
        self.destroyed = true;
        self.history.clear();
        log::info!("[surface] destroyed");
    }
}
