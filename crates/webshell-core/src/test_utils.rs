//! Shared test utilities for the shell.
//!
//! [`MockSurface`] records every command it receives. Clones share state,
//! so a test keeps one clone for assertions after moving the other into the
//! coordinator.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::surface::ContentSurface;

/// A recorded surface command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Load(String),
    Reload,
    StopLoading,
    GoBack,
    SetVisible(bool),
    Destroy,
}

/// A content surface that records commands for assertions.
#[derive(Clone, Default)]
pub struct MockSurface {
    calls: Rc<RefCell<Vec<SurfaceCall>>>,
    can_go_back: Rc<Cell<bool>>,
    scroll_top: Rc<Cell<i32>>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls equal to `call`.
    pub fn count(&self, call: &SurfaceCall) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn set_can_go_back(&self, can: bool) {
        self.can_go_back.set(can);
    }

    pub fn set_scroll_top(&self, top: i32) {
        self.scroll_top.set(top);
    }
}

impl ContentSurface for MockSurface {
    fn load(&mut self, url: &str) {
        self.calls.borrow_mut().push(SurfaceCall::Load(url.to_string()));
    }

    fn reload(&mut self) {
        self.calls.borrow_mut().push(SurfaceCall::Reload);
    }

    fn stop_loading(&mut self) {
        self.calls.borrow_mut().push(SurfaceCall::StopLoading);
    }

    fn go_back(&mut self) {
        self.calls.borrow_mut().push(SurfaceCall::GoBack);
    }

    fn can_go_back(&self) -> bool {
        self.can_go_back.get()
    }

    fn current_scroll_top(&self) -> i32 {
        self.scroll_top.get()
    }

    fn set_visible(&mut self, visible: bool) {
        self.calls.borrow_mut().push(SurfaceCall::SetVisible(visible));
    }

    fn destroy(&mut self) {
        self.calls.borrow_mut().push(SurfaceCall::Destroy);
    }
}
