//! Sidebar collapse state.
//!
//! The state is a single flag mutated only through [`SidebarAction`]. Each
//! dispatch is applied synchronously, and there is no history, so two
//! toggles return to the starting state.

use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarState {
    open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    Toggle,
    SetOpen(bool),
}

impl SidebarState {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn open(&self) -> bool {
        self.open
    }

    /// Pure transition function behind [`Reducible`].
    pub fn apply(self, action: SidebarAction) -> Self {
        match action {
            SidebarAction::Toggle => Self { open: !self.open },
            SidebarAction::SetOpen(open) => Self { open },
        }
    }
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reducible for SidebarState {
    type Action = SidebarAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = (*self).apply(action);
        log::trace!("Sidebar {:?}: open {} -> {}", action, self.open, next.open);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

/// Unwraps a context lookup, panicking when `component` is rendered outside
/// the provider. A missing provider is a wiring bug and is never defaulted.
pub fn require_provider<T>(context: Option<T>, component: &str) -> T {
    match context {
        Some(value) => value,
        None => panic!("{} must be used within SidebarProvider", component),
    }
}
