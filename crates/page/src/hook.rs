//! The hook seam between the page event loop and its components.
//!
//! Hooks are UI-agnostic and object-safe: they receive only the document
//! tree and the event, never the page itself, so dispatch can hand out a
//! mutable tree without aliasing the hook list.

use dom::{Id, Node};
use std::fmt;

/// A component attached to a page. `on_ready` runs once, when the document
/// becomes ready; `on_input` runs for every input event on any editable
/// region, in installation order. Hooks that only care about one target
/// filter on `event.target`.
pub trait PageHook {
    fn on_ready(&mut self, dom: &mut Node) -> Result<(), HookError>;

    fn on_input(&mut self, dom: &mut Node, event: &InputEvent) -> Result<(), HookError> {
        let _ = (dom, event);
        Ok(())
    }
}

/// An input event: `target` is the editable element whose text changed.
/// The current text is read from the tree, not carried in the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub target: Id,
}

/// Failure surfaced by a hook. `hook` names the failing component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HookError {
    pub hook: &'static str,
    pub message: String,
}

impl HookError {
    pub fn new(hook: &'static str, message: impl Into<String>) -> Self {
        Self {
            hook,
            message: message.into(),
        }
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hook failed: {}", self.hook, self.message)
    }
}

impl std::error::Error for HookError {}
