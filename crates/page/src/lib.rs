//! Single-threaded, cooperative page event layer.
//!
//! A [`Page`] owns one document tree and a list of installed [`PageHook`]s.
//! The host delivers exactly two kinds of signals: one "document ready"
//! (fires at most once) and any number of "input" signals on editable
//! regions. Each signal is handled to completion, synchronously, before the
//! next; there is no queuing and no shared mutable state beyond the tree.

mod hook;

pub use hook::{HookError, InputEvent, PageHook};

use dom::{Id, Node};
use std::collections::HashMap;
use std::fmt;

/// Disposer handle returned by [`Page::install`]; pass it back to
/// [`Page::uninstall`] to stop delivery to that hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HookHandle(u64);

#[derive(Debug)]
pub enum PageError {
    /// An input event named an element that is not in the tree.
    UnknownTarget { id: Id },
    Hook(HookError),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::UnknownTarget { id } => {
                write!(f, "input target {id:?} is not in the document tree")
            }
            PageError::Hook(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for PageError {}

impl From<HookError> for PageError {
    fn from(err: HookError) -> Self {
        PageError::Hook(err)
    }
}

struct Slot {
    handle: HookHandle,
    hook: Box<dyn PageHook>,
}

pub struct Page {
    dom: Node,
    slots: Vec<Slot>,
    next_handle: u64,
    ready_fired: bool,
    revisions: HashMap<Id, u64>,
}

impl Page {
    pub fn new(document: Node) -> Self {
        debug_assert!(
            matches!(document, Node::Document { .. }),
            "a page owns a document root"
        );
        Self {
            dom: document,
            slots: Vec::new(),
            next_handle: 1,
            ready_fired: false,
            revisions: HashMap::new(),
        }
    }

    pub fn document(&self) -> &Node {
        &self.dom
    }

    pub fn document_mut(&mut self) -> &mut Node {
        &mut self.dom
    }

    /// Attach a hook. Hooks run in installation order.
    pub fn install(&mut self, hook: Box<dyn PageHook>) -> HookHandle {
        let handle = HookHandle(self.next_handle);
        self.next_handle += 1;
        self.slots.push(Slot { handle, hook });
        handle
    }

    /// Detach a hook, handing it back to the caller. Returns `None` when the
    /// handle was already disposed.
    pub fn uninstall(&mut self, handle: HookHandle) -> Option<Box<dyn PageHook>> {
        let index = self.slots.iter().position(|s| s.handle == handle)?;
        Some(self.slots.remove(index).hook)
    }

    /// Deliver the "document ready" signal. Fires at most once: a second
    /// call logs a warning and no-ops. Hooks run to completion in order;
    /// the first hook failure aborts the remainder, but the signal stays
    /// consumed either way.
    pub fn dispatch_ready(&mut self) -> Result<(), PageError> {
        if self.ready_fired {
            log::warn!(target: "page", "document ready already fired; ignoring repeat dispatch");
            return Ok(());
        }
        self.ready_fired = true;
        log::debug!(target: "page", "dispatching document ready to {} hooks", self.slots.len());
        for slot in &mut self.slots {
            slot.hook.on_ready(&mut self.dom)?;
        }
        Ok(())
    }

    pub fn ready_fired(&self) -> bool {
        self.ready_fired
    }

    /// Deliver an input signal: write `text` into the target element, bump
    /// its value revision, then notify every hook in order. Fails without
    /// touching the tree when the target is unknown.
    pub fn input(&mut self, target: Id, text: &str) -> Result<(), PageError> {
        let Some(node) = dom::find_node_by_id_mut(&mut self.dom, target) else {
            return Err(PageError::UnknownTarget { id: target });
        };
        dom::set_text_content(node, text);
        dom::assign_node_ids(&mut self.dom);
        let revision = self.revisions.entry(target).or_insert(0);
        *revision += 1;
        log::trace!(target: "page", "input on {target:?}, revision {revision}");

        let event = InputEvent { target };
        for slot in &mut self.slots {
            slot.hook.on_input(&mut self.dom, &event)?;
        }
        Ok(())
    }

    /// Monotonic per-target revision counter; increments on every input.
    pub fn value_revision(&self, target: Id) -> u64 {
        self.revisions.get(&target).copied().unwrap_or(0)
    }
}
