//! Syntax-highlighting collaborator seam.
//!
//! The page invokes a highlighter exactly once, at load time, to run its own
//! automatic pass over the tree; nothing here depends on its output.

use dom::Node;
use page::{HookError, PageHook};

pub trait Highlighter {
    /// One automatic pass over the whole document.
    fn highlight_all(&mut self, dom: &mut Node);
}

/// Adapts a [`Highlighter`] into a page hook whose ready handler invokes it
/// once.
pub struct HighlightOnLoad<H: Highlighter> {
    highlighter: H,
}

impl<H: Highlighter> HighlightOnLoad<H> {
    pub fn new(highlighter: H) -> Self {
        Self { highlighter }
    }
}

impl<H: Highlighter> PageHook for HighlightOnLoad<H> {
    fn on_ready(&mut self, dom: &mut Node) -> Result<(), HookError> {
        log::debug!(target: "permalink.highlight", "running load-time highlight pass");
        self.highlighter.highlight_all(dom);
        Ok(())
    }
}

/// Minimal highlighter: tags every `code` element with the `hljs` class,
/// which is the tree mutation the automatic pass of the usual highlighting
/// library leaves behind.
#[derive(Debug, Default)]
pub struct MarkCodeBlocks;

impl Highlighter for MarkCodeBlocks {
    fn highlight_all(&mut self, dom: &mut Node) {
        mark(dom);
    }
}

fn mark(node: &mut Node) {
    if node.is_element_named("code") {
        node.add_class("hljs");
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            mark(child);
        }
    }
}
