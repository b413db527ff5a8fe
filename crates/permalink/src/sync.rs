//! The permalink synchronizer.
//!
//! At document ready, the first `.permalink` element is consumed: its text
//! becomes the link target of a new `a.permalink` anchor, its markup content
//! becomes the anchor's content, and the anchor takes its place in the tree.
//! From then on, every input event on the `.permalink-path` element rewrites
//! the anchor's `href` to the anchor's own text followed immediately by the
//! path element's current text.

use crate::error::PermalinkError;
use dom::{Id, Node};
use page::{HookError, InputEvent, PageHook};

/// Class marker of the element whose text is the stable link prefix.
pub const PERMALINK_MARKER: &str = "permalink";
/// Class marker of the editable element holding the path suffix.
pub const PATH_MARKER: &str = "permalink-path";

#[derive(Debug, Default)]
pub struct PermalinkSync {
    anchor: Option<Id>,
    path: Option<Id>,
}

impl PermalinkSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: attach a fresh synchronizer to a page.
    pub fn install(page: &mut page::Page) -> page::HookHandle {
        page.install(Box::new(PermalinkSync::new()))
    }

    /// The anchor element created at initialization, once it exists.
    pub fn anchor_id(&self) -> Option<Id> {
        self.anchor
    }

    /// The resolved path element, once initialization has run.
    pub fn path_id(&self) -> Option<Id> {
        self.path
    }

    fn initialize(&mut self, tree: &mut Node) -> Result<(), PermalinkError> {
        // Both markers are resolved before any mutation, so a missing path
        // marker leaves the document untouched.
        let span = dom::find_by_class(tree, PERMALINK_MARKER).ok_or(
            PermalinkError::MissingMarker {
                marker: PERMALINK_MARKER,
            },
        )?;
        let span_id = span.id();
        let target = dom::link_text(span);
        let inner = span.children().map(<[Node]>::to_vec).unwrap_or_default();

        let path_id = dom::find_by_class(tree, PATH_MARKER)
            .ok_or(PermalinkError::MissingMarker {
                marker: PATH_MARKER,
            })?
            .id();

        let anchor_id = dom::next_free_id(tree);
        let mut anchor = Node::element("a");
        anchor.set_id(anchor_id);
        anchor.add_class(PERMALINK_MARKER);
        anchor.set_attr("href", &target);
        if let Some(children) = anchor.children_mut() {
            *children = inner;
        }

        dom::replace_node(tree, span_id, anchor).ok_or(PermalinkError::Detached {
            what: "permalink marker",
        })?;

        self.anchor = Some(anchor_id);
        self.path = Some(path_id);
        log::debug!(
            target: "permalink",
            "initialized: anchor {anchor_id:?} -> {target:?}, path {path_id:?}"
        );
        Ok(())
    }

    fn recompute(&self, tree: &mut Node) -> Result<(), PermalinkError> {
        let (Some(anchor_id), Some(path_id)) = (self.anchor, self.path) else {
            return Ok(());
        };

        let path_node = dom::find_node_by_id(tree, path_id)
            .ok_or(PermalinkError::Detached { what: "path" })?;
        let path_text = dom::link_text(path_node);

        let anchor = dom::find_node_by_id_mut(tree, anchor_id)
            .ok_or(PermalinkError::Detached { what: "anchor" })?;
        let label = dom::link_text(anchor);

        // Label followed immediately by the path: no separator.
        let href = format!("{label}{path_text}");
        anchor.set_attr("href", &href);
        log::trace!(target: "permalink", "href -> {href:?}");
        Ok(())
    }
}

impl PageHook for PermalinkSync {
    fn on_ready(&mut self, dom: &mut Node) -> Result<(), HookError> {
        self.initialize(dom).map_err(HookError::from)
    }

    fn on_input(&mut self, dom: &mut Node, event: &InputEvent) -> Result<(), HookError> {
        // Only the path element's input events matter; anything arriving
        // before initialization has no anchor to update yet.
        if self.path != Some(event.target) {
            return Ok(());
        }
        self.recompute(dom).map_err(HookError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_tree(markup: &str) -> (PermalinkSync, Node) {
        let mut tree = dom::parse(markup);
        let mut sync = PermalinkSync::new();
        sync.initialize(&mut tree).unwrap();
        (sync, tree)
    }

    #[test]
    fn initialize_resolves_both_markers() {
        let (sync, _tree) = ready_tree(
            r#"<span class="permalink">url</span><span class="permalink-path"></span>"#,
        );
        assert!(sync.anchor_id().is_some());
        assert!(sync.path_id().is_some());
        assert_ne!(sync.anchor_id(), sync.path_id());
    }

    #[test]
    fn initialize_without_permalink_marker_fails() {
        let mut tree = dom::parse(r#"<span class="permalink-path"></span>"#);
        let err = PermalinkSync::new().initialize(&mut tree).unwrap_err();
        assert_eq!(
            err,
            PermalinkError::MissingMarker {
                marker: PERMALINK_MARKER
            }
        );
    }

    #[test]
    fn initialize_without_path_marker_fails_before_mutating() {
        let mut tree = dom::parse(r#"<span class="permalink">url</span>"#);
        let before = tree.clone();
        let err = PermalinkSync::new().initialize(&mut tree).unwrap_err();
        assert_eq!(
            err,
            PermalinkError::MissingMarker {
                marker: PATH_MARKER
            }
        );
        assert_eq!(tree, before, "expected no mutation on failure");
    }

    #[test]
    fn recompute_before_initialize_is_a_no_op() {
        let mut tree = dom::parse("<div></div>");
        let before = tree.clone();
        PermalinkSync::new().recompute(&mut tree).unwrap();
        assert_eq!(tree, before);
    }

    #[test]
    fn recompute_fails_when_the_anchor_left_the_tree() {
        let (sync, mut tree) = ready_tree(
            r#"<span class="permalink">url</span><span class="permalink-path"></span>"#,
        );
        let anchor_id = sync.anchor_id().unwrap();
        dom::replace_node(&mut tree, anchor_id, Node::text("gone")).unwrap();

        let err = sync.recompute(&mut tree).unwrap_err();
        assert_eq!(err, PermalinkError::Detached { what: "anchor" });
    }
}
