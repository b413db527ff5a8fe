//! Text views over a subtree.
//!
//! Two accessors exist because the host contract offers both a logical and a
//! rendered view of an element's text. `text_content` is the logical view:
//! every text descendant, verbatim. `rendered_text` approximates what a
//! reader sees: `script`/`style` subtrees are skipped and whitespace is
//! collapsed. `link_text` is the opportunistic combination the permalink
//! component uses.

use crate::types::{Id, Node};

/// Logical text: all text descendants concatenated verbatim, comments and
/// the subtree structure ignored.
pub fn text_content(node: &Node) -> String {
    let mut out = String::new();
    collect_raw(node, &mut out);
    out
}

fn collect_raw(node: &Node, out: &mut String) {
    match node {
        Node::Text { text, .. } => out.push_str(text),
        Node::Element { children, .. } | Node::Document { children, .. } => {
            for child in children {
                collect_raw(child, out);
            }
        }
        Node::Comment { .. } => {}
    }
}

/// Rendered text: skips `script` and `style` subtrees, trims each text run
/// and joins runs with single spaces.
pub fn rendered_text(node: &Node) -> String {
    let mut out = String::new();
    collect_rendered(node, &mut out);
    out
}

fn collect_rendered(node: &Node, out: &mut String) {
    match node {
        Node::Text { text, .. } => {
            let t = text.trim();
            if !t.is_empty() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(t);
            }
        }
        Node::Element { name, children, .. } => {
            if name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style") {
                return;
            }
            for child in children {
                collect_rendered(child, out);
            }
        }
        Node::Document { children, .. } => {
            for child in children {
                collect_rendered(child, out);
            }
        }
        Node::Comment { .. } => {}
    }
}

/// The accessor used when an element's text becomes a link target: the
/// logical view, falling back to the rendered view when the logical view
/// is empty.
pub fn link_text(node: &Node) -> String {
    let text = text_content(node);
    if !text.is_empty() {
        return text;
    }
    rendered_text(node)
}

/// Replace a container's children with a single text node (or nothing, when
/// `text` is empty). On a text node, replaces its text. Comments are left
/// alone. The new text node's id is unset; callers re-run id assignment.
pub fn set_text_content(node: &mut Node, text: &str) {
    match node {
        Node::Text { text: t, .. } => {
            t.clear();
            t.push_str(text);
        }
        Node::Element { children, .. } | Node::Document { children, .. } => {
            children.clear();
            if !text.is_empty() {
                children.push(Node::Text {
                    id: Id::UNSET,
                    text: text.to_string(),
                });
            }
        }
        Node::Comment { .. } => {}
    }
}
