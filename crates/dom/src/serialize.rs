//! Markup serialization.

use crate::entities::{escape_attr, escape_text};
use crate::types::Node;

fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Serialize a node, including its own tag.
pub fn markup(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Serialize a node's children only (the markup-content view of an element).
pub fn inner_markup(node: &Node) -> String {
    let mut out = String::new();
    if let Some(children) = node.children() {
        for child in children {
            write_node(child, &mut out);
        }
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Document {
            doctype, children, ..
        } => {
            if let Some(dt) = doctype {
                out.push_str("<!DOCTYPE ");
                out.push_str(dt);
                out.push('>');
            }
            for child in children {
                write_node(child, out);
            }
        }
        Node::Element {
            name,
            attributes,
            children,
            ..
        } => {
            out.push('<');
            out.push_str(name);
            for (k, v) in attributes {
                out.push(' ');
                out.push_str(k);
                if let Some(v) = v {
                    out.push_str("=\"");
                    escape_attr(v, out);
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_element(name) {
                return;
            }
            for child in children {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Node::Text { text, .. } => escape_text(text, out),
        Node::Comment { text, .. } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}
