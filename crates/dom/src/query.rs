//! Tree lookups and structural mutation.

use crate::types::{Id, Node};

/// First element (document order, depth-first) carrying `class` as a
/// class-attribute token.
pub fn find_by_class<'a>(node: &'a Node, class: &str) -> Option<&'a Node> {
    if matches!(node, Node::Element { .. }) && node.has_class(class) {
        return Some(node);
    }
    for child in node.children()? {
        if let Some(found) = find_by_class(child, class) {
            return Some(found);
        }
    }
    None
}

pub fn find_by_class_mut<'a>(node: &'a mut Node, class: &str) -> Option<&'a mut Node> {
    if matches!(node, Node::Element { .. }) && node.has_class(class) {
        return Some(node);
    }
    for child in node.children_mut()? {
        if let Some(found) = find_by_class_mut(child, class) {
            return Some(found);
        }
    }
    None
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    for child in node.children()? {
        if let Some(found) = find_node_by_id(child, id) {
            return Some(found);
        }
    }
    None
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    for child in node.children_mut()? {
        if let Some(found) = find_node_by_id_mut(child, id) {
            return Some(found);
        }
    }
    None
}

/// Replace the node identified by `target` with `replacement`, keeping the
/// same position among its siblings. Returns the replaced node, or the
/// untouched `replacement` is dropped and `None` returned when `target` is
/// not in the tree. The tree root itself cannot be replaced.
pub fn replace_node(root: &mut Node, target: Id, replacement: Node) -> Option<Node> {
    let mut replacement = Some(replacement);
    replace_in(root, target, &mut replacement)
}

fn replace_in(node: &mut Node, target: Id, replacement: &mut Option<Node>) -> Option<Node> {
    for child in node.children_mut()? {
        if child.id() == target {
            let new = replacement.take()?;
            return Some(std::mem::replace(child, new));
        }
        if let Some(old) = replace_in(child, target, replacement) {
            return Some(old);
        }
    }
    None
}

fn max_id(node: &Node) -> u32 {
    let mut max = node.id().0;
    if let Some(children) = node.children() {
        for child in children {
            max = max.max(max_id(child));
        }
    }
    max
}

/// The lowest id not yet used anywhere in the tree. Stable until the tree
/// gains nodes with assigned ids.
pub fn next_free_id(root: &Node) -> Id {
    Id(max_id(root) + 1)
}

/// Assign ids to every node that still has an unset id, starting above the
/// highest id already present so repeated calls never collide.
pub fn assign_node_ids(root: &mut Node) {
    fn walk(node: &mut Node, next: &mut u32) {
        if node.id().is_unset() {
            node.set_id(Id(*next));
            *next += 1;
        }
        if let Some(children) = node.children_mut() {
            for child in children {
                walk(child, next);
            }
        }
    }

    let mut next = max_id(root) + 1;
    walk(root, &mut next);
}
