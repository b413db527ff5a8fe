//! Token stream to node tree construction.
//!
//! A plain open-element stack: end tags pop to the nearest matching open
//! element (closing anything misnested above it); unmatched end tags are
//! dropped; elements still open at end of input are closed implicitly.

use crate::query::assign_node_ids;
use crate::tokenizer::tokenize;
use crate::types::{Id, Node, Token};

struct OpenElement {
    name: String,
    attributes: Vec<(String, Option<String>)>,
    children: Vec<Node>,
}

impl OpenElement {
    fn close(self) -> Node {
        Node::Element {
            id: Id::UNSET,
            name: self.name,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

fn append(open: &mut [OpenElement], roots: &mut Vec<Node>, node: Node) {
    match open.last_mut() {
        Some(frame) => frame.children.push(node),
        None => roots.push(node),
    }
}

pub fn build_dom(tokens: Vec<Token>) -> Node {
    let mut doctype = None;
    let mut roots: Vec<Node> = Vec::new();
    let mut open: Vec<OpenElement> = Vec::new();

    for token in tokens {
        match token {
            Token::Doctype(s) => {
                if doctype.is_none() {
                    doctype = Some(s);
                }
            }
            Token::Text(text) => append(
                &mut open,
                &mut roots,
                Node::Text {
                    id: Id::UNSET,
                    text,
                },
            ),
            Token::Comment(text) => append(
                &mut open,
                &mut roots,
                Node::Comment {
                    id: Id::UNSET,
                    text,
                },
            ),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let frame = OpenElement {
                    name,
                    attributes,
                    children: Vec::new(),
                };
                if self_closing {
                    append(&mut open, &mut roots, frame.close());
                } else {
                    open.push(frame);
                }
            }
            Token::EndTag(name) => {
                let Some(depth) = open
                    .iter()
                    .rposition(|f| f.name.eq_ignore_ascii_case(&name))
                else {
                    log::debug!(target: "dom.builder", "dropping unmatched end tag </{name}>");
                    continue;
                };
                while open.len() > depth {
                    let closed = open.pop().map(OpenElement::close);
                    if let Some(node) = closed {
                        append(&mut open, &mut roots, node);
                    }
                }
            }
        }
    }

    while let Some(frame) = open.pop() {
        let node = frame.close();
        append(&mut open, &mut roots, node);
    }

    Node::Document {
        id: Id::UNSET,
        doctype,
        children: roots,
    }
}

/// Parse markup into a document tree with ids assigned.
pub fn parse(input: &str) -> Node {
    let mut dom = build_dom(tokenize(input));
    assign_node_ids(&mut dom);
    dom
}

/// Parse markup into a list of sibling nodes with ids left unset, for use
/// as another element's inner content.
pub fn parse_fragment(input: &str) -> Vec<Node> {
    match build_dom(tokenize(input)) {
        Node::Document { children, .. } => children,
        _ => unreachable!("build_dom always produces a document node"),
    }
}
