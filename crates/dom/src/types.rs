pub type NodeId = u32;

/// Node identity within a single tree. `Id(0)` means "not yet assigned";
/// `crate::query::assign_node_ids` fills those in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Id(pub NodeId);

impl Id {
    pub const UNSET: Id = Id(0);

    pub fn is_unset(self) -> bool {
        self.0 == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Document {
        id: Id,
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        id: Id,
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
    Comment {
        id: Id,
        text: String,
    },
}

impl Node {
    /// New element node with an unset id and no attributes or children.
    pub fn element(name: &str) -> Node {
        Node::Element {
            id: Id::UNSET,
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// New text node with an unset id.
    pub fn text(text: &str) -> Node {
        Node::Text {
            id: Id::UNSET,
            text: text.to_string(),
        }
    }

    pub fn id(&self) -> Id {
        match self {
            Node::Document { id, .. } => *id,
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
            Node::Comment { id, .. } => *id,
        }
    }

    pub fn set_id(&mut self, new_id: Id) {
        match self {
            Node::Document { id, .. } => *id = new_id,
            Node::Element { id, .. } => *id = new_id,
            Node::Text { id, .. } => *id = new_id,
            Node::Comment { id, .. } => *id = new_id,
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn is_element_named(&self, target: &str) -> bool {
        matches!(self, Node::Element { name, .. } if name.eq_ignore_ascii_case(target))
    }

    /// First value of the named attribute (ASCII case-insensitive).
    /// Valueless attributes report as present but yield `None` text.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .and_then(|(_, v)| v.as_deref()),
            _ => None,
        }
    }

    /// Replace the named attribute's value, or append it if absent.
    /// No-op on non-element nodes.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let Node::Element { attributes, .. } = self else {
            return;
        };
        for (k, v) in attributes.iter_mut() {
            if k.eq_ignore_ascii_case(name) {
                *v = Some(value.to_string());
                return;
            }
        }
        attributes.push((name.to_ascii_lowercase(), Some(value.to_string())));
    }

    /// Whitespace-separated tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Append a class token unless already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut list = self.attr("class").unwrap_or("").to_string();
        if !list.is_empty() {
            list.push(' ');
        }
        list.push_str(class);
        self.set_attr("class", &list);
    }
}
