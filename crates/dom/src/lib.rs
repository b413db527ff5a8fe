//! Minimal document object model.
//!
//! Provides the host-environment surface a page component needs: markup
//! parsing into an owned node tree, class-marker and id lookups, in-place
//! node replacement, text/markup accessors and mutators, and serialization.
//! There is no layout, styling, or rendering here.

pub mod builder;
pub mod entities;
pub mod query;
pub mod serialize;
pub mod text;
pub mod tokenizer;
pub mod types;

pub use builder::{build_dom, parse, parse_fragment};
pub use query::{
    assign_node_ids, find_by_class, find_by_class_mut, find_node_by_id, find_node_by_id_mut,
    next_free_id, replace_node,
};
pub use serialize::{inner_markup, markup};
pub use text::{link_text, rendered_text, set_text_content, text_content};
pub use tokenizer::tokenize;
pub use types::{Id, Node, NodeId, Token};
