//! Permalink synchronizer for commit pages.
//!
//! A page arrives with two marked elements: a `.permalink` span whose text
//! is a stable link target, and an editable `.permalink-path` span holding a
//! suffix to append. At document ready this crate replaces the span with an
//! `a.permalink` anchor carrying the same content, then keeps the anchor's
//! `href` equal to its own text plus the path element's current text on
//! every input event. A [`Highlighter`] seam covers the load-time syntax
//! highlighting pass the page also runs.

mod error;
mod highlight;
mod sync;

pub use error::PermalinkError;
pub use highlight::{HighlightOnLoad, Highlighter, MarkCodeBlocks};
pub use sync::{PATH_MARKER, PERMALINK_MARKER, PermalinkSync};
