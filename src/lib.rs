//! xmlgrove - navigable XML document trees
//!
//! Builds an in-memory tree from a SAX-style event stream and exposes
//! namespace-aware queries plus a deterministic serializer over it. The
//! tokenizer delivers events to a [`SaxHandler`]; the tree builder routes
//! each event to the currently open element and hands back an
//! [`XmlDocument`] that behaves as its own root element.
//!
//! ```
//! use xmlgrove::{RenderOptions, XmlDocument};
//!
//! let doc = XmlDocument::parse("<books><book title=\"Twilight\"/></books>").unwrap();
//! let book = doc.child_named("book").unwrap();
//! assert_eq!(book.attr("title"), Some("Twilight"));
//!
//! let compressed = RenderOptions { compressed: true, ..RenderOptions::default() };
//! assert_eq!(doc.render(&compressed), "<books><book title=\"Twilight\"/></books>");
//! ```
//!
//! Namespace mode is opt-in per document:
//!
//! ```
//! use xmlgrove::{ParseOptions, XmlDocument};
//!
//! let doc = XmlDocument::parse_with_options(
//!     "<books xmlns:ns=\"http://x\"><ns:book ns:title=\"T\"/></books>",
//!     ParseOptions { xmlns: true },
//! )
//! .unwrap();
//! let book = doc.child_named_ns("http://x", "book").unwrap().unwrap();
//! assert_eq!(book.attr_ns("http://x", "title").unwrap(), Some("T"));
//! ```

mod core;
mod dom;
mod error;
mod sax;

pub use crate::core::tokenizer::Tokenizer;
pub use dom::{
    AttrIter, AttrTable, NodeKind, NsAttr, NsScope, ParseOptions, PlainAttr, RenderOptions,
    XmlDocument, XmlElement, XmlNode,
};
pub use error::{Error, Result};
pub use sax::{OpenTag, Position, RawAttribute, SaxHandler};
