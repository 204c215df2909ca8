//! Event types delivered by the tokenizer.

use crate::error::Result;
use std::fmt;

/// Source location captured while tokenizing.
///
/// `line` and `column` are zero-based and measured once the event has been
/// fully consumed. `offset` is the byte offset at the same instant.
/// `start_tag_offset` is one past the byte offset of the `<` that opened the
/// most recent tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
    pub start_tag_offset: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// An attribute as written in a start tag, entities decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    pub name: String,
    pub value: String,
}

/// A start tag together with its attributes, in written order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag {
    pub name: String,
    pub attributes: Vec<RawAttribute>,
}

/// Receives tokenizer events in document order.
///
/// The tokenizer stops at the first handler error and surfaces it verbatim;
/// there is no recovery channel.
pub trait SaxHandler {
    /// A start tag was consumed. Empty elements deliver `open_tag`
    /// immediately followed by `close_tag`.
    fn open_tag(&mut self, tag: OpenTag, position: Position) -> Result<()>;

    /// The matching end tag of the innermost open element was consumed.
    fn close_tag(&mut self) -> Result<()>;

    /// A text run, entities decoded. Runs outside the root element are
    /// whitespace-only; anything else is a tokenizer error.
    fn text(&mut self, chunk: &str) -> Result<()>;

    /// A CDATA section's raw content.
    fn cdata(&mut self, chunk: &str) -> Result<()>;

    /// A comment's content.
    fn comment(&mut self, chunk: &str) -> Result<()>;

    /// A DOCTYPE declaration's text, everything between `<!DOCTYPE` and the
    /// closing `>`.
    fn doctype(&mut self, chunk: &str, position: Position) -> Result<()>;
}
