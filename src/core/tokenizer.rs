//! XML tokenizer
//!
//! Single-pass push tokenizer: walks the input once and delivers events to a
//! [`SaxHandler`] in document order. Well-formedness lives here — tag
//! matching, single-root enforcement, attribute syntax, terminated
//! constructs — so event consumers can trust the stream without re-checking.
//!
//! XML declarations and processing instructions are consumed and skipped;
//! they have no representation in the document tree.

use crate::core::entities;
use crate::core::scanner::Scanner;
use crate::error::{Error, Result};
use crate::sax::{OpenTag, Position, RawAttribute, SaxHandler};
use std::borrow::Cow;

/// Push tokenizer over a single XML input.
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    /// Names of currently open tags, innermost last.
    open_tags: Vec<String>,
    seen_root: bool,
    root_closed: bool,
    /// One past the offset of the '<' that opened the current tag.
    start_tag_offset: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer for the given input.
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            scanner: Scanner::new(input.as_bytes()),
            open_tags: Vec::new(),
            seen_root: false,
            root_closed: false,
            start_tag_offset: 0,
        }
    }

    /// Tokenize the whole input, delivering each event to `handler`.
    ///
    /// Stops at the first malformed construct or handler error; the partial
    /// event stream delivered up to that point must be discarded by the
    /// caller.
    pub fn run<H: SaxHandler>(mut self, handler: &mut H) -> Result<()> {
        while !self.scanner.is_eof() {
            if self.scanner.peek() == Some(b'<') {
                self.markup(handler)?;
            } else {
                self.text_run(handler)?;
            }
        }

        if let Some(name) = self.open_tags.last() {
            return Err(self.error(format!("unclosed tag <{name}>")));
        }
        if !self.seen_root {
            return Err(self.error("missing root element"));
        }
        Ok(())
    }

    /// Position of the event just consumed.
    fn position(&self) -> Position {
        Position {
            line: self.scanner.line(),
            column: self.scanner.column(),
            offset: self.scanner.position(),
            start_tag_offset: self.start_tag_offset,
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::Parse {
            message: message.into(),
            position: self.position(),
        }
    }

    /// Dispatch markup starting with '<'.
    fn markup<H: SaxHandler>(&mut self, handler: &mut H) -> Result<()> {
        self.start_tag_offset = self.scanner.position() + 1;
        self.scanner.advance(1); // '<'

        match self.scanner.peek() {
            Some(b'/') => self.end_tag(handler),
            Some(b'!') => self.bang_markup(handler),
            Some(b'?') => self.processing_instruction(),
            Some(_) => self.start_tag(handler),
            None => Err(self.error("unexpected end of input after '<'")),
        }
    }

    /// Parse a start tag or empty element tag.
    fn start_tag<H: SaxHandler>(&mut self, handler: &mut H) -> Result<()> {
        if self.root_closed {
            return Err(self.error("content after the document root"));
        }

        let name = match self.scanner.read_name() {
            Some(name) => to_str(self, name)?.to_string(),
            None => return Err(self.error("invalid element name")),
        };

        let mut attributes: Vec<RawAttribute> = Vec::new();
        let mut is_empty = false;
        loop {
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                Some(b'>') => {
                    self.scanner.advance(1);
                    break;
                }
                Some(b'/') => {
                    if self.scanner.peek_at(1) == Some(b'>') {
                        self.scanner.advance(2);
                        is_empty = true;
                        break;
                    }
                    return Err(self.error(format!("malformed start tag <{name}>")));
                }
                Some(_) => {
                    let attribute = self.attribute(&name)?;
                    if attributes.iter().any(|a| a.name == attribute.name) {
                        return Err(
                            self.error(format!("duplicate attribute {}", attribute.name))
                        );
                    }
                    attributes.push(attribute);
                }
                None => return Err(self.error(format!("unclosed start tag <{name}>"))),
            }
        }

        self.seen_root = true;
        let position = self.position();
        handler.open_tag(OpenTag { name: name.clone(), attributes }, position)?;

        if is_empty {
            handler.close_tag()?;
            if self.open_tags.is_empty() {
                self.root_closed = true;
            }
        } else {
            self.open_tags.push(name);
        }
        Ok(())
    }

    /// Parse a single `name="value"` attribute.
    fn attribute(&mut self, tag: &str) -> Result<RawAttribute> {
        let name = match self.scanner.read_name() {
            Some(name) => to_str(self, name)?.to_string(),
            None => return Err(self.error(format!("invalid attribute name in <{tag}>"))),
        };

        self.scanner.skip_whitespace();
        if self.scanner.peek() != Some(b'=') {
            return Err(self.error(format!("attribute {name} is missing a value")));
        }
        self.scanner.advance(1);
        self.scanner.skip_whitespace();

        let quote = match self.scanner.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(self.error(format!("attribute {name} value must be quoted"))),
        };
        self.scanner.advance(1);

        let start = self.scanner.position();
        let end = match self.scanner.find_byte(quote) {
            Some(end) => end,
            None => return Err(self.error(format!("attribute {name} has an unterminated value"))),
        };
        let raw = to_str(self, self.scanner.slice(start, end))?;
        if raw.contains('<') {
            return Err(self.error(format!("attribute {name} value contains '<'")));
        }
        let value = self.decode(raw)?.into_owned();
        self.scanner.advance_to(end + 1);

        Ok(RawAttribute { name, value })
    }

    /// Parse an end tag and match it against the open-tag stack.
    fn end_tag<H: SaxHandler>(&mut self, handler: &mut H) -> Result<()> {
        self.scanner.advance(1); // '/'

        let name = match self.scanner.read_name() {
            Some(name) => to_str(self, name)?,
            None => return Err(self.error("invalid name in closing tag")),
        };
        self.scanner.skip_whitespace();
        if self.scanner.peek() != Some(b'>') {
            return Err(self.error(format!("malformed closing tag </{name}>")));
        }
        self.scanner.advance(1);

        match self.open_tags.pop() {
            Some(open) if open == name => {}
            Some(open) => {
                return Err(self.error(format!("expected </{open}>, found </{name}>")));
            }
            None => {
                return Err(
                    self.error(format!("closing tag </{name}> without a matching start tag"))
                );
            }
        }
        if self.open_tags.is_empty() {
            self.root_closed = true;
        }
        handler.close_tag()
    }

    /// Parse a text run up to the next '<'.
    fn text_run<H: SaxHandler>(&mut self, handler: &mut H) -> Result<()> {
        let start = self.scanner.position();
        let end = self.scanner.find_byte(b'<').unwrap_or(self.scanner.input_len());
        let raw = to_str(self, self.scanner.slice(start, end))?;
        let decoded = self.decode(raw)?;
        self.scanner.advance_to(end);

        // Only whitespace may appear outside the root; the handler decides
        // what to do with it (the tree builder discards it).
        if self.open_tags.is_empty() && !decoded.trim().is_empty() {
            return Err(self.error("text outside of the root element"));
        }
        handler.text(&decoded)
    }

    /// Dispatch markup starting with "<!" (comment, CDATA, DOCTYPE).
    fn bang_markup<H: SaxHandler>(&mut self, handler: &mut H) -> Result<()> {
        self.scanner.advance(1); // '!'

        if self.scanner.starts_with(b"--") {
            self.comment(handler)
        } else if self.scanner.starts_with(b"[CDATA[") {
            self.cdata_section(handler)
        } else if self.scanner.starts_with(b"DOCTYPE") {
            self.doctype(handler)
        } else {
            Err(self.error("invalid markup declaration"))
        }
    }

    /// Parse a comment `<!--...-->`.
    fn comment<H: SaxHandler>(&mut self, handler: &mut H) -> Result<()> {
        self.scanner.advance(2); // '--'
        let start = self.scanner.position();
        let end = match self.scanner.find_sequence(b"-->") {
            Some(end) => end,
            None => return Err(self.error("unterminated comment")),
        };
        let content = to_str(self, self.scanner.slice(start, end))?;
        self.scanner.advance_to(end + 3);
        handler.comment(content)
    }

    /// Parse a CDATA section `<![CDATA[...]]>`.
    fn cdata_section<H: SaxHandler>(&mut self, handler: &mut H) -> Result<()> {
        if self.open_tags.is_empty() {
            return Err(self.error("CDATA section outside of the root element"));
        }
        self.scanner.advance(7); // '[CDATA['
        let start = self.scanner.position();
        let end = match self.scanner.find_sequence(b"]]>") {
            Some(end) => end,
            None => return Err(self.error("unterminated CDATA section")),
        };
        let content = to_str(self, self.scanner.slice(start, end))?;
        self.scanner.advance_to(end + 3);
        handler.cdata(content)
    }

    /// Parse a DOCTYPE declaration, including a bracketed internal subset.
    fn doctype<H: SaxHandler>(&mut self, handler: &mut H) -> Result<()> {
        self.scanner.advance(7); // 'DOCTYPE'
        let start = self.scanner.position();

        let mut depth = 0usize;
        let mut pos = start;
        let end = loop {
            match self.scanner.byte_at(pos) {
                Some(b'[') => depth += 1,
                Some(b']') => depth = depth.saturating_sub(1),
                Some(b'>') if depth == 0 => break pos,
                Some(_) => {}
                None => return Err(self.error("unterminated DOCTYPE declaration")),
            }
            pos += 1;
        };

        let content = to_str(self, self.scanner.slice(start, end))?;
        self.scanner.advance_to(end + 1);
        handler.doctype(content, self.position())
    }

    /// Skip a processing instruction or XML declaration `<?...?>`.
    fn processing_instruction(&mut self) -> Result<()> {
        self.scanner.advance(1); // '?'
        match self.scanner.find_sequence(b"?>") {
            Some(end) => {
                self.scanner.advance_to(end + 2);
                Ok(())
            }
            None => Err(self.error("unterminated processing instruction")),
        }
    }

    fn decode<'b>(&self, raw: &'b str) -> Result<Cow<'b, str>> {
        entities::decode(raw).map_err(|message| self.error(message))
    }
}

/// Interpret a slice of the input as UTF-8.
///
/// The public API only accepts `&str`, and every slice boundary sits on an
/// ASCII delimiter, so this cannot fail in practice; it still propagates
/// rather than panicking.
fn to_str<'b>(tokenizer: &Tokenizer<'_>, bytes: &'b [u8]) -> Result<&'b str> {
    std::str::from_utf8(bytes).map_err(|_| tokenizer.error("invalid UTF-8 in input"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records events as debug strings for shape assertions.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        positions: Vec<Position>,
    }

    impl SaxHandler for Recorder {
        fn open_tag(&mut self, tag: OpenTag, position: Position) -> Result<()> {
            let attrs: Vec<String> = tag
                .attributes
                .iter()
                .map(|a| format!("{}={}", a.name, a.value))
                .collect();
            self.events.push(format!("open:{}[{}]", tag.name, attrs.join(",")));
            self.positions.push(position);
            Ok(())
        }

        fn close_tag(&mut self) -> Result<()> {
            self.events.push("close".to_string());
            Ok(())
        }

        fn text(&mut self, chunk: &str) -> Result<()> {
            self.events.push(format!("text:{chunk}"));
            Ok(())
        }

        fn cdata(&mut self, chunk: &str) -> Result<()> {
            self.events.push(format!("cdata:{chunk}"));
            Ok(())
        }

        fn comment(&mut self, chunk: &str) -> Result<()> {
            self.events.push(format!("comment:{chunk}"));
            Ok(())
        }

        fn doctype(&mut self, chunk: &str, _position: Position) -> Result<()> {
            self.events.push(format!("doctype:{chunk}"));
            Ok(())
        }
    }

    fn events_for(input: &str) -> Vec<String> {
        let mut recorder = Recorder::default();
        Tokenizer::new(input).run(&mut recorder).unwrap();
        recorder.events
    }

    fn error_for(input: &str) -> Error {
        let mut recorder = Recorder::default();
        Tokenizer::new(input).run(&mut recorder).unwrap_err()
    }

    #[test]
    fn test_simple_document() {
        assert_eq!(
            events_for("<root><child/></root>"),
            vec!["open:root[]", "open:child[]", "close", "close"]
        );
    }

    #[test]
    fn test_text_and_attributes() {
        assert_eq!(
            events_for("<a id=\"1\" name='x'>hello</a>"),
            vec!["open:a[id=1,name=x]", "text:hello", "close"]
        );
    }

    #[test]
    fn test_entities_decoded_in_text_and_values() {
        assert_eq!(
            events_for("<a title=\"&lt;b&gt;\">x &amp; y</a>"),
            vec!["open:a[title=<b>]", "text:x & y", "close"]
        );
    }

    #[test]
    fn test_cdata_and_comments() {
        assert_eq!(
            events_for("<a><!--note--><![CDATA[<raw>]]></a>"),
            vec!["open:a[]", "comment:note", "cdata:<raw>", "close"]
        );
    }

    #[test]
    fn test_doctype_content() {
        assert_eq!(
            events_for("<!DOCTYPE HelloWorld><a/>"),
            vec!["doctype: HelloWorld", "open:a[]", "close"]
        );
    }

    #[test]
    fn test_doctype_internal_subset() {
        assert_eq!(
            events_for("<!DOCTYPE a [ <!ENTITY x \"y\"> ]><a/>"),
            vec!["doctype: a [ <!ENTITY x \"y\"> ]", "open:a[]", "close"]
        );
    }

    #[test]
    fn test_xml_declaration_and_pi_skipped() {
        assert_eq!(
            events_for("<?xml version=\"1.0\"?><a><?target data?></a>"),
            vec!["open:a[]", "close"]
        );
    }

    #[test]
    fn test_whitespace_outside_root_delivered() {
        assert_eq!(
            events_for("<a/>\n\n"),
            vec!["open:a[]", "close", "text:\n\n"]
        );
    }

    #[test]
    fn test_open_tag_position() {
        let mut recorder = Recorder::default();
        Tokenizer::new("<books><book title=\"Twilight\"/></books>")
            .run(&mut recorder)
            .unwrap();
        let book = recorder.positions[1];
        assert_eq!(book.line, 0);
        assert_eq!(book.column, 31);
        assert_eq!(book.offset, 31);
        assert_eq!(book.start_tag_offset, 8);
    }

    #[test]
    fn test_unclosed_tag_errors() {
        let err = error_for("<a><b></a>");
        assert!(matches!(err, Error::Parse { .. }), "{err}");
    }

    #[test]
    fn test_stray_closing_tag_errors() {
        assert!(matches!(error_for("<a></a></b>"), Error::Parse { .. }));
    }

    #[test]
    fn test_missing_closing_tag_errors() {
        assert!(matches!(error_for("<a>"), Error::Parse { .. }));
    }

    #[test]
    fn test_second_root_errors() {
        assert!(matches!(error_for("<a/><b/>"), Error::Parse { .. }));
    }

    #[test]
    fn test_text_outside_root_errors() {
        assert!(matches!(error_for("<a/>trailing"), Error::Parse { .. }));
    }

    #[test]
    fn test_duplicate_attribute_errors() {
        assert!(matches!(
            error_for("<a id=\"1\" id=\"2\"/>"),
            Error::Parse { .. }
        ));
    }

    #[test]
    fn test_unquoted_attribute_errors() {
        assert!(matches!(error_for("<a id=1/>"), Error::Parse { .. }));
    }

    #[test]
    fn test_unterminated_comment_errors() {
        assert!(matches!(error_for("<a><!-- oops</a>"), Error::Parse { .. }));
    }

    #[test]
    fn test_parse_error_carries_position() {
        let err = error_for("<a>\n  <b></c>\n</a>");
        match err {
            Error::Parse { position, .. } => {
                assert_eq!(position.line, 1);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
