//! XML serialization
//!
//! Deterministic text output for a node subtree. Attribute order is
//! insertion order, entity-sensitive characters are escaped, and a single
//! non-element child is inlined with its parent's tags.

use crate::dom::node::{XmlElement, XmlNode};

/// Formatting options for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Suppress newlines and indentation.
    pub compressed: bool,
    /// Keep text content exactly as parsed instead of trimming it.
    pub preserve_whitespace: bool,
    /// Truncate long text runs with an ellipsis, for debug display.
    pub trimmed: bool,
    /// Render known HTML void elements without a closing tag; other empty
    /// elements get an explicit open/close pair instead of `/>`.
    pub html: bool,
}

/// Void elements that self-close under the `html` option.
const HTML_VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "frame", "hr", "img", "input", "keygen", "link",
    "menuitem", "meta", "param", "source", "track", "wbr",
];

/// Maximum text length kept by the `trimmed` option.
const TRIM_LENGTH: usize = 25;

impl XmlNode {
    /// Render this node without indentation.
    pub fn render(&self, options: &RenderOptions) -> String {
        match self {
            XmlNode::Element(element) => element.render_with_indent("", options),
            XmlNode::Text(text) => format_text(&escape_xml(text), options),
            XmlNode::CData(data) => format!("<![CDATA[{}]]>", format_text(data, options)),
            XmlNode::Comment(comment) => {
                format!("<!--{}-->", format_text(&escape_xml(comment), options))
            }
        }
    }

    /// Render this node behind the given indentation.
    pub fn render_with_indent(&self, indent: &str, options: &RenderOptions) -> String {
        match self {
            XmlNode::Element(element) => element.render_with_indent(indent, options),
            _ => format!("{indent}{}", self.render(options)),
        }
    }
}

impl XmlElement {
    /// Render this element and its subtree.
    pub fn render(&self, options: &RenderOptions) -> String {
        self.render_with_indent("", options)
    }

    /// Render this element behind the given indentation.
    pub fn render_with_indent(&self, indent: &str, options: &RenderOptions) -> String {
        let mut out = String::new();
        out.push_str(indent);
        out.push('<');
        out.push_str(&self.name);

        for (name, value) in self.attributes.iter() {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_xml(value));
            out.push('"');
        }

        let linebreak = if options.compressed { "" } else { "\n" };

        if self.children.len() == 1 && !self.children[0].is_element() {
            // lone non-element child stays on one line with its tags
            out.push('>');
            out.push_str(&self.children[0].render(options));
            out.push_str("</");
            out.push_str(&self.name);
            out.push('>');
        } else if !self.children.is_empty() {
            out.push('>');
            out.push_str(linebreak);

            let child_indent = if options.compressed {
                indent.to_string()
            } else {
                format!("{indent}  ")
            };
            for child in &self.children {
                out.push_str(&child.render_with_indent(&child_indent, options));
                out.push_str(linebreak);
            }

            out.push_str(indent);
            out.push_str("</");
            out.push_str(&self.name);
            out.push('>');
        } else if options.html {
            if HTML_VOID_ELEMENTS.contains(&self.name.as_str()) {
                out.push_str("/>");
            } else {
                out.push_str("></");
                out.push_str(&self.name);
                out.push('>');
            }
        } else {
            out.push_str("/>");
        }

        out
    }
}

/// Escape the five entity-sensitive characters.
fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Apply the `trimmed` and `preserve_whitespace` options to text content.
fn format_text(text: &str, options: &RenderOptions) -> String {
    let mut out = if options.trimmed && text.chars().count() > TRIM_LENGTH {
        let cut: String = text.chars().take(TRIM_LENGTH).collect();
        format!("{}\u{2026}", cut.trim())
    } else {
        text.to_string()
    };
    if !options.preserve_whitespace {
        out = out.trim().to_string();
    }
    out
}
