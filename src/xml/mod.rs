//! Minimal XML tree and writer.
//!
//! Only what the converter emits is modelled: elements with ordered
//! attributes and element children. Serialization happens entirely in
//! memory so callers never observe a half-written document.
//!
//! ```
//! use ini2xml::xml::{Document, Element, WriteOptions};
//!
//! let mut root = Element::new("root");
//! let mut section = Element::new("section");
//! section.set_attr("name", "db");
//! root.add_child_element(section);
//!
//! let xml = Document::new(root).to_xml_string(&WriteOptions::compact()).unwrap();
//! assert_eq!(xml, "<root><section name=\"db\" /></root>\n");
//! ```

use std::fmt;

/// An XML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

/// An XML document. Whether a declaration is written is a [`WriteOptions`] concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

/// Controls how a [`Document`] is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per nesting level; `None` writes everything on one line.
    pub indent: Option<usize>,
    pub declaration: bool,
}

impl WriteOptions {
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            declaration: true,
        }
    }

    pub fn compact() -> Self {
        Self {
            indent: None,
            declaration: false,
        }
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::pretty(2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// A character XML 1.0 cannot carry, even escaped.
    InvalidCharacter { element: String, ch: char },
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlError::InvalidCharacter { element, ch } => write!(
                f,
                "character U+{:04X} in <{}> is not allowed in XML 1.0",
                *ch as u32, element
            ),
        }
    }
}

impl std::error::Error for XmlError {}

impl Element {
    pub fn new(name: &str) -> Self {
        Element {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, overwriting an existing one of the same name.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        for (k, v) in &mut self.attributes {
            if k == name {
                *v = value.to_string();
                return;
            }
        }
        self.attributes.push((name.to_string(), value.to_string()));
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn add_child_element(&mut self, element: Element) {
        self.children.push(element);
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Document {
    pub fn new(root: Element) -> Self {
        Document { root }
    }

    pub fn to_xml_string(&self, options: &WriteOptions) -> Result<String, XmlError> {
        let mut out = String::new();
        if options.declaration {
            out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>");
            out.push('\n');
        }
        serialize_element(&self.root, &mut out, options.indent, 0)?;
        out.push('\n');
        Ok(out)
    }
}

fn serialize_element(
    elem: &Element,
    out: &mut String,
    indent: Option<usize>,
    depth: usize,
) -> Result<(), XmlError> {
    out.push('<');
    out.push_str(&elem.name);
    for (k, v) in &elem.attributes {
        out.push(' ');
        out.push_str(k);
        out.push_str("=\"");
        escape_attr(v, out).map_err(|ch| XmlError::InvalidCharacter {
            element: elem.name.clone(),
            ch,
        })?;
        out.push('"');
    }

    if elem.children.is_empty() {
        out.push_str(" />");
        return Ok(());
    }

    out.push('>');

    match indent {
        Some(indent_size) => {
            out.push('\n');
            for child in &elem.children {
                push_indent(out, indent_size, depth + 1);
                serialize_element(child, out, indent, depth + 1)?;
                out.push('\n');
            }
            push_indent(out, indent_size, depth);
        }
        None => {
            for child in &elem.children {
                serialize_element(child, out, None, depth + 1)?;
            }
        }
    }

    out.push_str("</");
    out.push_str(&elem.name);
    out.push('>');
    Ok(())
}

fn is_xml_char(ch: char) -> bool {
    matches!(ch,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

fn escape_attr(s: &str, out: &mut String) -> Result<(), char> {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // attribute-value normalization would fold these into spaces
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c if is_xml_char(c) => out.push(c),
            c => return Err(c),
        }
    }
    Ok(())
}

fn push_indent(out: &mut String, indent_size: usize, depth: usize) {
    for _ in 0..(indent_size * depth) {
        out.push(' ');
    }
}
