//! Tag
//!
//! A normalized tag name plus its attributes, rendered as an opening and a
//! closing sequence.

use std::io::Write;

use crate::{AttributeMap, TagError};

/// Void elements (self-closing, no end tag)
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Check whether `name` is a void element
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// An HTML tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    name: String,
    self_closing: bool,
    attrs: AttributeMap,
}

impl Tag {
    /// Create a tag, name is trimmed and lowercased
    pub fn new(name: &str) -> Self {
        let mut tag = Self::default();
        tag.set_name(name);
        tag
    }

    /// Create a tag with a parsed attribute list
    pub fn with_attributes(name: &str, list: &str) -> Self {
        let mut tag = Self::new(name);
        tag.attrs = AttributeMap::parse_lossy(list);
        tag
    }

    /// A tag without name renders nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the tag, self-closing follows the void element set again
    pub fn set_name(&mut self, name: &str) -> &mut Self {
        self.name = name.trim().to_lowercase();
        self.self_closing = is_void_element(&self.name);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Void elements are always self-closing
    pub fn is_self_closing(&self) -> bool {
        self.self_closing || is_void_element(&self.name)
    }

    /// Force a tag to self-close. Void elements cannot be reopened.
    pub fn set_self_closing(&mut self, self_closing: bool) -> &mut Self {
        self.self_closing = self_closing;
        self
    }

    pub fn attrs(&self) -> &AttributeMap {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut AttributeMap {
        &mut self.attrs
    }

    pub fn id(&self) -> &str {
        self.attrs.id()
    }

    /// Derive a descendant id, `{id}.{label}`
    pub fn sub_id(&self, label: &str) -> Option<String> {
        let id = self.id();
        let label = label.trim();
        if id.is_empty() || label.is_empty() {
            return None;
        }
        Some(format!("{id}.{label}"))
    }

    /// Opening sequence, empty for a tag without name
    pub fn opening(&self) -> Result<String, TagError> {
        if self.is_empty() {
            return Ok(String::new());
        }
        let attrs = self.attrs.attribute_string()?;
        if attrs.is_empty() {
            Ok(format!("<{}>", self.name))
        } else {
            Ok(format!("<{} {}>", self.name, attrs))
        }
    }

    /// Write the opening sequence. Returns whether the tag self-closes, in
    /// which case neither content nor closing may follow.
    ///
    /// Nothing is written when the attributes cannot be serialized.
    pub fn render_opening(&self, out: &mut dyn Write) -> Result<bool, TagError> {
        let opening = self.opening()?;
        out.write_all(opening.as_bytes())?;
        Ok(self.is_self_closing())
    }

    /// Write `</name>` unless the tag is empty or self-closing
    pub fn render_closing(&self, out: &mut dyn Write) -> Result<(), TagError> {
        if !self.is_empty() && !self.is_self_closing() {
            write!(out, "</{}>", self.name)?;
        }
        Ok(())
    }
}
