//! Built-in composers
//!
//! Raw rich markup, a tag wrapping a content stack, and the stack itself.

use std::fmt;

use ick_dom::{AttributeMap, Tag};

use crate::{Composer, RenderError, Scope};

/// Rich markup, unfolded when rendered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlString(String);

impl HtmlString {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push_str(&mut self, markup: &str) -> &mut Self {
        self.0.push_str(markup);
        self
    }
}

impl From<&str> for HtmlString {
    fn from(markup: &str) -> Self {
        Self::new(markup)
    }
}

impl From<String> for HtmlString {
    fn from(markup: String) -> Self {
        Self(markup)
    }
}

impl fmt::Display for HtmlString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Composer for HtmlString {
    fn need_rendering(&self) -> bool {
        !self.is_empty()
    }

    fn render_content(&mut self, out: &mut Scope<'_, '_>) -> Result<(), RenderError> {
        out.unfold(&self.0)
    }
}

/// Composers rendered in order as siblings
#[derive(Default)]
pub struct ContentStack {
    items: Vec<Box<dyn Composer>>,
}

impl ContentStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a composer, degenerate ones are dropped
    pub fn push(&mut self, composer: impl Composer + 'static) -> &mut Self {
        self.push_boxed(Box::new(composer))
    }

    pub fn push_boxed(&mut self, composer: Box<dyn Composer>) -> &mut Self {
        if composer.need_rendering() {
            self.items.push(composer);
        } else {
            tracing::debug!("content stack: skipping empty {}", composer.type_name());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Render every item as a child of the current scope
    pub fn render_stack(&mut self, out: &mut Scope<'_, '_>) -> Result<(), RenderError> {
        for item in &mut self.items {
            out.render_child(item.as_mut())?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.items.iter().map(|item| item.type_name()))
            .finish()
    }
}

impl Composer for ContentStack {
    fn need_rendering(&self) -> bool {
        !self.is_empty()
    }

    fn render_content(&mut self, out: &mut Scope<'_, '_>) -> Result<(), RenderError> {
        self.render_stack(out)
    }
}

/// A tag wrapping a content stack
#[derive(Debug, Default)]
pub struct Element {
    tag: Tag,
    content: ContentStack,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self::with_tag(Tag::new(name))
    }

    pub fn with_tag(tag: Tag) -> Self {
        Self {
            tag,
            content: ContentStack::new(),
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn attrs_mut(&mut self) -> &mut AttributeMap {
        self.tag.attrs_mut()
    }

    pub fn push(&mut self, composer: impl Composer + 'static) -> &mut Self {
        self.content.push(composer);
        self
    }

    pub fn content_mut(&mut self) -> &mut ContentStack {
        &mut self.content
    }
}

impl Composer for Element {
    fn need_rendering(&self) -> bool {
        !self.tag.is_empty() || !self.content.is_empty()
    }

    fn tag_mut(&mut self) -> Option<&mut Tag> {
        Some(&mut self.tag)
    }

    fn build_tag(&mut self) -> Option<Tag> {
        Some(self.tag.clone())
    }

    fn render_content(&mut self, out: &mut Scope<'_, '_>) -> Result<(), RenderError> {
        self.content.render_stack(out)
    }
}
