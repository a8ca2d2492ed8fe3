//! Renderer
//!
//! Recursive rendering of composers into a byte sink. Each pass builds its
//! own render tree; the registry is only read, apart from its counters.

use std::fmt;
use std::io::Write;

use ick_dom::{Tag, TagError};

use crate::{unfold, Composer, HtmlString, NodeId, RenderError, RenderTree, Registry, RequiredAssets};

/// Default nesting ceiling
pub const DEFAULT_MAX_DEPTH: usize = 25;

/// Renderer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Deepest allowed nesting level, the top-level composer being 0
    pub max_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Outcome of a pass that was not aborted
#[derive(Debug)]
pub struct RenderReport {
    /// Top-level node, `None` when there was nothing to render
    pub root: Option<NodeId>,
    pub tree: RenderTree,
    /// Errors rendered inline, in output order
    pub diagnostics: Vec<RenderError>,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn first_error(&self) -> Option<&RenderError> {
        self.diagnostics.first()
    }

    /// The tree, or the first inline diagnostic
    pub fn into_result(mut self) -> Result<RenderTree, RenderError> {
        if self.diagnostics.is_empty() {
            Ok(self.tree)
        } else {
            Err(self.diagnostics.swap_remove(0))
        }
    }
}

/// Renders composers against one registry
#[derive(Debug, Clone)]
pub struct Renderer<'r> {
    registry: &'r Registry,
    config: RenderConfig,
}

impl<'r> Renderer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            config: RenderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Render a top-level composer into `out`
    pub fn render(&self, out: &mut dyn Write, composer: &mut dyn Composer) -> Result<RenderReport, RenderError> {
        let mut ctx = RenderContext {
            registry: self.registry,
            config: self.config,
            out,
            tree: RenderTree::new(),
            diagnostics: Vec::new(),
        };
        let root = ctx.render_child(None, composer)?;
        tracing::debug!(
            nodes = ctx.tree.len(),
            diagnostics = ctx.diagnostics.len(),
            "render pass done"
        );
        Ok(RenderReport {
            root,
            tree: ctx.tree,
            diagnostics: ctx.diagnostics,
        })
    }

    /// Unfold rich markup into `out`
    pub fn render_markup(&self, out: &mut dyn Write, markup: &str) -> Result<RenderReport, RenderError> {
        self.render(out, &mut HtmlString::new(markup))
    }

    /// Render into a new string
    pub fn render_to_string(&self, composer: &mut dyn Composer) -> Result<(String, RenderReport), RenderError> {
        let mut out = Vec::new();
        let report = self.render(&mut out, composer)?;
        Ok((String::from_utf8_lossy(&out).into_owned(), report))
    }
}

/// State of one render pass
pub(crate) struct RenderContext<'a> {
    registry: &'a Registry,
    config: RenderConfig,
    out: &'a mut dyn Write,
    tree: RenderTree,
    diagnostics: Vec<RenderError>,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub(crate) fn write_str(&mut self, s: &str) -> Result<(), RenderError> {
        self.out.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Emit a non-fatal error as an HTML comment, hand fatal ones back.
    pub(crate) fn diagnose(&mut self, node: Option<NodeId>, err: RenderError) -> Result<(), RenderError> {
        if err.is_fatal() {
            return Err(err);
        }
        let message = err.to_string();
        tracing::warn!("{}", message);
        self.write_str(&format!("<!--{}-->", comment_text(&message)))?;
        if let Some(meta) = node.and_then(|id| self.tree.get_mut(id)) {
            meta.error = Some(message);
        }
        self.diagnostics.push(err);
        Ok(())
    }

    /// Render `composer` below `parent`
    pub(crate) fn render_child(
        &mut self,
        parent: Option<NodeId>,
        composer: &mut dyn Composer,
    ) -> Result<Option<NodeId>, RenderError> {
        let type_name = composer.type_name();
        if !composer.need_rendering() {
            tracing::debug!("{}: nothing to render", type_name);
            return Ok(None);
        }

        let depth = parent.map_or(0, |p| self.tree[p].depth + 1);
        if depth > self.config.max_depth {
            return Err(RenderError::RecursionLimitExceeded {
                depth,
                limit: self.config.max_depth,
            });
        }

        let node = self.tree.create(type_name, parent, depth);
        let tag = composer.build_tag().filter(|tag| !tag.is_empty());
        if let Some(tag) = &tag {
            if let Some(meta) = self.tree.get_mut(node) {
                meta.tag_id = Some(tag.id().to_string()).filter(|id| !id.is_empty());
            }
        }
        let virtual_id = self.tree.assign_virtual_id(node, self.registry);
        tracing::debug!(depth, "rendering {} as {}", type_name, virtual_id);

        let mut rendered = true;
        match &tag {
            Some(tag) => match tag.render_opening(&mut *self.out) {
                Ok(true) => tracing::debug!("{}: <{}> self-closes, content skipped", type_name, tag.name()),
                Ok(false) => {
                    self.render_content(node, composer)?;
                    self.close(tag, type_name)?;
                }
                Err(err) => {
                    rendered = false;
                    let err = tag_error(type_name, err);
                    self.diagnose(Some(node), err)?;
                }
            },
            None => self.render_content(node, composer)?,
        }

        if let Some(meta) = self.tree.get_mut(node) {
            meta.rendered = rendered;
        }
        self.tree.embed(node);
        Ok(Some(node))
    }

    pub(crate) fn unfold(&mut self, parent: Option<NodeId>, markup: &str) -> Result<(), RenderError> {
        unfold::unfold(self, parent, markup)
    }

    fn render_content(&mut self, node: NodeId, composer: &mut dyn Composer) -> Result<(), RenderError> {
        let mut scope = Scope { ctx: &mut *self, node };
        match composer.render_content(&mut scope) {
            Ok(()) => Ok(()),
            Err(err) => self.diagnose(Some(node), err),
        }
    }

    fn close(&mut self, tag: &Tag, type_name: &str) -> Result<(), RenderError> {
        tag.render_closing(&mut *self.out)
            .map_err(|err| tag_error(type_name, err))
    }
}

fn tag_error(type_name: &str, err: TagError) -> RenderError {
    match err {
        TagError::Io(err) => RenderError::Writer(err),
        TagError::Attribute(source) => RenderError::Attribute {
            component: type_name.to_lowercase(),
            source,
        },
    }
}

/// Comment bodies may not contain `--`
fn comment_text(message: &str) -> String {
    let mut text = message.to_string();
    while text.contains("--") {
        text = text.replace("--", "- -");
    }
    text
}

/// Handle given to a composer while it renders its content
pub struct Scope<'c, 'a> {
    ctx: &'c mut RenderContext<'a>,
    node: NodeId,
}

impl Scope<'_, '_> {
    /// Node of the composer being rendered
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn depth(&self) -> usize {
        self.ctx.tree[self.node].depth
    }

    pub fn virtual_id(&self) -> &str {
        &self.ctx.tree[self.node].virtual_id
    }

    /// Render metadata of the pass so far
    pub fn tree(&self) -> &RenderTree {
        &self.ctx.tree
    }

    pub fn assets(&self) -> &RequiredAssets {
        self.ctx.registry.assets()
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), RenderError> {
        self.ctx.write_str(s)
    }

    /// Target of `write!`
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), RenderError> {
        self.ctx.out.write_fmt(args)?;
        Ok(())
    }

    /// Render a nested composer
    pub fn render_child(&mut self, child: &mut dyn Composer) -> Result<Option<NodeId>, RenderError> {
        self.ctx.render_child(Some(self.node), child)
    }

    /// Unfold rich markup, components found become children of this node
    pub fn unfold(&mut self, markup: &str) -> Result<(), RenderError> {
        self.ctx.unfold(Some(self.node), markup)
    }
}
