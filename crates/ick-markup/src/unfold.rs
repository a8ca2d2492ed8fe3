//! Markup unfolding
//!
//! Writes literal text through and replaces every component tag by the
//! rendering of a freshly built component.

use crate::render::RenderContext;
use crate::scanner::{ParsedTag, Scanner, Token};
use crate::{NodeId, RenderError};

/// Unfold `markup` below `parent`. Grammar errors abort, text written
/// before them stays written.
pub(crate) fn unfold(ctx: &mut RenderContext<'_>, parent: Option<NodeId>, markup: &str) -> Result<(), RenderError> {
    for token in Scanner::new(markup) {
        match token? {
            Token::Text(text) => ctx.write_str(text)?,
            Token::Tag(tag) => unfold_tag(ctx, parent, tag)?,
        }
    }
    Ok(())
}

fn unfold_tag(ctx: &mut RenderContext<'_>, parent: Option<NodeId>, tag: ParsedTag) -> Result<(), RenderError> {
    let Some(entry) = ctx.registry().lookup(&tag.name) else {
        return ctx.diagnose(parent, RenderError::UnknownComponent { tag: tag.name });
    };

    tracing::debug!("unfolding {} with {} attributes", tag.name, tag.attributes.len());
    let mut component = match entry.instantiate(&tag.attributes) {
        Ok(component) => component,
        Err(source) => {
            return ctx.diagnose(parent, RenderError::Binding { tag: tag.name, source });
        }
    };
    ctx.render_child(parent, component.as_mut())?;
    Ok(())
}
