//! ick markup - component rendering
//!
//! Unfolds rich markup: literal HTML mixed with self-closing component tags
//! such as `<ick-button Label="Save"/>`. Tags are resolved against a
//! [`Registry`], attributes are bound onto a fresh component, and the
//! component is rendered recursively.

mod assets;
mod bind;
mod composer;
mod duration;
mod error;
mod html;
mod registry;
mod render;
mod scanner;
mod tree;
mod unfold;

use std::io::Write;
use std::sync::Arc;

pub use assets::RequiredAssets;
pub use bind::{BindError, Bindings, ConvertError, FromAttribute};
pub use composer::{short_type_name, Component, Composer};
pub use duration::{parse_duration, DurationError};
pub use error::{ParseError, RegistryError, RenderError};
pub use html::{ContentStack, Element, HtmlString};
pub use registry::{Registry, RegistryEntry, TAG_PREFIX};
pub use render::{RenderConfig, RenderReport, Renderer, Scope, DEFAULT_MAX_DEPTH};
pub use scanner::{ParsedTag, Scanner, Token, TAG_CLOSE, TAG_OPEN};
pub use tree::{NodeId, RenderMeta, RenderTree};

pub use ick_dom::{AttributeMap, Href, Tag};

/// Register a component in the global registry
pub fn register<T, F>(name: &str, constructor: F) -> Result<Arc<RegistryEntry>, RegistryError>
where
    T: Component,
    F: Fn() -> T + Send + Sync + 'static,
{
    Registry::global().register(name, constructor)
}

/// Unfold `markup` with the global registry.
///
/// Output is written even when an error is returned: inline diagnostics
/// surface as the first error once the whole input is rendered.
pub fn render_html(out: &mut dyn Write, markup: &str) -> Result<(), RenderError> {
    Renderer::new(Registry::global())
        .render_markup(out, markup)?
        .into_result()
        .map(|_| ())
}
