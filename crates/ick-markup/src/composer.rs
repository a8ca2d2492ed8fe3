//! Composer traits
//!
//! A composer emits content, optionally wrapped in a tag it builds itself.
//! Components are composers that can be created from markup.

use ick_dom::Tag;

use crate::{Bindings, RenderError, RequiredAssets, Scope};

/// Anything the renderer can render
pub trait Composer {
    /// Type name used for virtual ids and logs
    fn type_name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Degenerate composers are skipped without output
    fn need_rendering(&self) -> bool {
        true
    }

    /// The composer's own tag, receiving attributes that match no field
    fn tag_mut(&mut self) -> Option<&mut Tag> {
        None
    }

    /// Build the wrapping tag, called once per render.
    ///
    /// `None` renders the content bare.
    fn build_tag(&mut self) -> Option<Tag> {
        None
    }

    /// Emit the inner content
    fn render_content(&mut self, out: &mut Scope<'_, '_>) -> Result<(), RenderError>;
}

/// A composer that can be registered and instantiated from a tag
pub trait Component: Composer + Sized + 'static {
    /// Attribute-to-field table, built once at registration
    fn bindings() -> Bindings<Self> {
        Bindings::new()
    }

    /// Declare stylesheets the component depends on
    fn require_assets(_assets: &RequiredAssets) {}
}

/// Strip the module path and generic arguments off a Rust type name
pub fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    impl Composer for Widget {
        fn render_content(&mut self, _out: &mut Scope<'_, '_>) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("a::b::Card"), "Card");
        assert_eq!(short_type_name("Card"), "Card");
        assert_eq!(short_type_name("a::List<b::Item>"), "List");
    }

    #[test]
    fn test_default_type_name_through_dyn() {
        let widget: Box<dyn Composer> = Box::new(Widget);
        assert_eq!(widget.type_name(), "Widget");
        assert!(widget.need_rendering());
    }
}
