//! Edge case tests for ick-markup
//!
//! Malformed markup, failing sinks and the global entry points.

use std::io::{self, Write};

use ick_markup::{
    Bindings, Component, Composer, ParseError, RenderError, Registry, Renderer, Scope,
};

#[derive(Default)]
struct Flags {
    a: bool,
    b: bool,
    text: String,
}

impl Composer for Flags {
    fn render_content(&mut self, out: &mut Scope<'_, '_>) -> Result<(), RenderError> {
        write!(out, "[{} {} {}]", self.a, self.b, self.text)
    }
}

impl Component for Flags {
    fn bindings() -> Bindings<Self> {
        Bindings::new()
            .field("a", |f: &mut Flags, v: bool| f.a = v)
            .field("b", |f: &mut Flags, v: bool| f.b = v)
            .field("text", |f: &mut Flags, v: String| f.text = v)
    }
}

fn registry() -> Registry {
    let registry = Registry::new();
    registry.register("ick-flags", Flags::default).unwrap();
    registry
}

fn render(registry: &Registry, markup: &str) -> (String, Result<(), RenderError>) {
    let mut out = Vec::new();
    let result = Renderer::new(registry).render_markup(&mut out, markup).map(|_| ());
    (String::from_utf8(out).unwrap(), result)
}

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_empty_input() {
    let registry = registry();
    let (html, result) = render(&registry, "");
    assert!(html.is_empty());
    assert!(result.is_ok());
}

#[test]
fn test_whitespace_only() {
    let registry = registry();
    let (html, _) = render(&registry, "  \n\t ");
    assert_eq!(html, "  \n\t ");
}

#[test]
fn test_unicode_text() {
    let registry = registry();
    let (html, _) = render(&registry, "日本語 <ick-flags text=ü/> ✓");
    assert_eq!(html, "日本語 [false false ü] ✓");
}

#[test]
fn test_prefix_lookalikes_are_text() {
    let registry = registry();
    let input = "<ick> <ickx/> <ICK-flags/> < ick-flags/>";
    let (html, result) = render(&registry, input);
    assert_eq!(html, input);
    assert!(result.is_ok());
}

// ============================================================================
// ATTRIBUTE SYNTAX
// ============================================================================

#[test]
fn test_boolean_and_empty_values() {
    let registry = registry();
    let (html, _) = render(&registry, "<ick-flags a b='' text=\"\"/>");
    assert_eq!(html, "[true true ]");
}

#[test]
fn test_multiline_tag() {
    let registry = registry();
    let (html, _) = render(&registry, "<ick-flags\n  a=1\n  b=0\n  text='x y'\n/>");
    assert_eq!(html, "[true false x y]");
}

#[test]
fn test_unquoted_value_with_quote() {
    let registry = registry();
    let (html, _) = render(&registry, "<ick-flags text=y'z/>");
    assert_eq!(html, "[false false y'z]");
}

#[test]
fn test_tag_name_case_insensitive() {
    let registry = registry();
    let (html, _) = render(&registry, "<ick-FLAGS a/>");
    assert_eq!(html, "[true false ]");
}

// ============================================================================
// MALFORMED MARKUP
// ============================================================================

#[test]
fn test_missing_name_aborts() {
    let registry = registry();
    let (html, result) = render(&registry, "before <ick- a/> after");
    assert_eq!(html, "before ");
    assert!(matches!(
        result,
        Err(RenderError::Parse(ParseError::MissingTagName { offset: 7 }))
    ));
}

#[test]
fn test_dangling_equals_aborts() {
    let registry = registry();
    let (html, result) = render(&registry, "<ick-flags a/> x <ick-flags =1/> y");
    assert_eq!(html, "[true false ] x ");
    assert!(matches!(
        result,
        Err(RenderError::Parse(ParseError::MissingAttributeName { .. }))
    ));
}

#[test]
fn test_missing_value_aborts() {
    let registry = registry();
    let (_, result) = render(&registry, "<ick-flags text=/>");
    assert!(matches!(result, Err(RenderError::Parse(ParseError::MissingValue { .. }))));
}

#[test]
fn test_unterminated_tag_aborts() {
    let registry = registry();
    let (html, result) = render(&registry, "x <ick-flags text='never closed/>");
    assert_eq!(html, "x ");
    assert!(matches!(result, Err(RenderError::Parse(ParseError::Unterminated { .. }))));
}

#[test]
fn test_parse_error_in_nested_markup_is_fatal() {
    #[derive(Default)]
    struct Wrapper;

    impl Composer for Wrapper {
        fn render_content(&mut self, out: &mut Scope<'_, '_>) -> Result<(), RenderError> {
            out.write_str("<div>")?;
            out.unfold("<ick-/>")?;
            out.write_str("</div>")
        }
    }

    impl Component for Wrapper {}

    let registry = registry();
    registry.register("ick-wrapper", Wrapper::default).unwrap();
    let (html, result) = render(&registry, "<ick-wrapper/> tail");
    assert_eq!(html, "<div>");
    assert!(result.unwrap_err().is_fatal());
}

// ============================================================================
// FAILING SINKS
// ============================================================================

/// Accepts `budget` bytes, then fails every write
struct FailingSink {
    budget: usize,
    written: Vec<u8>,
    calls_after_failure: usize,
    failed: bool,
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.failed {
            self.calls_after_failure += 1;
            return Err(io::Error::other("sink closed"));
        }
        if buf.len() > self.budget {
            self.failed = true;
            return Err(io::Error::other("sink closed"));
        }
        self.budget -= buf.len();
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_writer_failure_stops_everything() {
    let registry = registry();
    let mut sink = FailingSink {
        budget: 4,
        written: Vec::new(),
        calls_after_failure: 0,
        failed: false,
    };
    let err = Renderer::new(&registry)
        .render_markup(&mut sink, "abc <ick-flags/> <ick-flags/> <ick-missing/>")
        .unwrap_err();
    assert!(matches!(err, RenderError::Writer(_)));
    assert_eq!(sink.written, b"abc ");
    assert_eq!(sink.calls_after_failure, 0);
}

// ============================================================================
// GLOBAL REGISTRY
// ============================================================================

#[test]
fn test_global_entry_points() {
    ick_markup::register("ick-global-flags", Flags::default).unwrap();
    assert!(Registry::global().is_registered("ick-global-flags"));

    let mut out = Vec::new();
    ick_markup::render_html(&mut out, "<ick-global-flags a/>").unwrap();
    assert_eq!(out, b"[true false ]");

    let mut out = Vec::new();
    let err = ick_markup::render_html(&mut out, "ok <ick-not-registered/>").unwrap_err();
    assert!(matches!(err, RenderError::UnknownComponent { .. }));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "ok <!--ick-not-registered: unregistered component-->"
    );
}
