//! Comprehensive tests for ick-dom
//!
//! Attribute serialization round-trips, class rules and tag rendering.

use ick_dom::{AttributeError, AttributeMap, Tag, VOID_ELEMENTS};

// ============================================================================
// SERIALIZATION
// ============================================================================

#[test]
fn test_class_scenario() {
    let mut attrs = AttributeMap::new();
    attrs.set("class", "a").add_class("b a");
    assert_eq!(attrs.attribute_string().unwrap(), "class=\"a b\"");
}

#[test]
fn test_parse_scenario() {
    let attrs = AttributeMap::parse("disabled checked=false name=x").unwrap();
    let mut expected = AttributeMap::new();
    expected.set("disabled", "").set("name", "x");
    assert_eq!(attrs, expected);
}

#[test]
fn test_ambiguous_quotes_scenario() {
    let mut attrs = AttributeMap::new();
    attrs.set("Href", "/a 'b").set("title", "x");
    assert!(attrs.attribute_string().is_ok());

    attrs.set("Href", "/a 'b \"c\"");
    assert_eq!(
        attrs.attribute_string(),
        Err(AttributeError::AmbiguousQuotes("/a 'b \"c\"".to_string()))
    );
}

#[test]
fn test_round_trip() {
    let mut attrs = AttributeMap::new();
    attrs
        .set("id", "card.1")
        .set("name", "card")
        .set("class", "box is-active")
        .set("tabindex", "-1")
        .set("style", "color: red; margin: 0")
        .set("disabled", "true")
        .set("hidden", "")
        .set("data-count", "42")
        .set("data-ratio", "0.5")
        .set("title", "say \"hello\"")
        .set("alt", "it's fine")
        .set("href", "https://example.com/?q=a b");

    let serialized = attrs.attribute_string().unwrap();
    let parsed = AttributeMap::parse(&serialized).unwrap();
    assert_eq!(parsed, attrs, "{serialized}");
}

#[test]
fn test_round_trip_true_on_special_keys() {
    let mut attrs = AttributeMap::new();
    attrs.set("id", "true").set("style", "true").set("name", "true");
    assert_eq!(attrs.id(), "true");
    assert_eq!(attrs.style(), "true");

    let serialized = attrs.attribute_string().unwrap();
    let parsed = AttributeMap::parse(&serialized).unwrap();
    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed, attrs, "{serialized}");
}

#[test]
fn test_round_trip_empty() {
    let attrs = AttributeMap::new();
    assert_eq!(attrs.attribute_string().unwrap(), "");
    assert_eq!(AttributeMap::parse("").unwrap(), attrs);
}

#[test]
fn test_true_is_bare() {
    let mut attrs = AttributeMap::new();
    attrs.set("required", "True");
    assert_eq!(attrs.attribute_string().unwrap(), "required");
}

// ============================================================================
// CLASSES
// ============================================================================

#[test]
fn test_add_class_idempotent() {
    let mut once = AttributeMap::new();
    once.add_class("x");
    let mut twice = AttributeMap::new();
    twice.add_class("x").add_class("x");
    assert_eq!(once, twice);
    assert_eq!(twice.classes().len(), 1);
}

#[test]
fn test_switch_class() {
    let mut attrs = AttributeMap::new();
    attrs.set("class", "btn is-light");
    attrs.switch_class("is-light", "is-dark");
    assert_eq!(attrs.get("class"), Some("btn is-dark"));
}

// ============================================================================
// TAGS
// ============================================================================

#[test]
fn test_void_elements_never_close() {
    for name in VOID_ELEMENTS {
        let mut tag = Tag::new(name);
        tag.set_self_closing(false);
        let mut out = Vec::new();
        assert!(tag.render_opening(&mut out).unwrap());
        tag.render_closing(&mut out).unwrap();
        let html = String::from_utf8(out).unwrap();
        assert!(!html.contains("</"), "{html}");
    }
}

#[test]
fn test_tag_with_attributes() {
    let tag = Tag::with_attributes("INPUT", "type=checkbox checked");
    assert_eq!(tag.name(), "input");
    assert_eq!(tag.opening().unwrap(), "<input checked type=\"checkbox\">");
}
