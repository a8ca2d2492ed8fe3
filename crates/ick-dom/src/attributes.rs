//! Element Attributes
//!
//! Validated attribute store with deterministic serialization.
//!
//! `id`, `name`, `class`, `style` and `tabindex` carry extra rules:
//! - assigning `"false"` to any attribute removes it
//! - assigning an empty value to one of the special keys removes it
//! - `class` holds unique, individually validated tokens
//!
//! Setters are chainable and fail soft: an invalid name or value is logged
//! and the map is left untouched. [`check_attribute`] gives the same
//! verdict as an explicit error.

use std::collections::BTreeMap;

use url::Url;

use crate::{names::is_valid_name, AttributeError, ClassList, Href};

/// Keys serialized ahead of the alphabetical remainder, in this order.
const LEADING_KEYS: [&str; 3] = ["id", "name", "class"];

/// Keys removed when assigned an empty value.
const SPECIAL_KEYS: [&str; 5] = ["id", "class", "style", "tabindex", "name"];

/// Validate an attribute name and, for the special keys, its value.
pub fn check_attribute(name: &str, value: &str) -> Result<(), AttributeError> {
    if !is_valid_name(name) {
        return Err(AttributeError::InvalidName(name.to_string()));
    }
    let trimmed = value.trim();
    match name {
        "id" | "name" if !trimmed.is_empty() && !is_valid_name(trimmed) => {
            Err(AttributeError::InvalidValue {
                attribute: name.to_string(),
                value: value.to_string(),
            })
        }
        "class" => value.split_whitespace().try_for_each(ClassList::check),
        "tabindex" if !trimmed.is_empty() && trimmed.parse::<i64>().is_err() => {
            Err(AttributeError::InvalidTabIndex(value.to_string()))
        }
        _ => Ok(()),
    }
}

/// Stringify a value for use after `name=`.
///
/// Returns `None` for a bare boolean attribute (empty or `true`).
pub fn stringify_value(value: &str) -> Result<Option<String>, AttributeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("true") {
        return Ok(None);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Ok(Some("false".to_string()));
    }
    if value.parse::<f64>().is_ok() {
        return Ok(Some(value.to_string()));
    }
    match (value.contains('"'), value.contains('\'')) {
        (true, true) => Err(AttributeError::AmbiguousQuotes(value.to_string())),
        (true, false) => Ok(Some(format!("'{value}'"))),
        _ => Ok(Some(format!("\"{value}\""))),
    }
}

/// Attribute collection of a single tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    attrs: BTreeMap<String, String>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `name name=value name="quoted value"` list.
    ///
    /// Later duplicates win. Values go through the same rules as [`set`](Self::set),
    /// so `checked=false` leaves no `checked` entry.
    pub fn parse(list: &str) -> Result<Self, AttributeError> {
        let mut map = Self::new();
        let mut rest = list.trim_start();
        while !rest.is_empty() {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '=')
                .unwrap_or(rest.len());
            let name = &rest[..end];
            rest = rest[end..].trim_start();

            let mut value = "";
            if let Some(after) = rest.strip_prefix('=') {
                let (v, remaining) = split_value(after.trim_start())?;
                value = v;
                rest = remaining;
            }
            map.save(name, value, true)?;
            rest = rest.trim_start();
        }
        Ok(map)
    }

    /// Like [`parse`](Self::parse), but returns an empty map on error
    pub fn parse_lossy(list: &str) -> Self {
        Self::parse(list).unwrap_or_else(|err| {
            tracing::warn!("ignoring attribute list {:?}: {}", list, err);
            Self::new()
        })
    }

    /// Get number of attributes
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Get attribute value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|v| v.as_str())
    }

    /// Check if attribute exists
    pub fn has(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Iterate over attributes in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set attribute, overwriting any previous value
    pub fn set(&mut self, name: &str, value: &str) -> &mut Self {
        if let Err(err) = self.save(name, value, true) {
            tracing::warn!("set attribute {:?}: {}", name, err);
        }
        self
    }

    /// Set attribute only if it is not already there
    pub fn try_set(&mut self, name: &str, value: &str) -> &mut Self {
        if let Err(err) = self.save(name, value, false) {
            tracing::warn!("set attribute {:?}: {}", name, err);
        }
        self
    }

    /// Remove attribute by name
    pub fn remove(&mut self, name: &str) -> &mut Self {
        self.attrs.remove(name.trim());
        self
    }

    /// Toggle a boolean attribute, returns whether it is now present
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.has(name.trim()) {
            self.remove(name);
            false
        } else {
            self.set(name, "");
            self.has(name.trim())
        }
    }

    /// Add or remove a boolean attribute
    pub fn set_bool(&mut self, name: &str, value: bool) -> &mut Self {
        if value {
            self.set(name, "")
        } else {
            self.remove(name)
        }
    }

    /// An attribute is true when present with a value that is neither
    /// `false` nor the integer `0`.
    pub fn is_true(&self, name: &str) -> bool {
        match self.get(name) {
            None => false,
            Some(v) => {
                let v = v.trim();
                !v.eq_ignore_ascii_case("false") && v.parse::<i64>() != Ok(0)
            }
        }
    }

    /// Get the `id` attribute, empty when absent
    pub fn id(&self) -> &str {
        self.get("id").unwrap_or_default()
    }

    pub fn set_id(&mut self, id: &str) -> &mut Self {
        self.set("id", id)
    }

    /// Get the `name` attribute, empty when absent
    pub fn name(&self) -> &str {
        self.get("name").unwrap_or_default()
    }

    pub fn set_name(&mut self, name: &str) -> &mut Self {
        self.set("name", name)
    }

    /// `tabindex` as an integer, 0 when absent
    pub fn tab_index(&self) -> i64 {
        self.get("tabindex")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn set_tab_index(&mut self, index: i64) -> &mut Self {
        self.set("tabindex", &index.to_string())
    }

    pub fn style(&self) -> &str {
        self.get("style").unwrap_or_default()
    }

    pub fn set_style(&mut self, style: &str) -> &mut Self {
        self.set("style", style)
    }

    /// Append declarations to the current style
    pub fn add_style(&mut self, style: &str) -> &mut Self {
        let style = style.trim();
        if style.is_empty() {
            return self;
        }
        let current = self.style().trim();
        let merged = if current.is_empty() {
            style.to_string()
        } else if current.ends_with(';') {
            format!("{current} {style}")
        } else {
            format!("{current}; {style}")
        };
        self.set_style(&merged)
    }

    pub fn is_disabled(&self) -> bool {
        self.is_true("disabled")
    }

    pub fn set_disabled(&mut self, disabled: bool) -> &mut Self {
        self.set_bool("disabled", disabled)
    }

    /// Set a link attribute, `#` when there is no target
    pub fn set_url(&mut self, name: &str, url: Option<&Url>) -> &mut Self {
        self.set(name, url.map_or("#", Url::as_str))
    }

    /// Set a link attribute from a reference, `#` when there is none
    pub fn set_href(&mut self, name: &str, href: Option<&Href>) -> &mut Self {
        let target = href.map(Href::as_str).filter(|h| !h.trim().is_empty());
        self.set(name, target.unwrap_or("#"))
    }

    /// Set `if_true` when `cond`, otherwise `if_false`, or remove the
    /// attribute when there is no `if_false`
    pub fn set_if(&mut self, cond: bool, name: &str, if_true: &str, if_false: Option<&str>) -> &mut Self {
        match (cond, if_false) {
            (true, _) => self.set(name, if_true),
            (false, Some(value)) => self.set(name, value),
            (false, None) => self.remove(name),
        }
    }

    /// Current class tokens
    pub fn classes(&self) -> ClassList {
        ClassList::from_value(self.get("class").unwrap_or_default())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(class.trim())
    }

    /// Add space-separated class tokens, skipping duplicates and invalid tokens
    pub fn add_class(&mut self, list: &str) -> &mut Self {
        let mut classes = self.classes();
        for token in list.split_whitespace() {
            if let Err(err) = classes.add(token) {
                tracing::warn!("add class: {}", err);
            }
        }
        self.store_classes(&classes);
        self
    }

    pub fn add_class_if(&mut self, cond: bool, list: &str) -> &mut Self {
        if cond {
            self.add_class(list);
        }
        self
    }

    /// Drop every class
    pub fn reset_class(&mut self) -> &mut Self {
        self.attrs.remove("class");
        self
    }

    /// Remove space-separated class tokens, dropping `class` once empty
    pub fn remove_class(&mut self, list: &str) -> &mut Self {
        let mut classes = self.classes();
        for token in list.split_whitespace() {
            classes.remove(token);
        }
        self.store_classes(&classes);
        self
    }

    /// Replace class `from` with `to`, or add `to` when `from` is absent
    pub fn switch_class(&mut self, from: &str, to: &str) -> &mut Self {
        let mut classes = self.classes();
        match classes.switch(from.trim(), to.trim()) {
            Ok(()) => self.store_classes(&classes),
            Err(err) => tracing::warn!("switch class: {}", err),
        }
        self
    }

    /// Add `if_true` and remove `if_false` when `cond`, the opposite otherwise
    pub fn set_class_if(&mut self, cond: bool, if_true: &str, if_false: &str) -> &mut Self {
        let (add, remove) = if cond { (if_true, if_false) } else { (if_false, if_true) };
        self.remove_class(remove).add_class(add)
    }

    /// Keep exactly one class out of the space-separated `options`.
    ///
    /// Every option is removed, then `picked` is added back if it is one of them.
    pub fn pick_class(&mut self, options: &str, picked: &str) -> &mut Self {
        self.remove_class(options);
        let picked = picked.trim();
        if !picked.is_empty() && options.split_whitespace().any(|o| o == picked) {
            self.add_class(picked);
        }
        self
    }

    /// Serialize as `id name class rest...`, rest in alphabetical order.
    pub fn attribute_string(&self) -> Result<String, AttributeError> {
        let leading = LEADING_KEYS
            .iter()
            .filter_map(|k| self.attrs.get_key_value(*k));
        let rest = self
            .attrs
            .iter()
            .filter(|(k, _)| !LEADING_KEYS.contains(&k.as_str()));

        let mut parts = Vec::with_capacity(self.attrs.len());
        for (name, value) in leading.chain(rest) {
            let value = if SPECIAL_KEYS.contains(&name.as_str()) && value.trim().eq_ignore_ascii_case("true") {
                Some(format!("\"{value}\""))
            } else {
                stringify_value(value)?
            };
            match value {
                Some(v) => parts.push(format!("{name}={v}")),
                None => parts.push(name.clone()),
            }
        }
        Ok(parts.join(" "))
    }

    fn store_classes(&mut self, classes: &ClassList) {
        if classes.is_empty() {
            self.attrs.remove("class");
        } else {
            self.attrs.insert("class".to_string(), classes.value());
        }
    }

    fn save(&mut self, name: &str, value: &str, overwrite: bool) -> Result<(), AttributeError> {
        let name = name.trim();
        check_attribute(name, value)?;
        if !overwrite && self.attrs.contains_key(name) {
            return Ok(());
        }

        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("false") {
            self.attrs.remove(name);
            return Ok(());
        }
        if trimmed.is_empty() && SPECIAL_KEYS.contains(&name) {
            self.attrs.remove(name);
            return Ok(());
        }

        match name {
            "class" => self.store_classes(&ClassList::from_value(value)),
            "tabindex" => {
                let index: i64 = trimmed
                    .parse()
                    .map_err(|_| AttributeError::InvalidTabIndex(value.to_string()))?;
                self.attrs.insert(name.to_string(), index.to_string());
            }
            _ if !SPECIAL_KEYS.contains(&name)
                && (trimmed.is_empty() || trimmed.eq_ignore_ascii_case("true")) =>
            {
                self.attrs.insert(name.to_string(), String::new());
            }
            _ => {
                self.attrs.insert(name.to_string(), value.to_string());
            }
        }
        Ok(())
    }
}

/// Split a raw value off the front of `s`, honouring quotes.
fn split_value(s: &str) -> Result<(&str, &str), AttributeError> {
    match s.chars().next() {
        Some(q @ ('"' | '\'')) => {
            let body = &s[1..];
            match body.find(q) {
                Some(end) => Ok((&body[..end], &body[end + 1..])),
                None => Err(AttributeError::UnterminatedQuote(s.to_string())),
            }
        }
        _ => {
            let end = s.find(char::is_whitespace).unwrap_or(s.len());
            Ok((&s[..end], &s[end..]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_attribute() {
        let mut attrs = AttributeMap::new();
        attrs.set("href", "/docs").set("data-x", "1");
        assert_eq!(attrs.get("href"), Some("/docs"));
        assert_eq!(attrs.get("data-x"), Some("1"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_false_removes() {
        let mut attrs = AttributeMap::new();
        attrs.set("checked", "").set("checked", " FALSE ");
        assert!(!attrs.has("checked"));
    }

    #[test]
    fn test_empty_special_removes() {
        let mut attrs = AttributeMap::new();
        attrs.set("id", "main").set("style", "color:red").set("data-x", "");
        attrs.set("id", "").set("style", "  ");
        assert!(!attrs.has("id"));
        assert!(!attrs.has("style"));
        assert_eq!(attrs.get("data-x"), Some(""));
    }

    #[test]
    fn test_invalid_name_is_skipped() {
        let mut attrs = AttributeMap::new();
        attrs.set("1x", "a").set("a b", "c").set("ok", "d");
        assert_eq!(attrs.len(), 1);
        assert!(check_attribute("1x", "a").is_err());
        assert!(check_attribute("ok", "d").is_ok());
    }

    #[test]
    fn test_special_value_checks() {
        assert!(check_attribute("id", "a b").is_err());
        assert!(check_attribute("name", "9").is_err());
        assert!(check_attribute("tabindex", "x").is_err());
        assert!(check_attribute("tabindex", "-1").is_ok());
        assert!(check_attribute("class", "a 1b").is_err());

        let mut attrs = AttributeMap::new();
        attrs.set("tabindex", "two");
        assert_eq!(attrs.tab_index(), 0);
        attrs.set_tab_index(3);
        assert_eq!(attrs.tab_index(), 3);
    }

    #[test]
    fn test_try_set_keeps_existing() {
        let mut attrs = AttributeMap::new();
        attrs.set("role", "button").try_set("role", "link").try_set("title", "t");
        assert_eq!(attrs.get("role"), Some("button"));
        assert_eq!(attrs.get("title"), Some("t"));
    }

    #[test]
    fn test_toggle() {
        let mut attrs = AttributeMap::new();
        assert!(attrs.toggle("hidden"));
        assert_eq!(attrs.get("hidden"), Some(""));
        assert!(!attrs.toggle("hidden"));
        assert!(!attrs.has("hidden"));
    }

    #[test]
    fn test_is_true() {
        let mut attrs = AttributeMap::new();
        attrs.set("a", "").set("b", "0").set("c", "yes");
        assert!(attrs.is_true("a"));
        assert!(!attrs.is_true("b"));
        assert!(attrs.is_true("c"));
        assert!(!attrs.is_true("missing"));

        attrs.set_disabled(true);
        assert!(attrs.is_disabled());
        attrs.set_disabled(false);
        assert!(!attrs.has("disabled"));
    }

    #[test]
    fn test_classes() {
        let mut attrs = AttributeMap::new();
        attrs.set("class", "a").add_class("b a");
        assert_eq!(attrs.get("class"), Some("a b"));
        assert!(attrs.has_class("b"));

        attrs.add_class("bad;token c");
        assert_eq!(attrs.get("class"), Some("a b c"));

        attrs.remove_class("a b c");
        assert!(!attrs.has("class"));
    }

    #[test]
    fn test_set_class_if_and_pick() {
        let mut attrs = AttributeMap::new();
        attrs.set_class_if(true, "on", "off");
        assert_eq!(attrs.get("class"), Some("on"));
        attrs.set_class_if(false, "on", "off");
        assert_eq!(attrs.get("class"), Some("off"));

        attrs.add_class("is-small");
        attrs.pick_class("is-small is-medium is-large", "is-large");
        assert_eq!(attrs.get("class"), Some("off is-large"));
        attrs.pick_class("is-small is-medium is-large", "is-huge");
        assert_eq!(attrs.get("class"), Some("off"));
    }

    #[test]
    fn test_add_style() {
        let mut attrs = AttributeMap::new();
        attrs.add_style("color: red").add_style("margin: 0;");
        assert_eq!(attrs.style(), "color: red; margin: 0;");
    }

    #[test]
    fn test_set_url() {
        let mut attrs = AttributeMap::new();
        attrs.set_url("href", None);
        assert_eq!(attrs.get("href"), Some("#"));
        let url = Url::parse("https://example.com/a").unwrap();
        attrs.set_url("href", Some(&url));
        assert_eq!(attrs.get("href"), Some("https://example.com/a"));
    }

    #[test]
    fn test_stringify_value() {
        assert_eq!(stringify_value(""), Ok(None));
        assert_eq!(stringify_value("TRUE"), Ok(None));
        assert_eq!(stringify_value("false"), Ok(Some("false".into())));
        assert_eq!(stringify_value("1.5"), Ok(Some("1.5".into())));
        assert_eq!(stringify_value("a b"), Ok(Some("\"a b\"".into())));
        assert_eq!(stringify_value("say \"hi\""), Ok(Some("'say \"hi\"'".into())));
        assert_eq!(stringify_value("it's"), Ok(Some("\"it's\"".into())));
        assert!(matches!(
            stringify_value("\"it's\""),
            Err(AttributeError::AmbiguousQuotes(_))
        ));
    }

    #[test]
    fn test_attribute_string_order() {
        let mut attrs = AttributeMap::new();
        attrs
            .set("zeta", "z")
            .set("class", "c")
            .set("alpha", "")
            .set("name", "n")
            .set("id", "i");
        assert_eq!(
            attrs.attribute_string().unwrap(),
            "id=\"i\" name=\"n\" class=\"c\" alpha zeta=\"z\""
        );
    }

    #[test]
    fn test_parse() {
        let attrs = AttributeMap::parse("disabled checked=false name=x").unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("disabled"), Some(""));
        assert_eq!(attrs.get("name"), Some("x"));

        let attrs = AttributeMap::parse("a = 'x y' b=\"q'\"  c").unwrap();
        assert_eq!(attrs.get("a"), Some("x y"));
        assert_eq!(attrs.get("b"), Some("q'"));
        assert_eq!(attrs.get("c"), Some(""));
    }

    #[test]
    fn test_parse_errors() {
        assert!(AttributeMap::parse("a='open").is_err());
        assert!(AttributeMap::parse("=x").is_err());
        assert!(AttributeMap::parse_lossy("ok 1bad").is_empty());
    }

    #[test]
    fn test_true_kept_on_special_keys() {
        let mut attrs = AttributeMap::new();
        attrs.set("id", "true").set("style", "true").set("open", "true");
        assert_eq!(attrs.get("id"), Some("true"));
        assert_eq!(attrs.get("style"), Some("true"));
        assert_eq!(attrs.get("open"), Some(""));
        assert_eq!(attrs.attribute_string().unwrap(), "id=\"true\" open style=\"true\"");
    }

    #[test]
    fn test_set_href() {
        let mut attrs = AttributeMap::new();
        attrs.set_href("href", Href::parse("/icecake.svg").ok().as_ref());
        assert_eq!(attrs.get("href"), Some("/icecake.svg"));
        attrs.set_href("href", None);
        assert_eq!(attrs.get("href"), Some("#"));
        attrs.set_href("src", Href::parse("").ok().as_ref());
        assert_eq!(attrs.get("src"), Some("#"));
    }

    #[test]
    fn test_set_if() {
        let mut attrs = AttributeMap::new();
        attrs.set_if(true, "role", "button", Some("link"));
        assert_eq!(attrs.get("role"), Some("button"));
        attrs.set_if(false, "role", "button", Some("link"));
        assert_eq!(attrs.get("role"), Some("link"));
        attrs.set_if(false, "role", "button", None);
        assert!(!attrs.has("role"));
    }

    #[test]
    fn test_add_class_if_and_reset() {
        let mut attrs = AttributeMap::new();
        attrs.add_class_if(false, "a").add_class_if(true, "b c");
        assert_eq!(attrs.get("class"), Some("b c"));
        attrs.reset_class();
        assert!(!attrs.has("class"));
    }
}
