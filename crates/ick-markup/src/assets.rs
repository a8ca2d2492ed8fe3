//! Required assets
//!
//! Stylesheets declared by components, collected without duplicates for
//! whoever assembles the page head.

use std::sync::{Mutex, MutexGuard, PoisonError};

use url::Url;

/// Stylesheet files and inline styles required by rendered components
#[derive(Debug, Default)]
pub struct RequiredAssets {
    files: Mutex<Vec<Url>>,
    styles: Mutex<Vec<(String, String)>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RequiredAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a stylesheet file. Returns whether it was new.
    pub fn require_css_file(&self, url: &str) -> Result<bool, url::ParseError> {
        let url = Url::parse(url.trim())?;
        let mut files = lock(&self.files);
        if files.contains(&url) {
            return Ok(false);
        }
        tracing::debug!("required css file {}", url);
        files.push(url);
        Ok(true)
    }

    /// Require an inline style block, once per tag name
    pub fn require_css_style(&self, tag_name: &str, css: &str) -> bool {
        let tag_name = tag_name.trim().to_lowercase();
        let mut styles = lock(&self.styles);
        if styles.iter().any(|(name, _)| *name == tag_name) {
            return false;
        }
        tracing::debug!("required css style for {}", tag_name);
        styles.push((tag_name, css.trim().to_string()));
        true
    }

    /// Required files in declaration order
    pub fn css_files(&self) -> Vec<Url> {
        lock(&self.files).clone()
    }

    /// All inline styles, each preceded by a `/* tag */` header
    pub fn css_style(&self) -> String {
        let mut css = String::new();
        for (name, style) in lock(&self.styles).iter() {
            css.push_str(&format!("/* {name} */\n{style}\n"));
        }
        css
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.files).is_empty() && lock(&self.styles).is_empty()
    }

    pub fn clear(&self) {
        lock(&self.files).clear();
        lock(&self.styles).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_files_dedup() {
        let assets = RequiredAssets::new();
        assert_eq!(assets.require_css_file("https://cdn.example.com/a.css"), Ok(true));
        assert_eq!(assets.require_css_file(" https://cdn.example.com/a.css "), Ok(false));
        assert_eq!(assets.require_css_file("https://cdn.example.com/b.css"), Ok(true));
        assert!(assets.require_css_file("not a url").is_err());
        assert_eq!(assets.css_files().len(), 2);
    }

    #[test]
    fn test_css_styles_dedup() {
        let assets = RequiredAssets::new();
        assert!(assets.require_css_style("ick-card", ".card { margin: 0 }"));
        assert!(!assets.require_css_style("ICK-CARD", ".card { padding: 0 }"));
        assert!(assets.require_css_style("ick-tag", ".tag {}"));
        assert_eq!(
            assets.css_style(),
            "/* ick-card */\n.card { margin: 0 }\n/* ick-tag */\n.tag {}\n"
        );
        assets.clear();
        assert!(assets.is_empty());
    }
}
