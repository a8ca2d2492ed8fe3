//! Link references
//!
//! Absolute URLs or relative references such as `/`, `img/logo.svg` or
//! `../x`, kept in the form they were written.

use std::fmt;

use url::Url;

/// Base used to check the syntax of relative references
const CHECK_BASE: &str = "http://relative.invalid/";

/// A link target, absolute or relative
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Href {
    raw: String,
    absolute: Option<Url>,
}

impl Href {
    /// Parse a reference, surrounding whitespace is ignored
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        let raw = input.trim();
        match Url::parse(raw) {
            Ok(url) => Ok(Self::from(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(CHECK_BASE)?.join(raw)?;
                Ok(Self {
                    raw: raw.to_string(),
                    absolute: None,
                })
            }
            Err(err) => Err(err),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_relative(&self) -> bool {
        self.absolute.is_none()
    }

    /// The URL, for absolute references only
    pub fn url(&self) -> Option<&Url> {
        self.absolute.as_ref()
    }

    /// Resolve against `base`
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        match &self.absolute {
            Some(url) => Ok(url.clone()),
            None => base.join(&self.raw),
        }
    }
}

impl From<Url> for Href {
    fn from(url: Url) -> Self {
        Self {
            raw: url.as_str().to_string(),
            absolute: Some(url),
        }
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
