//! Class token list
//!
//! Space-separated, duplicate-free class tokens backing the `class` attribute.

use crate::{names::is_valid_name, AttributeError};

/// Ordered set of class tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a `class` value on whitespace, keeping the first copy of each token.
    /// Tokens are not validated here.
    pub fn from_value(value: &str) -> Self {
        let mut list = Self::new();
        for token in value.split_whitespace() {
            if !list.contains(token) {
                list.tokens.push(token.to_string());
            }
        }
        list
    }

    /// Check a single token against the name grammar
    pub fn check(token: &str) -> Result<(), AttributeError> {
        if is_valid_name(token) {
            Ok(())
        } else {
            Err(AttributeError::InvalidClass(token.to_string()))
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add one token. Returns `Ok(false)` when it was already there.
    pub fn add(&mut self, token: &str) -> Result<bool, AttributeError> {
        Self::check(token)?;
        if self.contains(token) {
            return Ok(false);
        }
        self.tokens.push(token.to_string());
        Ok(true)
    }

    /// Remove a token, returns whether it was present
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        before != self.tokens.len()
    }

    /// Replace `old_token` in place, or append `new_token` when `old_token` is absent.
    pub fn switch(&mut self, old_token: &str, new_token: &str) -> Result<(), AttributeError> {
        Self::check(new_token)?;
        match self.tokens.iter().position(|t| t == old_token) {
            Some(pos) => {
                self.tokens[pos] = new_token.to_string();
                // new_token may already have been present further along
                let mut seen = false;
                self.tokens.retain(|t| {
                    if t != new_token {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => {
                self.add(new_token)?;
            }
        }
        Ok(())
    }

    /// Get value as string
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Iterate over tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
