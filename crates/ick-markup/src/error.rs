//! Error types
//!
//! Malformed markup and writer failures stop a render pass. Everything
//! else is reported inline and rendering moves on.

use ick_dom::AttributeError;

use crate::BindError;

/// Markup grammar error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("missing tag name at byte {offset}")]
    MissingTagName { offset: usize },

    #[error("invalid character {ch:?} in tag name at byte {offset}")]
    InvalidTagName { ch: char, offset: usize },

    #[error("{tag}: invalid character {ch:?} in attribute name at byte {offset}")]
    InvalidAttributeName { tag: String, ch: char, offset: usize },

    #[error("{tag}: '=' without attribute name at byte {offset}")]
    MissingAttributeName { tag: String, offset: usize },

    #[error("{tag}: missing value for attribute {attribute:?} at byte {offset}")]
    MissingValue { tag: String, attribute: String, offset: usize },

    #[error("{tag}: unterminated tag starting at byte {offset}")]
    Unterminated { tag: String, offset: usize },
}

/// Render error
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("malformed markup: {0}")]
    Parse(#[from] ParseError),

    #[error("{tag}: unregistered component")]
    UnknownComponent { tag: String },

    #[error("{tag}: {source}")]
    Binding { tag: String, source: BindError },

    #[error("{component}: {source}")]
    Attribute { component: String, source: AttributeError },

    #[error("{component}: {message}")]
    Component { component: String, message: String },

    #[error("recursion limit exceeded: depth {depth} is over {limit}")]
    RecursionLimitExceeded { depth: usize, limit: usize },

    #[error("write error: {0}")]
    Writer(#[from] std::io::Error),
}

impl RenderError {
    /// Fatal errors abort the whole render pass
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Parse(_) | Self::RecursionLimitExceeded { .. } | Self::Writer(_)
        )
    }

    /// Error raised by a component from its own content
    pub fn component(component: &str, message: impl Into<String>) -> Self {
        Self::Component {
            component: component.to_string(),
            message: message.into(),
        }
    }
}

/// Registration error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("{0:?}: name must start with \"ick-\"")]
    MissingPrefix(String),

    #[error("{0:?}: component name missing")]
    MissingName(String),

    #[error("{0:?}: invalid component name")]
    InvalidName(String),

    #[error("{name:?} is already registered with {existing}")]
    AlreadyRegistered { name: String, existing: &'static str },
}
