//! Attribute and tag errors

/// Attribute validation or serialization error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    #[error("invalid attribute name {0:?}")]
    InvalidName(String),

    #[error("invalid {attribute} value {value:?}")]
    InvalidValue { attribute: String, value: String },

    #[error("invalid class token {0:?}")]
    InvalidClass(String),

    #[error("tabindex {0:?} is not an integer")]
    InvalidTabIndex(String),

    #[error("ambiguous quotes in the value {0:?}")]
    AmbiguousQuotes(String),

    #[error("unterminated quoted value {0:?}")]
    UnterminatedQuote(String),
}

/// Tag rendering error
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}
