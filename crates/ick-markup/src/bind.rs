//! Attribute binding
//!
//! Each component type declares a table of `(attribute name, setter)` pairs.
//! A matching attribute is converted to the field's type; any other
//! attribute lands on the component's own tag.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::time::Duration;

use ick_dom::{check_attribute, AttributeError, Href};
use url::Url;

use crate::{duration::parse_duration, Composer, DurationError, HtmlString};

/// Conversion failure for a single value
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("not an integer: {0}")]
    Int(#[from] ParseIntError),

    #[error("not a number: {0}")]
    Float(#[from] ParseFloatError),

    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error("not a field and not assignable")]
    NotAssignable,
}

/// Binding failure, names the attribute
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{attribute:?} attribute: {source}")]
pub struct BindError {
    pub attribute: String,
    #[source]
    pub source: ConvertError,
}

/// Types a raw attribute string converts into
pub trait FromAttribute: Sized {
    fn from_attribute(value: &str) -> Result<Self, ConvertError>;
}

impl FromAttribute for String {
    fn from_attribute(value: &str) -> Result<Self, ConvertError> {
        Ok(value.to_string())
    }
}

macro_rules! from_attribute_parse {
    ($($ty:ty),*) => {
        $(
            impl FromAttribute for $ty {
                fn from_attribute(value: &str) -> Result<Self, ConvertError> {
                    Ok(value.trim().parse::<$ty>()?)
                }
            }
        )*
    };
}

from_attribute_parse!(i32, i64, u32, u64, usize, f32, f64);

/// `false` and `0` are false, anything else (including empty) is true
impl FromAttribute for bool {
    fn from_attribute(value: &str) -> Result<Self, ConvertError> {
        let value = value.trim();
        Ok(!(value.eq_ignore_ascii_case("false") || value == "0"))
    }
}

impl FromAttribute for Duration {
    fn from_attribute(value: &str) -> Result<Self, ConvertError> {
        Ok(parse_duration(value)?)
    }
}

/// Absolute URLs only, use [`Href`] for link targets
impl FromAttribute for Url {
    fn from_attribute(value: &str) -> Result<Self, ConvertError> {
        Ok(Url::parse(value.trim())?)
    }
}

/// Absolute URL or relative reference, kept as written
impl FromAttribute for Href {
    fn from_attribute(value: &str) -> Result<Self, ConvertError> {
        Ok(Href::parse(value)?)
    }
}

impl FromAttribute for HtmlString {
    fn from_attribute(value: &str) -> Result<Self, ConvertError> {
        Ok(HtmlString::new(value))
    }
}

type Setter<T> = Box<dyn Fn(&mut T, &str) -> Result<(), ConvertError> + Send + Sync>;

/// Attribute-to-field table of a component type
pub struct Bindings<T> {
    fields: Vec<(&'static str, Setter<T>)>,
}

impl<T: Composer> Bindings<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Bind attribute `name` to a field through `set`
    pub fn field<V, F>(mut self, name: &'static str, set: F) -> Self
    where
        V: FromAttribute,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.fields.push((
            name,
            Box::new(move |target, raw| {
                set(target, V::from_attribute(raw)?);
                Ok(())
            }),
        ));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bound attribute names, in declaration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Apply one attribute to `target`.
    ///
    /// Names are matched exactly. Unmatched attributes go to the target's tag,
    /// where `class` adds to the existing classes.
    pub fn apply(&self, target: &mut T, name: &str, value: &str) -> Result<(), BindError> {
        let bind_error = |source: ConvertError| BindError {
            attribute: name.to_string(),
            source,
        };

        if let Some((_, set)) = self.fields.iter().find(|(field, _)| *field == name) {
            return set(target, value).map_err(bind_error);
        }

        let Some(tag) = target.tag_mut() else {
            return Err(bind_error(ConvertError::NotAssignable));
        };
        check_attribute(name, value).map_err(|err| bind_error(err.into()))?;
        if name == "class" {
            tag.attrs_mut().add_class(value);
        } else {
            tag.attrs_mut().set(name, value);
        }
        Ok(())
    }
}

impl<T: Composer> Default for Bindings<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Bindings<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.fields.iter().map(|(name, _)| name))
            .finish()
    }
}
