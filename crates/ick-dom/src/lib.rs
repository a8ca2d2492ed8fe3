//! ick DOM - attributes and tags
//!
//! Validated attribute maps and the tags that own them.

mod attributes;
mod classlist;
mod error;
mod href;
mod names;
mod tag;

pub use attributes::{check_attribute, stringify_value, AttributeMap};
pub use classlist::ClassList;
pub use error::{AttributeError, TagError};
pub use href::Href;
pub use names::{is_valid_name, is_valid_name_char};
pub use tag::{is_void_element, Tag, VOID_ELEMENTS};
