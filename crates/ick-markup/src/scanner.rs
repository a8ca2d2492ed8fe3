//! Markup scanner
//!
//! Splits rich markup into literal text runs and component tags of the form
//! `<ick-name attr attr=value attr="quoted value"/>`. Component tags are
//! always self-closing.
//!
//! Scanning is lazy: tokens come out one at a time so callers can write
//! text before a later tag turns out to be malformed. The first grammar
//! error ends the token stream.

use ick_dom::is_valid_name_char;

use crate::ParseError;

/// Opening sentinel of a component tag, `<` followed by the tag prefix
pub const TAG_OPEN: &str = "<ick-";

/// Closing sequence of a component tag
pub const TAG_CLOSE: &str = "/>";

/// A complete component tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTag {
    /// Lowercased name including the `ick-` prefix
    pub name: String,
    /// Attributes in source order, later duplicates overwrite in place
    pub attributes: Vec<(String, String)>,
    /// Byte offset of the opening `<`
    pub offset: usize,
}

impl ParsedTag {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, name: String, value: String) {
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name, value)),
        }
    }
}

/// Scanner output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'s> {
    Text(&'s str),
    Tag(ParsedTag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quoting {
    /// Nothing but spaces read after `=`
    Pending,
    /// Unquoted run starting at a byte offset
    Unquoted(usize),
    /// Quoted run, the quote char and the offset after it
    Quoted(char, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    TagName,
    AttrName,
    AttrValue(Quoting),
    /// Right after a closing quote
    AfterValue,
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Tokenizer over one markup string
#[derive(Debug, Clone)]
pub struct Scanner<'s> {
    input: &'s str,
    pos: usize,
    failed: bool,
}

impl<'s> Scanner<'s> {
    pub fn new(input: &'s str) -> Self {
        Self {
            input,
            pos: 0,
            failed: false,
        }
    }

    /// Byte offset of the next token
    pub fn position(&self) -> usize {
        self.pos
    }

    fn scan_tag(&mut self) -> Result<ParsedTag, ParseError> {
        let start = self.pos;
        let name_start = start + 1;
        let first_name_char = start + TAG_OPEN.len();
        let mut tag = ParsedTag {
            offset: start,
            ..ParsedTag::default()
        };
        let mut attr = String::new();
        let mut state = State::TagName;
        let mut i = first_name_char;

        loop {
            let rest = &self.input[i..];
            let Some(c) = rest.chars().next() else {
                let name = if tag.name.is_empty() {
                    self.input[name_start..i].to_lowercase()
                } else {
                    tag.name
                };
                return Err(ParseError::Unterminated { tag: name, offset: start });
            };
            let at_close = rest.starts_with(TAG_CLOSE);

            match state {
                State::TagName => {
                    if at_close || is_space(c) {
                        if i == first_name_char {
                            return Err(ParseError::MissingTagName { offset: start });
                        }
                        tag.name = self.input[name_start..i].to_lowercase();
                        if at_close {
                            i += TAG_CLOSE.len();
                            break;
                        }
                        state = State::AttrName;
                    } else if !is_valid_name_char(c, false) {
                        return Err(ParseError::InvalidTagName { ch: c, offset: i });
                    }
                }
                State::AttrName => {
                    if at_close || is_space(c) {
                        if !attr.is_empty() {
                            tag.set(std::mem::take(&mut attr), String::new());
                        }
                        if at_close {
                            i += TAG_CLOSE.len();
                            break;
                        }
                    } else if c == '=' {
                        if attr.is_empty() {
                            return Err(ParseError::MissingAttributeName {
                                tag: tag.name,
                                offset: i,
                            });
                        }
                        state = State::AttrValue(Quoting::Pending);
                    } else if is_valid_name_char(c, attr.is_empty()) {
                        attr.push(c);
                    } else {
                        return Err(ParseError::InvalidAttributeName {
                            tag: tag.name,
                            ch: c,
                            offset: i,
                        });
                    }
                }
                State::AttrValue(Quoting::Pending) => {
                    if at_close {
                        return Err(ParseError::MissingValue {
                            tag: tag.name,
                            attribute: attr,
                            offset: i,
                        });
                    } else if c == '"' || c == '\'' {
                        state = State::AttrValue(Quoting::Quoted(c, i + 1));
                    } else if !is_space(c) {
                        state = State::AttrValue(Quoting::Unquoted(i));
                    }
                }
                State::AttrValue(Quoting::Unquoted(from)) => {
                    if at_close || is_space(c) {
                        let value = self.input[from..i].to_string();
                        tag.set(std::mem::take(&mut attr), value);
                        state = State::AttrName;
                        if at_close {
                            i += TAG_CLOSE.len();
                            break;
                        }
                    }
                }
                State::AttrValue(Quoting::Quoted(quote, from)) => {
                    if c == quote {
                        let value = self.input[from..i].to_string();
                        tag.set(std::mem::take(&mut attr), value);
                        state = State::AfterValue;
                    }
                }
                State::AfterValue => {
                    if at_close {
                        i += TAG_CLOSE.len();
                        break;
                    } else if is_space(c) {
                        state = State::AttrName;
                    } else {
                        return Err(ParseError::InvalidAttributeName {
                            tag: tag.name,
                            ch: c,
                            offset: i,
                        });
                    }
                }
            }
            i += c.len_utf8();
        }

        self.pos = i;
        Ok(tag)
    }
}

impl<'s> Iterator for Scanner<'s> {
    type Item = Result<Token<'s>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.input.len() {
            return None;
        }

        let rest = &self.input[self.pos..];
        if rest.starts_with(TAG_OPEN) {
            let result = self.scan_tag();
            self.failed = result.is_err();
            return Some(result.map(Token::Tag));
        }

        let len = rest.find(TAG_OPEN).unwrap_or(rest.len());
        self.pos += len;
        Some(Ok(Token::Text(&rest[..len])))
    }
}
