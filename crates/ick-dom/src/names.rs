//! Name grammar
//!
//! XML-like grammar shared by tag names, attribute names, ids and class tokens.

/// Ranges allowed anywhere in a name, including the first character.
const NAME_START_RANGES: &[(char, char)] = &[
    ('a', 'z'),
    ('A', 'Z'),
    ('_', '_'),
    (':', ':'),
    ('\u{C0}', '\u{D6}'),
    ('\u{D8}', '\u{F6}'),
    ('\u{F8}', '\u{2FF}'),
    ('\u{370}', '\u{37D}'),
    ('\u{37F}', '\u{1FFF}'),
    ('\u{200C}', '\u{200D}'),
    ('\u{2070}', '\u{218F}'),
    ('\u{2C00}', '\u{2FEF}'),
    ('\u{3001}', '\u{D7FF}'),
    ('\u{F900}', '\u{FDCF}'),
    ('\u{FDF0}', '\u{FFFD}'),
    ('\u{10000}', '\u{EFFFF}'),
];

/// Extra ranges allowed after the first character.
const NAME_RANGES: &[(char, char)] = &[
    ('-', '-'),
    ('.', '.'),
    ('0', '9'),
    ('\u{B7}', '\u{B7}'),
    ('\u{300}', '\u{36F}'),
    ('\u{203F}', '\u{2040}'),
];

fn in_ranges(c: char, ranges: &[(char, char)]) -> bool {
    ranges.iter().any(|&(lo, hi)| c >= lo && c <= hi)
}

/// Check a single character of a name. `first` selects the stricter
/// first-character class.
pub fn is_valid_name_char(c: char, first: bool) -> bool {
    if in_ranges(c, NAME_START_RANGES) {
        return true;
    }
    !first && in_ranges(c, NAME_RANGES)
}

/// Check a whole name. Empty names are invalid.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_valid_name_char(c, true) => chars.all(|c| is_valid_name_char(c, false)),
        _ => false,
    }
}
