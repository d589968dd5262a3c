//! Grammar characters and character classes shared by every list layer.

/// Separates an element's name from its description (`Name:Desc`).
pub const NAME_DELIM: char = ':';

/// Default element delimiter.
pub const PRIME_DELIM: char = '|';

/// Separates nested sub-list bodies inside one raw string.
pub const SECOND_DELIM: char = '\t';

/// Separates independent list definitions in bulk text.
pub const LINE_DELIM: char = '\n';

/// Opens a format tag at the start of a description.
pub const FORMAT_START: char = '[';

/// Closes a format tag.
pub const FORMAT_END: char = ']';

/// Record separator used by [`split_records`] callers.
pub const RECORD_SEPARATOR: char = '\x0C';

/// Lines starting with this are comments, in list files and layouts alike.
pub const COMMENT_START: char = '!';

/// Digits plus the sign characters that may start a number.
///
/// Element names must not start with one of these, and a list whose first
/// element starts with one is a reference list.
pub fn is_digit_like(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '-' || ch == '+'
}

/// Characters that may terminate list elements.
pub fn is_delimiter_like(ch: char) -> bool {
    matches!(ch, '|' | '~' | '^' | '\\') || (ch as u32) < 0x20
}

/// Split `text` on `sep`, dropping empty pieces.
///
/// A blank-line separator (`"\n\n"`) also trims each piece, so paragraphs
/// separated by extra whitespace come back clean.
pub fn split_records(text: &str, sep: &str) -> Vec<String> {
    if sep.is_empty() {
        return if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        };
    }

    let trim = sep == "\n\n";
    text.split(sep)
        .map(|piece| if trim { piece.trim() } else { piece })
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a number the way list descriptions are read: surrounding
/// whitespace is ignored, anything malformed becomes `NaN`.
pub fn parse_number(text: &str) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return f64::NAN;
    }
    // Rust also accepts "inf" and "NaN"; list text only ever means plain decimals.
    if !t.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        || !t.chars().any(|c| c.is_ascii_digit())
    {
        return f64::NAN;
    }
    let t = t.strip_prefix('+').unwrap_or(t);
    t.parse::<f64>().unwrap_or(f64::NAN)
}

/// True if `text` is one number or a comma-separated run of numbers.
pub fn is_numeric_text(text: &str) -> bool {
    !text.trim().is_empty() && text.split(',').all(|part| !parse_number(part).is_nan())
}
