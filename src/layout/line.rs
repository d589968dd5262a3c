//! One layout line: `LevelMarker [TileRef[:Value]] List`.
//!
//! The level marker is either an explicit run of ASCII digits (`2T\t...`) or
//! the leading whitespace itself, one level per character (`  T\t...`). Sign
//! characters are not part of a level: `-1T|` is level 0.

pub use crate::list::consts::COMMENT_START;
use crate::list::consts::NAME_DELIM;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static LEVEL_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)|([ \t]*))").expect("level marker pattern is valid")
});

/// The name/value pair in front of a line's list body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRef {
    pub name: String,
    pub value: Option<String>,
}

impl TileRef {
    /// `None` for blank text.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let (name, value) = match text.split_once(NAME_DELIM) {
            Some((n, v)) => (n, Some(v.to_string())),
            None => (text, None),
        };
        Some(Self {
            name: name.to_string(),
            value: value.filter(|v| !v.is_empty()),
        })
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{}{NAME_DELIM}{v}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

pub fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_START)
}

/// Split a line into its level and the text after the level marker.
pub fn split_level(line: &str) -> (u32, &str) {
    let Some(caps) = LEVEL_MARKER.captures(line) else {
        return (0, line);
    };
    let end = caps.get(0).map_or(0, |m| m.end());
    let level = match (caps.get(1), caps.get(2)) {
        (Some(digits), _) => digits.as_str().parse().unwrap_or(u32::MAX),
        (None, Some(ws)) => ws.as_str().chars().count() as u32,
        (None, None) => 0,
    };
    (level, &line[end..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn explicit_levels() {
        assert_eq!(split_level("2T\ta|x|\t"), (2, "T\ta|x|\t"));
        assert_eq!(split_level("0Root|"), (0, "Root|"));
        assert_eq!(split_level("12T|"), (12, "T|"));
    }

    #[test]
    fn signs_are_not_levels() {
        assert_eq!(split_level("-1T|"), (0, "-1T|"));
        assert_eq!(split_level("+2T|"), (0, "+2T|"));
    }

    #[test]
    fn indentation_levels() {
        assert_eq!(split_level("T\ta|x|\t"), (0, "T\ta|x|\t"));
        assert_eq!(split_level("   T|"), (3, "T|"));
        assert_eq!(split_level(""), (0, ""));
    }

    #[test]
    fn tile_refs() {
        assert_eq!(
            TileRef::parse(" T "),
            Some(TileRef {
                name: "T".to_string(),
                value: None
            })
        );
        let r = TileRef::parse("T:Main").expect("tile ref");
        assert_eq!(r.value.as_deref(), Some("Main"));
        assert_eq!(r.to_string(), "T:Main");
        assert_eq!(TileRef::parse("  "), None);
    }

    #[test]
    fn comments() {
        assert!(is_comment("! note"));
        assert!(!is_comment(" ! indented"));
    }
}
