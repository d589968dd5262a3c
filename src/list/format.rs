//! Format tags: the bracketed prefix that types an element's description.
//!
//! Tag grammar (brackets already stripped by the caller, or not):
//! `TypeChar [Digits] ['=' Literal]`
//!
//! Type characters:
//! - `#` number, `I` integer, `$` dollar amount, `O` ordinal, `R` range
//! - `P` pair, `A` number array (digits cap the length)
//! - `%` string (digits cap the length), `U` uppercase string
//! - `@ListName` member of another registered list
//! - `{a,b,c}` one of a fixed set
//!
//! Nothing here fails hard: a bad tag or bad value leaves an error string on
//! the [`Value`] and keeps the raw text around.

use crate::list::consts::{FORMAT_END, FORMAT_START, parse_number};
use crate::registry::{ListId, ListLookup};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormatType {
    Number,
    Integer,
    Dollar,
    Ordinal,
    Range,
    Pair,
    NumberArray,
    ListMember,
    Set,
    String,
    LimitedString,
    Uppercase,
}

impl FormatType {
    /// Map a tag's type character. `%` is a limited string only when a size
    /// limit follows it.
    pub fn from_type_char(ch: char, has_limit: bool) -> Option<Self> {
        let ty = match ch.to_ascii_uppercase() {
            '#' => Self::Number,
            'I' => Self::Integer,
            '$' => Self::Dollar,
            'P' => Self::Pair,
            'O' => Self::Ordinal,
            'A' => Self::NumberArray,
            '%' if has_limit => Self::LimitedString,
            '%' => Self::String,
            'U' => Self::Uppercase,
            '@' => Self::ListMember,
            'R' => Self::Range,
            '{' => Self::Set,
            _ => return None,
        };
        Some(ty)
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Number
                | Self::Integer
                | Self::Dollar
                | Self::Ordinal
                | Self::Range
                | Self::Pair
                | Self::NumberArray
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValueData {
    Numbers(Vec<f64>),
    Strings(Vec<String>),
}

/// Parsed value of a formatted element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Value {
    pub data: ValueData,
    pub error: Option<String>,
}

impl Value {
    fn strings(s: &str) -> Self {
        Self {
            data: ValueData::Strings(vec![s.to_string()]),
            error: None,
        }
    }

    fn numbers(nums: Vec<f64>) -> Self {
        Self {
            data: ValueData::Numbers(nums),
            error: None,
        }
    }

    /// The number, when exactly one is held.
    pub fn number(&self) -> Option<f64> {
        match &self.data {
            ValueData::Numbers(n) if n.len() == 1 => Some(n[0]),
            _ => None,
        }
    }

    /// The string, when exactly one is held.
    pub fn string(&self) -> Option<&str> {
        match &self.data {
            ValueData::Strings(s) if s.len() == 1 => Some(s[0].as_str()),
            _ => None,
        }
    }

    pub fn numbers_slice(&self) -> &[f64] {
        match &self.data {
            ValueData::Numbers(n) => n,
            ValueData::Strings(_) => &[],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueFormat {
    type_char: char,
    format_type: Option<FormatType>,
    size_limit: Option<u32>,
    literal: Option<String>,
    // Tag text without brackets or literal, kept for canonical rendering.
    body: String,
    // Set body wrapped in commas, or the member list's name.
    detail: String,
    member_list: Option<ListId>,
    value: Value,
}

impl ValueFormat {
    /// Parse `tag` and interpret `description` (or the tag's literal, when
    /// one is given) as this format's value.
    ///
    /// `lists` resolves `@ListName` members. Without it the member stays
    /// unresolved and no error is recorded; see [`ValueFormat::resolve`].
    pub fn parse(tag: &str, description: &str, lists: Option<&dyn ListLookup>) -> Self {
        let inner = tag.strip_prefix(FORMAT_START).unwrap_or(tag);
        let inner = inner.strip_suffix(FORMAT_END).unwrap_or(inner);

        let mut chars = inner.char_indices();
        let Some((_, type_char)) = chars.next() else {
            return Self::invalid(inner, ' ', description, "empty format tag".to_string());
        };

        // '=' after the type char introduces a literal value override.
        let (body, literal) = match chars.find(|&(_, c)| c == '=') {
            Some((i, _)) => (&inner[..i], Some(inner[i + 1..].to_string())),
            None => (inner, None),
        };
        let rest = &body[type_char.len_utf8()..];

        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        let size_limit = if digits.is_empty() {
            None
        } else {
            digits.parse::<u32>().ok()
        };

        let Some(format_type) = FormatType::from_type_char(type_char, size_limit.is_some()) else {
            return Self::invalid(
                body,
                type_char,
                literal.as_deref().unwrap_or(description),
                format!("unknown format type '{type_char}' in tag [{body}]"),
            )
            .with_literal(literal);
        };

        let (size_limit, detail) = match format_type {
            FormatType::ListMember => (None, rest.trim().to_string()),
            FormatType::Set => {
                let body = rest.strip_suffix('}').unwrap_or(rest);
                (None, format!(",{body},"))
            }
            _ => (size_limit, String::new()),
        };

        let mut fmt = Self {
            type_char: type_char.to_ascii_uppercase(),
            format_type: Some(format_type),
            size_limit,
            body: body.to_string(),
            detail,
            member_list: None,
            value: Value::strings(""),
            literal,
        };
        let source = fmt.literal.clone().unwrap_or_else(|| description.to_string());
        fmt.value = fmt.parse_value(&source, lists);
        fmt
    }

    fn invalid(body: &str, type_char: char, raw: &str, error: String) -> Self {
        tracing::debug!(%error, "format tag rejected");
        let mut value = Value::strings(raw);
        value.error = Some(error);
        Self {
            type_char,
            format_type: None,
            size_limit: None,
            literal: None,
            body: body.to_string(),
            detail: String::new(),
            member_list: None,
            value,
        }
    }

    fn with_literal(mut self, literal: Option<String>) -> Self {
        self.literal = literal;
        self
    }

    fn parse_value(&mut self, text: &str, lists: Option<&dyn ListLookup>) -> Value {
        let Some(ty) = self.format_type else {
            return Value::strings(text);
        };

        match ty {
            FormatType::Number | FormatType::Range => Value::numbers(vec![parse_number(text)]),
            FormatType::Integer => {
                let n = parse_number(text);
                let mut v = Value::numbers(vec![n]);
                if !n.is_nan() && n.fract() != 0.0 {
                    v.error = Some(format!("{text} is not an integer"));
                }
                v
            }
            FormatType::Dollar => {
                let t = text.trim();
                let t = t.strip_prefix('$').unwrap_or(t);
                let mut v = Value::numbers(vec![parse_number(t)]);
                if t.split_once('.').is_some_and(|(_, cents)| cents.len() > 2) {
                    v.error = Some(format!("{text} has more than two cent digits"));
                }
                v
            }
            FormatType::Ordinal => {
                let n = parse_number(text);
                let mut v = Value::numbers(vec![n]);
                if !n.is_nan() && (n < 0.0 || n.fract() != 0.0) {
                    v.error = Some(format!("{text} is not an ordinal"));
                } else if let Some(limit) = self.size_limit {
                    if n > f64::from(limit) {
                        v.error = Some(format!("{text} exceeds ordinal limit {limit}"));
                    }
                }
                v
            }
            FormatType::Pair | FormatType::NumberArray => {
                let nums: Vec<f64> = if text.trim().is_empty() {
                    Vec::new()
                } else {
                    text.split(',').map(parse_number).collect()
                };
                let count = nums.len();
                let mut v = Value::numbers(nums);
                if ty == FormatType::Pair && count != 2 {
                    v.error = Some(format!("pair needs 2 numbers, found {count}"));
                } else if let Some(limit) = self.size_limit {
                    if ty == FormatType::NumberArray && count > limit as usize {
                        v.error = Some(format!("{count} numbers exceed array limit {limit}"));
                    }
                }
                v
            }
            FormatType::ListMember => {
                let mut v = Value::strings(text);
                if let Some(lists) = lists {
                    v.error = self.resolve_member(text, lists);
                }
                v
            }
            FormatType::Set => {
                let mut v = Value::strings(text);
                if !text.is_empty() && !self.contains(text) {
                    v.error = Some(format!("{text} is not one of {{{}}}", self.set_body()));
                }
                v
            }
            FormatType::String | FormatType::Uppercase => Value::strings(text),
            FormatType::LimitedString => {
                let mut v = Value::strings(text);
                if let Some(limit) = self.size_limit {
                    let len = text.chars().count();
                    if len > limit as usize {
                        v.error = Some(format!("{len} characters exceed limit {limit}"));
                    }
                }
                v
            }
        }
    }

    // Resolves and caches the member list; returns the error to record.
    fn resolve_member(&mut self, member: &str, lists: &dyn ListLookup) -> Option<String> {
        match lists.list_by_name(&self.detail) {
            Some((id, list)) => {
                self.member_list = Some(id);
                if !member.is_empty() && list.id_of(member) == 0 {
                    Some(format!("{member} is not a member of {}", self.detail))
                } else {
                    None
                }
            }
            None => Some(format!("{} = Bad List Name", self.detail)),
        }
    }

    /// Resolve a deferred `@ListName` member against `lists`.
    ///
    /// Returns the cached list id; repeated calls do not look up again.
    pub fn resolve(&mut self, lists: &dyn ListLookup) -> Option<ListId> {
        if self.format_type != Some(FormatType::ListMember) || self.member_list.is_some() {
            return self.member_list;
        }
        let member = self.value.string().unwrap_or_default().to_string();
        self.value.error = self.resolve_member(&member, lists);
        self.member_list
    }

    /// Set membership: `member` must appear as `,member,` in the set body.
    pub fn contains(&self, member: &str) -> bool {
        self.format_type == Some(FormatType::Set) && self.detail.contains(&format!(",{member},"))
    }

    fn set_body(&self) -> &str {
        let d = self.detail.strip_prefix(',').unwrap_or(&self.detail);
        d.strip_suffix(',').unwrap_or(d)
    }

    /// Canonical `[...]` rendering of the tag.
    pub fn to_tag(&self) -> String {
        let mut tag = String::new();
        tag.push(FORMAT_START);
        tag.push_str(&self.body);
        if let Some(lit) = &self.literal {
            tag.push('=');
            tag.push_str(lit);
        }
        tag.push(FORMAT_END);
        tag
    }

    pub fn format_type(&self) -> Option<FormatType> {
        self.format_type
    }

    pub fn type_char(&self) -> char {
        self.type_char
    }

    pub fn size_limit(&self) -> Option<u32> {
        self.size_limit
    }

    pub fn literal(&self) -> Option<&str> {
        self.literal.as_deref()
    }

    /// Name of the list a `@ListName` member refers to.
    pub fn member_list_name(&self) -> Option<&str> {
        (self.format_type == Some(FormatType::ListMember)).then_some(self.detail.as_str())
    }

    pub fn member_list(&self) -> Option<ListId> {
        self.member_list
    }

    /// Set body as stored, wrapped in commas.
    pub fn set_members(&self) -> Option<&str> {
        (self.format_type == Some(FormatType::Set)).then_some(self.detail.as_str())
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn error(&self) -> Option<&str> {
        self.value.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::DelimitedList;
    use pretty_assertions::assert_eq;

    struct OneList(DelimitedList);

    impl ListLookup for OneList {
        fn list_by_name(&self, name: &str) -> Option<(ListId, &DelimitedList)> {
            (self.0.name() == name).then_some((ListId(7), &self.0))
        }
    }

    #[test]
    fn number_tag() {
        let f = ValueFormat::parse("#", "12.5", None);
        assert_eq!(f.format_type(), Some(FormatType::Number));
        assert_eq!(f.value().number(), Some(12.5));
        assert!(f.error().is_none());
    }

    #[test]
    fn malformed_number_is_nan_not_error() {
        let f = ValueFormat::parse("[#]", "twelve", None);
        assert!(f.value().number().is_some_and(f64::is_nan));
        assert!(f.error().is_none());
    }

    #[test]
    fn lowercase_type_char_is_accepted() {
        let f = ValueFormat::parse("i", "4", None);
        assert_eq!(f.format_type(), Some(FormatType::Integer));
        assert_eq!(f.type_char(), 'I');
    }

    #[test]
    fn literal_overrides_description() {
        let f = ValueFormat::parse("#=42", "ignored", None);
        assert_eq!(f.literal(), Some("42"));
        assert_eq!(f.value().number(), Some(42.0));
        assert_eq!(f.to_tag(), "[#=42]");
    }

    #[test]
    fn pair_accumulates_both_numbers() {
        let f = ValueFormat::parse("P", "3,4", None);
        assert_eq!(f.value().numbers_slice(), &[3.0, 4.0]);
        assert!(f.error().is_none());

        let bad = ValueFormat::parse("P", "3", None);
        assert_eq!(bad.value().numbers_slice(), &[3.0]);
        assert!(bad.error().is_some());
    }

    #[test]
    fn number_array_keeps_order_and_limit() {
        let f = ValueFormat::parse("A3", "5,1,4", None);
        assert_eq!(f.size_limit(), Some(3));
        assert_eq!(f.value().numbers_slice(), &[5.0, 1.0, 4.0]);
        assert!(f.error().is_none());

        let over = ValueFormat::parse("A2", "5,1,4", None);
        assert_eq!(over.value().numbers_slice().len(), 3);
        assert!(over.error().is_some());
    }

    #[test]
    fn limited_string() {
        let f = ValueFormat::parse("%12", "First Name", None);
        assert_eq!(f.format_type(), Some(FormatType::LimitedString));
        assert_eq!(f.value().string(), Some("First Name"));
        assert!(f.error().is_none());

        let long = ValueFormat::parse("%3", "abcdef", None);
        assert_eq!(long.value().string(), Some("abcdef"));
        assert!(long.error().is_some());

        let plain = ValueFormat::parse("%", "anything", None);
        assert_eq!(plain.format_type(), Some(FormatType::String));
    }

    #[test]
    fn uppercase_is_verbatim() {
        let f = ValueFormat::parse("U", "mixed Case", None);
        assert_eq!(f.value().string(), Some("mixed Case"));
    }

    #[test]
    fn set_membership_uses_wrapped_body() {
        let f = ValueFormat::parse("{red,green,blue}", "green", None);
        assert_eq!(f.set_members(), Some(",red,green,blue,"));
        assert!(f.contains("red"));
        assert!(!f.contains("re"));
        assert!(f.error().is_none());
        assert_eq!(f.to_tag(), "[{red,green,blue}]");

        let miss = ValueFormat::parse("{red,green}", "pink", None);
        assert!(miss.error().is_some());
    }

    #[test]
    fn unknown_type_fails_soft() {
        let f = ValueFormat::parse("Z9", "raw text", None);
        assert_eq!(f.format_type(), None);
        assert_eq!(f.value().string(), Some("raw text"));
        assert!(f.error().is_some_and(|e| e.contains('Z')));
    }

    #[test]
    fn member_resolves_and_caches() {
        let lists = OneList(DelimitedList::new("Ev:Event|Click|Enter|Exit|"));
        let f = ValueFormat::parse("@Ev", "Enter", Some(&lists));
        assert_eq!(f.member_list_name(), Some("Ev"));
        assert_eq!(f.member_list(), Some(ListId(7)));
        assert!(f.error().is_none());

        let bad_member = ValueFormat::parse("@Ev", "Hover", Some(&lists));
        assert!(bad_member.error().is_some());

        let bad_list = ValueFormat::parse("@Nope", "Enter", Some(&lists));
        assert_eq!(bad_list.member_list(), None);
        assert_eq!(bad_list.error(), Some("Nope = Bad List Name"));
    }

    #[test]
    fn member_without_lookup_defers() {
        let lists = OneList(DelimitedList::new("Ev:Event|Click|Enter|Exit|"));
        let mut f = ValueFormat::parse("@Ev", "Exit", None);
        assert!(f.error().is_none());
        assert_eq!(f.member_list(), None);
        assert_eq!(f.resolve(&lists), Some(ListId(7)));
        assert!(f.error().is_none());
    }

    #[test]
    fn ordinal_limit() {
        let f = ValueFormat::parse("O5", "3", None);
        assert!(f.error().is_none());
        let over = ValueFormat::parse("O5", "9", None);
        assert!(over.error().is_some());
        let neg = ValueFormat::parse("O", "-1", None);
        assert!(neg.error().is_some());
    }

    #[test]
    fn dollar_strips_sign() {
        let f = ValueFormat::parse("$", "$12.50", None);
        assert_eq!(f.value().number(), Some(12.5));
        assert!(f.error().is_none());
    }
}
