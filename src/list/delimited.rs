//! The delimited list: one string, indexed in place.
//!
//! ```text
//! Ct:ConnectType|Data|Event|Action|Queue|DB|SQL:SQLite|Remote|Retail|
//! ^^ ^^^^^^^^^^^ ^^^^                       ^^^ ^^^^^^
//! name  desc     element 1                  element 6 (name:desc)
//! ```
//!
//! The trailing character is the delimiter. Elements are found by substring
//! search, not by splitting into a map: the raw string stays the only copy
//! of the data, and a compact `|Name:ID|` index string answers ordinal
//! questions. Every mutation rebuilds the whole list from the edited string
//! and swaps it in.

use crate::list::consts::{
    LINE_DELIM, NAME_DELIM, SECOND_DELIM, FORMAT_END, FORMAT_START, is_delimiter_like,
    is_digit_like, parse_number,
};
use crate::list::entry::Entry;
use crate::registry::ListLookup;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ListKind {
    /// Not initialized: no delimiter could be found.
    #[default]
    None,
    /// Named elements.
    Std,
    /// Elements are ordinals into another list.
    IdRef,
    /// Built from several bodies joined by the secondary delimiter.
    Pack,
}

/// What a [`DelimitedList::merge`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub replaced: usize,
    pub appended: usize,
}

impl MergeOutcome {
    pub fn changed(&self) -> bool {
        self.replaced + self.appended > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DelimitedList {
    raw: String,
    delimiter: char,
    // Byte offset of the delimiter that ends the header.
    first_delim: usize,
    name: String,
    description: String,
    kind: ListKind,
    ids: Vec<u32>,
    name_index: String,
    count: usize,
    children: Vec<DelimitedList>,
}

impl Default for DelimitedList {
    fn default() -> Self {
        Self {
            raw: String::new(),
            delimiter: crate::list::consts::PRIME_DELIM,
            first_delim: 0,
            name: String::new(),
            description: String::new(),
            kind: ListKind::None,
            ids: Vec::new(),
            name_index: String::new(),
            count: 0,
            children: Vec::new(),
        }
    }
}

impl DelimitedList {
    /// Parse `text`. Never fails: text without any delimiter-like character
    /// yields an empty list with [`ListKind::None`].
    pub fn new(text: &str) -> Self {
        match choose_delimiter(text) {
            Some((raw, delim)) => Self::build(raw, delim),
            None => {
                tracing::debug!(text, "no delimiter found, list left empty");
                Self::default()
            }
        }
    }

    /// Join `bodies` under `name` with the secondary delimiter, one nested
    /// sub-list per body.
    pub fn pack<S: AsRef<str>>(name: &str, bodies: &[S]) -> Self {
        let mut text = String::from(name);
        text.push(SECOND_DELIM);
        for body in bodies {
            text.push_str(body.as_ref());
            text.push(SECOND_DELIM);
        }
        let mut list = Self::new(&text);
        if list.is_valid() {
            list.kind = ListKind::Pack;
        }
        list
    }

    // `raw` must end with `delim`.
    fn build(raw: String, delim: char) -> Self {
        let children = parse_children(&raw);

        let first_delim = raw.find(delim).unwrap_or(raw.len() - delim.len_utf8());
        let header = raw[..first_delim].trim_start();
        let (name, description) = match header.split_once(NAME_DELIM) {
            Some((n, d)) => (n.to_string(), d.to_string()),
            None => (header.to_string(), header.to_string()),
        };

        let mut list = Self {
            raw,
            delimiter: delim,
            first_delim,
            name,
            description,
            kind: ListKind::Std,
            ids: Vec::new(),
            name_index: String::new(),
            count: 0,
            children,
        };

        let first_char = list.raw[first_delim + delim.len_utf8()..].chars().next();
        if first_char.is_some_and(is_digit_like) {
            list.kind = ListKind::IdRef;
            list.ids = list
                .raw_elements()
                .map(|tok| tok.trim().parse::<u32>().unwrap_or(0))
                .collect();
        }

        list.rebuild_index();
        list
    }

    // Rebuild from edited text, keeping the delimiter and the Pack marker.
    fn rebuilt(&self, raw: String) -> Self {
        let mut list = Self::build(raw, self.delimiter);
        if self.kind == ListKind::Pack {
            list.kind = ListKind::Pack;
        }
        list
    }

    fn rebuild_index(&mut self) {
        let d = self.delimiter;
        let mut index = String::new();
        index.push(d);
        let mut ordinal = 0usize;
        for element in self.raw_elements() {
            let name = element.split_once(NAME_DELIM).map_or(element, |(n, _)| n);
            ordinal += 1;
            index.push_str(name);
            index.push(NAME_DELIM);
            index.push_str(&ordinal.to_string());
            index.push(d);
        }
        self.name_index = index;
        self.count = ordinal;
    }

    pub fn is_valid(&self) -> bool {
        self.kind != ListKind::None
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn ordinal_count(&self) -> usize {
        self.count
    }

    /// Ordinals held by a reference list; empty for other kinds.
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// The cached `|Name:ID|` index.
    pub fn name_index(&self) -> &str {
        &self.name_index
    }

    pub fn children(&self) -> &[DelimitedList] {
        &self.children
    }

    /// First nested sub-list whose header name is `name`.
    pub fn child(&self, name: &str) -> Option<&DelimitedList> {
        self.children.iter().find(|c| c.name == name)
    }

    fn header(&self) -> &str {
        &self.raw[..self.first_delim]
    }

    /// Element texts after the header, in order.
    pub fn raw_elements(&self) -> impl Iterator<Item = &str> {
        let d = self.delimiter;
        let body = if self.raw.is_empty() {
            ""
        } else {
            &self.raw[self.first_delim + d.len_utf8()..]
        };
        body.strip_suffix(d)
            .into_iter()
            .flat_map(move |b| b.split(d))
    }

    // Byte span of the element called `name`, delimiters excluded.
    fn find_element(&self, name: &str) -> Option<(usize, usize)> {
        if !self.is_valid() || name.contains(self.delimiter) || name.contains(NAME_DELIM) {
            return None;
        }
        let d = self.delimiter;
        let search = &self.raw[self.first_delim..];
        let described = search.find(&format!("{d}{name}{NAME_DELIM}"));
        let bare = search.find(&format!("{d}{name}{d}"));
        let pos = match (described, bare) {
            (Some(a), Some(b)) => a.min(b),
            (a, b) => a.or(b)?,
        };
        let start = self.first_delim + pos + d.len_utf8();
        let end = start + self.raw[start..].find(d)?;
        Some((start, end))
    }

    fn element_at(&self, name: &str) -> Option<(&str, &str)> {
        let (start, end) = self.find_element(name)?;
        let text = &self.raw[start..end];
        Some(text.split_once(NAME_DELIM).unwrap_or((text, "")))
    }

    /// Materialize the element called `name`.
    pub fn by_name(&self, name: &str) -> Option<Entry<'_>> {
        self.by_name_with(name, None)
    }

    /// Like [`by_name`](Self::by_name), resolving `@ListName` formats
    /// against `lists`.
    pub fn by_name_with(&self, name: &str, lists: Option<&dyn ListLookup>) -> Option<Entry<'_>> {
        let (n, desc) = self.element_at(name)?;
        Some(Entry::parse(n, desc, Some(self), lists))
    }

    /// Materialize the element at 1-based `ordinal`.
    pub fn by_id(&self, ordinal: u32) -> Option<Entry<'_>> {
        let name = self.name_of(ordinal);
        if name.is_empty() {
            return None;
        }
        self.by_name(name)
    }

    /// Ordinal of the first element called `name`, or 0.
    pub fn id_of(&self, name: &str) -> u32 {
        let d = self.delimiter;
        if name.contains(d) || name.contains(NAME_DELIM) {
            return 0;
        }
        let key = format!("{d}{name}{NAME_DELIM}");
        let Some(pos) = self.name_index.find(&key) else {
            return 0;
        };
        let digits = &self.name_index[pos + key.len()..];
        let digits = digits.split(d).next().unwrap_or_default();
        digits.parse().unwrap_or(0)
    }

    /// Name of the element at 1-based `ordinal`, or "".
    pub fn name_of(&self, ordinal: u32) -> &str {
        if ordinal == 0 || ordinal as usize > self.count {
            return "";
        }
        let d = self.delimiter;
        let key = format!("{NAME_DELIM}{ordinal}{d}");
        let Some(pos) = self.name_index.find(&key) else {
            return "";
        };
        let head = &self.name_index[..pos];
        match head.rfind(d) {
            Some(start) => &head[start + d.len_utf8()..],
            None => "",
        }
    }

    /// Description text as stored, format tag included. A bare element
    /// describes itself.
    pub fn describe(&self, name: &str) -> Option<&str> {
        let (n, desc) = self.element_at(name)?;
        Some(if desc.is_empty() { n } else { desc })
    }

    /// Description with a leading `[...]` tag removed.
    pub fn raw_value_after_format(&self, name: &str) -> Option<&str> {
        let desc = self.describe(name)?;
        if desc.starts_with(FORMAT_START) {
            if let Some(end) = desc.find(FORMAT_END) {
                return Some(&desc[end + FORMAT_END.len_utf8()..]);
            }
        }
        Some(desc)
    }

    /// Numeric reading of the value; `NaN` when the text is not a number.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.raw_value_after_format(name).map(parse_number)
    }

    /// Entries for `ordinals` (all, 1..=count, when `None`), skipping misses.
    pub fn entries(&self, ordinals: Option<&[u32]>) -> Vec<Entry<'_>> {
        match ordinals {
            Some(ids) => ids.iter().filter_map(|&id| self.by_id(id)).collect(),
            None => (1..=self.count as u32).filter_map(|id| self.by_id(id)).collect(),
        }
    }

    /// All entries ordered by description.
    pub fn sorted_entries(&self) -> Vec<Entry<'_>> {
        let mut entries = self.entries(None);
        entries.sort_by(|a, b| a.description().cmp(b.description()));
        entries
    }

    /// One `ToLine` rendering per ordinal; misses render as "".
    pub fn lines(&self, ordinals: &[u32], delim: Option<char>) -> Vec<String> {
        ordinals
            .iter()
            .map(|&id| self.by_id(id).map(|e| e.to_line(delim)).unwrap_or_default())
            .collect()
    }

    pub fn line(&self, name: &str, delim: Option<char>) -> String {
        self.by_name(name)
            .map(|e| e.to_line(delim))
            .unwrap_or_default()
    }

    /// Replace the element named like `entry` with its canonical text, or
    /// remove it when `delete` is set. Returns false when nothing matched or
    /// the new text would contain the delimiter.
    pub fn update(&mut self, entry: &Entry<'_>, delete: bool) -> bool {
        let Some((start, end)) = self.find_element(entry.name()) else {
            return false;
        };

        let d = self.delimiter;
        let edited = if delete {
            format!("{}{}", &self.raw[..start], &self.raw[end + d.len_utf8()..])
        } else {
            let text = entry.to_element_string();
            if text.contains(d) {
                tracing::debug!(element = %text, "replacement contains the delimiter");
                return false;
            }
            format!("{}{}{}", &self.raw[..start], text, &self.raw[end..])
        };

        *self = self.rebuilt(edited);
        true
    }

    /// Fold `other`'s elements into this list.
    ///
    /// A same-named element is replaced when `other`'s copy has a
    /// description, or when ours is bare. Unmatched elements are appended.
    pub fn merge(&mut self, other: &DelimitedList) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        if !self.is_valid() || !other.is_valid() {
            return outcome;
        }

        let d = self.delimiter;
        let mut elements: Vec<String> = self.raw_elements().map(str::to_string).collect();

        for add in other.raw_elements() {
            if add.contains(d) {
                tracing::debug!(element = add, "skipping element containing our delimiter");
                continue;
            }
            let (name, replacer) = match add.split_once(NAME_DELIM) {
                Some((n, _)) => (n, true),
                None => (add, false),
            };
            let described = format!("{name}{NAME_DELIM}");

            match elements
                .iter_mut()
                .find(|e| e.as_str() == name || e.starts_with(&described))
            {
                Some(existing) => {
                    if (replacer || existing.as_str() == name) && existing.as_str() != add {
                        *existing = add.to_string();
                        outcome.replaced += 1;
                    }
                }
                None => {
                    elements.push(add.to_string());
                    outcome.appended += 1;
                }
            }
        }

        if outcome.changed() {
            let mut text = String::from(self.header());
            text.push(d);
            for e in &elements {
                text.push_str(e);
                text.push(d);
            }
            *self = self.rebuilt(text);
        }
        outcome
    }

    /// Change the delimiter, rewriting every occurrence.
    ///
    /// Rejected (false, nothing changed) unless `new` is exactly one
    /// delimiter-like character that is not the current delimiter and not
    /// already in the text.
    pub fn set_delimiter(&mut self, new: &str) -> bool {
        let mut chars = new.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return false;
        };
        if !self.is_valid()
            || ch == self.delimiter
            || !is_delimiter_like(ch)
            || is_digit_like(ch)
            || matches!(ch, NAME_DELIM | FORMAT_START | FORMAT_END)
            || self.raw.contains(ch)
        {
            return false;
        }

        let raw = self.raw.replace(self.delimiter, &ch.to_string());
        let mut list = Self::build(raw, ch);
        if self.kind == ListKind::Pack {
            list.kind = ListKind::Pack;
        }
        *self = list;
        true
    }

    /// A reference list naming this list's elements at `ordinals`.
    pub fn to_reference_list(&self, ordinals: &[u32]) -> DelimitedList {
        if !self.is_valid() {
            return Self::default();
        }
        let d = self.delimiter;
        let mut text = self.name.clone();
        text.push(d);
        for id in ordinals {
            text.push_str(&id.to_string());
            text.push(d);
        }
        let mut list = Self::build(text, d);
        list.kind = ListKind::IdRef;
        list
    }

    /// Reference list from entries, by their IDs in this list.
    pub fn entries_to_reference_list(&self, entries: &[Entry<'_>]) -> DelimitedList {
        let ids: Vec<u32> = entries.iter().map(|e| self.id_of(e.name())).collect();
        self.to_reference_list(&ids)
    }

    /// Entries of this list that `refs` points at, in `refs` order.
    pub fn resolve_reference_list(&self, refs: &DelimitedList) -> Vec<Entry<'_>> {
        if refs.kind != ListKind::IdRef {
            return Vec::new();
        }
        refs.ids.iter().filter_map(|&id| self.by_id(id)).collect()
    }
}

impl fmt::Display for DelimitedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// Use a delimiter-like trailing character as is; otherwise borrow the first
// delimiter-like character in the text and append it.
fn choose_delimiter(text: &str) -> Option<(String, char)> {
    let last = text.chars().last()?;
    if is_delimiter_like(last) {
        return Some((text.to_string(), last));
    }
    let delim = text.chars().find(|&c| is_delimiter_like(c))?;
    let mut raw = text.to_string();
    raw.push(delim);
    Some((raw, delim))
}

// Sub-lists: split on lines when present, otherwise on the secondary
// delimiter (skipping the head segment, which is the parent's own header).
fn parse_children(raw: &str) -> Vec<DelimitedList> {
    if !raw.contains(SECOND_DELIM) {
        return Vec::new();
    }
    let trimmed = raw.trim_end();
    let segments: Vec<&str> = if trimmed.contains(LINE_DELIM) {
        trimmed.split(LINE_DELIM).collect()
    } else {
        trimmed.split(SECOND_DELIM).skip(1).collect()
    };

    segments
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .map(DelimitedList::new)
        .filter(DelimitedList::is_valid)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONNECT: &str = "Ct:ConnectType|Data|Event|Action|Queue|DB|SQL:SQLite|Remote|Retail|";

    #[test]
    fn header_and_kind() {
        let l = DelimitedList::new(CONNECT);
        assert_eq!(l.name(), "Ct");
        assert_eq!(l.description(), "ConnectType");
        assert_eq!(l.delimiter(), '|');
        assert_eq!(l.kind(), ListKind::Std);
        assert_eq!(l.ordinal_count(), 8);
    }

    #[test]
    fn lookups_by_name_and_id() {
        let l = DelimitedList::new(CONNECT);
        assert_eq!(l.id_of("SQL"), 6);
        assert_eq!(l.name_of(6), "SQL");
        assert_eq!(l.describe("SQL"), Some("SQLite"));
        assert_eq!(l.describe("Data"), Some("Data"));
        assert_eq!(l.id_of("Nope"), 0);
        assert_eq!(l.name_of(0), "");
        assert_eq!(l.name_of(9), "");
        assert!(l.by_name("Nope").is_none());
        assert!(l.by_id(42).is_none());

        let e = l.by_id(3).expect("ordinal 3");
        assert_eq!(e.name(), "Action");
        assert_eq!(e.id(), 3);
    }

    #[test]
    fn names_with_a_terminator_never_match() {
        let l = DelimitedList::new(CONNECT);
        assert!(l.by_name("SQL:SQLite").is_none());
        assert_eq!(l.id_of("SQL:SQLite"), 0);
        assert_eq!(l.describe("SQL:"), None);
        assert_eq!(l.by_name("SQL").map(|e| e.id()), Some(6));
    }

    #[test]
    fn header_text_is_not_searched() {
        let l = DelimitedList::new("Data:Head|Other|");
        assert_eq!(l.id_of("Data"), 0);
        assert!(l.by_name("Data").is_none());
    }

    #[test]
    fn name_index_layout() {
        let l = DelimitedList::new("L|a:1st|b|c:x|");
        assert_eq!(l.name_index(), "|a:1|b:2|c:3|");
    }

    #[test]
    fn prefix_names_do_not_collide() {
        let l = DelimitedList::new("L|Top:T|TopLeft:TL|To|");
        assert_eq!(l.id_of("To"), 3);
        assert_eq!(l.describe("Top"), Some("T"));
        assert_eq!(l.describe("To"), Some("To"));
    }

    #[test]
    fn missing_trailing_delimiter_is_recovered() {
        let l = DelimitedList::new("Ev:Event|Click|Enter");
        assert_eq!(l.raw(), "Ev:Event|Click|Enter|");
        assert_eq!(l.ordinal_count(), 2);
        assert_eq!(l.id_of("Enter"), 2);
    }

    #[test]
    fn no_delimiter_leaves_list_empty() {
        let l = DelimitedList::new("just words");
        assert!(!l.is_valid());
        assert_eq!(l.kind(), ListKind::None);
        assert_eq!(l.ordinal_count(), 0);
        assert!(l.by_name("just").is_none());
        assert_eq!(l.id_of("just"), 0);

        assert!(!DelimitedList::new("").is_valid());
    }

    #[test]
    fn other_delimiters() {
        let l = DelimitedList::new("Cy~US:United States~UK:United Kingdom~");
        assert_eq!(l.delimiter(), '~');
        assert_eq!(l.describe("UK"), Some("United Kingdom"));
    }

    #[test]
    fn reference_list_parses_ordinals() {
        let l = DelimitedList::new("Ct|1|5|23|");
        assert_eq!(l.kind(), ListKind::IdRef);
        assert_eq!(l.ids(), &[1, 5, 23]);
        assert_eq!(l.ordinal_count(), 3);
        assert_eq!(l.name_of(2), "5");
        let e = l.by_id(2).expect("second ref");
        assert_eq!(e.description(), "5");
        assert_eq!(e.value(), Some(5.0));
    }

    #[test]
    fn reference_round_trip() {
        let l = DelimitedList::new(CONNECT);
        let refs = l.to_reference_list(&[1, 3]);
        assert_eq!(refs.raw(), "Ct|1|3|");
        assert_eq!(refs.kind(), ListKind::IdRef);
        let names: Vec<String> = l
            .resolve_reference_list(&refs)
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["Data", "Action"]);

        let entries = l.entries(Some(&[6, 2]));
        let again = l.entries_to_reference_list(&entries);
        assert_eq!(again.ids(), &[6, 2]);
    }

    #[test]
    fn resolving_a_std_list_yields_nothing() {
        let l = DelimitedList::new(CONNECT);
        assert!(l.resolve_reference_list(&l).is_empty());
    }

    #[test]
    fn update_replaces_description() {
        let mut l = DelimitedList::new(CONNECT);
        let e = l.by_name("Action").expect("Action").detach().with_description("ActionX");
        assert!(l.update(&e, false));
        assert_eq!(l.describe("Action"), Some("ActionX"));
        assert_eq!(l.ordinal_count(), 8);
        assert_eq!(l.id_of("Action"), 3);
    }

    #[test]
    fn update_last_and_delete() {
        let mut l = DelimitedList::new(CONNECT);
        assert!(l.update(&Entry::detached("Retail", "Shop"), false));
        assert!(l.raw().ends_with("|Retail:Shop|"));

        assert!(l.update(&Entry::detached("Event", ""), true));
        assert_eq!(l.ordinal_count(), 7);
        assert_eq!(l.id_of("Event"), 0);
        assert_eq!(l.id_of("Action"), 2);

        assert!(!l.update(&Entry::detached("Ghost", "x"), false));
    }

    #[test]
    fn update_rejects_delimiter_in_text() {
        let mut l = DelimitedList::new(CONNECT);
        let before = l.raw().to_string();
        assert!(!l.update(&Entry::detached("Data", "a|b"), false));
        assert_eq!(l.raw(), before);
    }

    #[test]
    fn merge_replaces_and_appends() {
        let mut l = DelimitedList::new("Lt:ListType|Dt:DataType|Ev:Event|Ac|");
        let other = DelimitedList::new("X|Ev|Ac:Action|Pr:Process|");
        let outcome = l.merge(&other);
        assert_eq!(outcome, MergeOutcome { replaced: 1, appended: 1 });
        assert_eq!(l.raw(), "Lt:ListType|Dt:DataType|Ev:Event|Ac:Action|Pr:Process|");
    }

    #[test]
    fn merge_with_self_is_idempotent() {
        let mut l = DelimitedList::new(CONNECT);
        let copy = l.clone();
        let outcome = l.merge(&copy);
        assert!(!outcome.changed());
        assert_eq!(l.raw(), CONNECT);
    }

    #[test]
    fn delimiter_change_rules() {
        let mut l = DelimitedList::new(CONNECT);
        assert!(!l.set_delimiter("5"));
        assert!(!l.set_delimiter("|"));
        assert!(!l.set_delimiter("-"));
        assert!(!l.set_delimiter("~~"));
        assert!(!l.set_delimiter(""));
        assert!(!l.set_delimiter(":"));
        assert!(!l.set_delimiter("x"));
        assert!(!l.set_delimiter(" "));
        assert_eq!(l.raw(), CONNECT);

        assert!(l.set_delimiter("~"));
        assert_eq!(l.delimiter(), '~');
        assert_eq!(l.raw(), CONNECT.replace('|', "~"));
        assert_eq!(l.id_of("SQL"), 6);

        let reread = DelimitedList::new(l.raw());
        assert!(reread.is_valid());
        assert_eq!(reread.id_of("SQL"), 6);
    }

    #[test]
    fn nested_sub_lists() {
        let l = DelimitedList::new("T\ta|name:Top|\ts|background:magenta|min-height:150px|\t");
        assert_eq!(l.delimiter(), '\t');
        assert_eq!(l.name(), "T");
        let names: Vec<&str> = l.children().iter().map(DelimitedList::name).collect();
        assert_eq!(names, vec!["a", "s"]);
        let style = l.child("s").expect("style list");
        assert_eq!(style.describe("min-height"), Some("150px"));
        assert_eq!(l.child("a").and_then(|a| a.describe("name")), Some("Top"));
    }

    #[test]
    fn line_delimited_children() {
        let text = "T\ta|name:Full|\t\n T\ta|name:Top|\t\n";
        let l = DelimitedList::new(text);
        assert_eq!(l.delimiter(), '\n');
        assert_eq!(l.children().len(), 2);
        assert_eq!(l.children()[1].children().len(), 1);
    }

    #[test]
    fn pack_marks_kind() {
        let l = DelimitedList::pack("Cfg", &["a|x:1|", "s|y:2|"]);
        assert_eq!(l.kind(), ListKind::Pack);
        assert_eq!(l.children().len(), 2);
        assert_eq!(l.child("s").and_then(|s| s.number("y")), Some(2.0));
    }

    #[test]
    fn formatted_values() {
        let l = DelimitedList::new("Test|NameF:[%12]First Name|XY:[P]3,4|Cost:[$]9.99|");
        assert_eq!(l.describe("Cost"), Some("[$]9.99"));
        assert_eq!(l.raw_value_after_format("Cost"), Some("9.99"));
        assert_eq!(l.number("Cost"), Some(9.99));
        assert!(l.number("NameF").is_some_and(f64::is_nan));
        let xy = l.by_name("XY").expect("XY");
        assert_eq!(xy.format().map(|f| f.value().numbers_slice().to_vec()), Some(vec![3.0, 4.0]));
    }

    #[test]
    fn sorted_entries_and_lines() {
        let l = DelimitedList::new("Lg:Language|En:English|Es:Espanol|Cn:Chinese|");
        let names: Vec<String> = l.sorted_entries().iter().map(|e| e.name().to_string()).collect();
        assert_eq!(names, vec!["Cn", "En", "Es"]);
        assert_eq!(l.lines(&[2, 9], Some('|')), vec!["Espanol|Es:2".to_string(), String::new()]);
        assert_eq!(l.line("Cn", None), "Chinese");
    }
}
