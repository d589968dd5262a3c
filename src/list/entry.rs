//! A single named element, materialized from a list on demand.

use crate::list::consts::{FORMAT_END, FORMAT_START, NAME_DELIM, is_numeric_text, parse_number};
use crate::list::delimited::DelimitedList;
use crate::list::format::ValueFormat;
use crate::registry::ListLookup;

/// Transient view of one element. The ordinal ID is never stored: it is
/// asked of the owning list every time, so a stale entry cannot carry a
/// stale ID.
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    name: String,
    description: String,
    list: Option<&'a DelimitedList>,
    numeric_values: Vec<f64>,
    format: Option<ValueFormat>,
}

impl<'a> Entry<'a> {
    pub(crate) fn parse(
        name: &str,
        description: &str,
        list: Option<&'a DelimitedList>,
        lists: Option<&dyn ListLookup>,
    ) -> Self {
        let mut desc = if description.is_empty() {
            name
        } else {
            description
        };

        let mut format = None;
        if desc.starts_with(FORMAT_START) {
            if let Some(end) = desc.find(FORMAT_END) {
                let rest = &desc[end + FORMAT_END.len_utf8()..];
                format = Some(ValueFormat::parse(&desc[1..end], rest, lists));
                desc = rest;
            }
        }

        let numeric_values = if is_numeric_text(desc) {
            desc.split(',').map(parse_number).collect()
        } else {
            Vec::new()
        };

        Self {
            name: name.to_string(),
            description: desc.to_string(),
            list,
            numeric_values,
            format,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description with any format tag removed. Equals the name when the
    /// element was written without one.
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn format(&self) -> Option<&ValueFormat> {
        self.format.as_ref()
    }

    pub fn format_mut(&mut self) -> Option<&mut ValueFormat> {
        self.format.as_mut()
    }

    pub fn numeric_values(&self) -> &[f64] {
        &self.numeric_values
    }

    /// The single numeric value, if the description holds exactly one.
    pub fn value(&self) -> Option<f64> {
        match self.numeric_values.as_slice() {
            [v] => Some(*v),
            _ => None,
        }
    }

    pub fn list(&self) -> Option<&'a DelimitedList> {
        self.list
    }

    /// 1-based ordinal in the owning list, 0 when detached or absent.
    pub fn id(&self) -> u32 {
        self.list.map_or(0, |l| l.id_of(&self.name))
    }

    /// `Desc` alone, or `Desc<delim>Name:ID` when a delimiter is given.
    pub fn to_line(&self, delim: Option<char>) -> String {
        match delim {
            Some(d) => format!("{}{d}{}{NAME_DELIM}{}", self.description, self.name, self.id()),
            None => self.description.clone(),
        }
    }

    /// Canonical element text: `Name`, or `Name:[fmt]Desc`.
    pub fn to_element_string(&self) -> String {
        let tag = self.format.as_ref().map(ValueFormat::to_tag);
        if tag.is_none() && (self.description.is_empty() || self.description == self.name) {
            return self.name.clone();
        }
        format!(
            "{}{NAME_DELIM}{}{}",
            self.name,
            tag.unwrap_or_default(),
            self.description
        )
    }

    /// `[fmt]Name:ID`, the machine-readable half of a selection row.
    pub fn to_extra_string(&self) -> String {
        let tag = self.format.as_ref().map(ValueFormat::to_tag).unwrap_or_default();
        format!("{tag}{}{NAME_DELIM}{}", self.name, self.id())
    }

    /// `PrefixName = ID`, one line of a constants table.
    pub fn to_declaration(&self, prefix: &str) -> String {
        format!("{prefix}{} = {}", self.name, self.id())
    }

    /// Same name and owner, new description (re-parsed, format and all).
    pub fn with_description(&self, description: &str) -> Self {
        Self::parse(&self.name, description, self.list, None)
    }
}

impl Entry<'static> {
    /// An entry not tied to any list, e.g. to hand to
    /// [`DelimitedList::update`].
    pub fn detached(name: &str, description: &str) -> Self {
        Self::parse(name, description, None, None)
    }
}

impl Entry<'_> {
    /// Drop the back-reference so the entry can outlive a borrow of its list.
    pub fn detach(&self) -> Entry<'static> {
        Entry {
            name: self.name.clone(),
            description: self.description.clone(),
            list: None,
            numeric_values: self.numeric_values.clone(),
            format: self.format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::format::FormatType;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_name_describes_itself() {
        let e = Entry::detached("Data", "");
        assert_eq!(e.description(), "Data");
        assert_eq!(e.to_element_string(), "Data");
        assert_eq!(e.id(), 0);
    }

    #[test]
    fn numeric_descriptions_fill_values() {
        let e = Entry::detached("Height", "23");
        assert_eq!(e.value(), Some(23.0));

        let many = Entry::detached("XY", "3, 4,5");
        assert_eq!(many.numeric_values(), &[3.0, 4.0, 5.0]);
        assert_eq!(many.value(), None);

        let text = Entry::detached("Color", "Blue");
        assert!(text.numeric_values().is_empty());
    }

    #[test]
    fn reference_element_value_is_its_name() {
        let e = Entry::detached("5", "");
        assert_eq!(e.description(), "5");
        assert_eq!(e.value(), Some(5.0));
    }

    #[test]
    fn format_tag_is_stripped() {
        let e = Entry::detached("Cost", "[$]12.75");
        assert_eq!(e.description(), "12.75");
        let fmt = e.format().expect("format parsed");
        assert_eq!(fmt.format_type(), Some(FormatType::Dollar));
        assert_eq!(fmt.value().number(), Some(12.75));
        assert_eq!(e.to_element_string(), "Cost:[$]12.75");
        assert_eq!(e.to_extra_string(), "[$]Cost:0");
    }

    #[test]
    fn unclosed_tag_is_plain_text() {
        let e = Entry::detached("Odd", "[#12");
        assert!(e.format().is_none());
        assert_eq!(e.description(), "[#12");
    }

    #[test]
    fn to_line_with_and_without_delimiter() {
        let list = DelimitedList::new("Ct:ConnectType|Data|Event|Action|Queue|DB|SQL:SQLite|");
        let e = list.by_name("SQL").expect("SQL present");
        assert_eq!(e.to_line(None), "SQLite");
        assert_eq!(e.to_line(Some('|')), "SQLite|SQL:6");
        assert_eq!(e.to_declaration("CT_"), "CT_SQL = 6");
    }

    #[test]
    fn round_trip_through_element_text() {
        let e = Entry::detached("X", "Y");
        let text = e.to_element_string();
        let (name, desc) = text.split_once(NAME_DELIM).expect("separator");
        let back = Entry::detached(name, desc);
        assert_eq!(back.name(), "X");
        assert_eq!(back.description(), "Y");
    }
}
