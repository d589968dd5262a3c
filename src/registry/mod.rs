//! Registry: the named collection of lists that acts as a symbol table.
//!
//! Lists live in an arena (`Vec`) and are addressed by [`ListId`]. The
//! "next list" link of a chain is simply the successor index. A name map
//! gives direct lookup; the first list registered under a name wins.

pub mod builtin;
pub mod global;

use crate::Result;
use crate::diagnostics;
use crate::list::consts::{COMMENT_START, LINE_DELIM, NAME_DELIM, PRIME_DELIM, split_records};
use crate::list::{DelimitedList, Entry, MergeOutcome};

use anyhow::Context;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Name of the list produced by [`Registry::to_delimited_list`].
pub const LIST_OF_LISTS: &str = "ListOfLists";

/// Position of a list in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ListId(pub usize);

/// Anything that can find a list by name.
pub trait ListLookup {
    fn list_by_name(&self, name: &str) -> Option<(ListId, &DelimitedList)>;
}

/// A (list, element) pair addressed by ordinals: `list` is the list's
/// ordinal in the registry export, `id` the element's ordinal in that list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ListItemRef {
    pub list: u32,
    pub id: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    lists: Vec<DelimitedList>,
    by_name: BTreeMap<String, ListId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register one list definition.
    ///
    /// Returns `None` when the text does not form a list or a list with the
    /// same name is already registered (the existing one is kept).
    pub fn add(&mut self, text: &str) -> Option<ListId> {
        self.add_list(DelimitedList::new(text))
    }

    /// Register every definition in order; returns the ids actually added.
    pub fn add_all<I, S>(&mut self, texts: I) -> Vec<ListId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts
            .into_iter()
            .filter_map(|t| self.add(t.as_ref()))
            .collect()
    }

    pub fn add_list(&mut self, list: DelimitedList) -> Option<ListId> {
        if !list.is_valid() {
            diagnostics::warn(format!("ignoring malformed list definition {:?}", list.raw()));
            return None;
        }
        if let Some(existing) = self.by_name.get(list.name()) {
            tracing::debug!(name = list.name(), existing = existing.0, "duplicate list name skipped");
            return None;
        }
        let id = ListId(self.lists.len());
        self.by_name.insert(list.name().to_string(), id);
        self.lists.push(list);
        Some(id)
    }

    /// Register several bodies as one Pack list under `name`.
    pub fn add_pack<S: AsRef<str>>(&mut self, name: &str, bodies: &[S]) -> Option<ListId> {
        self.add_list(DelimitedList::pack(name, bodies))
    }

    /// Register a pack from bulk text, one body per non-empty line.
    pub fn add_pack_text(&mut self, name: &str, text: &str) -> Option<ListId> {
        let bodies = split_records(text, &LINE_DELIM.to_string());
        self.add_pack(name, &bodies)
    }

    /// Register every non-empty, non-comment (`!`) line of a file.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<ListId>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| {
            diagnostics::error_message(format!("read list file {}", path.display()))
        })?;

        let mut added = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with(COMMENT_START) {
                continue;
            }
            match self.add(line) {
                Some(id) => added.push(id),
                None => {
                    tracing::debug!(path = %path.display(), line = lineno + 1, "line not registered")
                }
            }
        }
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn get(&self, id: ListId) -> Option<&DelimitedList> {
        self.lists.get(id.0)
    }

    pub fn id_of(&self, name: &str) -> Option<ListId> {
        self.by_name.get(name).copied()
    }

    pub fn list(&self, name: &str) -> Option<&DelimitedList> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn first(&self) -> Option<ListId> {
        (!self.lists.is_empty()).then_some(ListId(0))
    }

    /// The list registered right after `id`.
    pub fn successor(&self, id: ListId) -> Option<ListId> {
        let next = id.0 + 1;
        (next < self.lists.len()).then_some(ListId(next))
    }

    /// Registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ListId, &DelimitedList)> {
        self.lists.iter().enumerate().map(|(i, l)| (ListId(i), l))
    }

    /// Look up an element, resolving `@ListName` formats against this
    /// registry.
    pub fn entry(&self, list: &str, name: &str) -> Option<Entry<'_>> {
        self.list(list)?.by_name_with(name, Some(self))
    }

    /// Replace or delete an element of a registered list.
    pub fn update_list(&mut self, list: &str, entry: &Entry<'_>, delete: bool) -> bool {
        match self.id_of(list) {
            Some(id) => self.lists[id.0].update(entry, delete),
            None => false,
        }
    }

    /// Merge registered list `src` into registered list `dest`.
    pub fn merge_lists(&mut self, dest: &str, src: &str) -> Option<MergeOutcome> {
        let src = self.list(src)?.clone();
        let id = self.id_of(dest)?;
        Some(self.lists[id.0].merge(&src))
    }

    /// The registry as one list: `ListOfLists|Name1[:Desc1]|...|`.
    ///
    /// A list whose name holds `|` is left out; a description holding `|` is
    /// dropped. Either would shift every later ordinal.
    pub fn to_delimited_list(&self) -> DelimitedList {
        let mut text = String::from(LIST_OF_LISTS);
        text.push(PRIME_DELIM);
        for list in &self.lists {
            if list.name().contains(PRIME_DELIM) {
                diagnostics::warn(format!("list {:?} left out of {LIST_OF_LISTS}", list.name()));
                continue;
            }
            text.push_str(list.name());
            let desc = list.description();
            if desc.contains(PRIME_DELIM) {
                diagnostics::warn(format!(
                    "description of list {} left out of {LIST_OF_LISTS}: {desc:?}",
                    list.name()
                ));
            } else if !desc.is_empty() && desc != list.name() {
                text.push(NAME_DELIM);
                text.push_str(desc);
            }
            text.push(PRIME_DELIM);
        }
        DelimitedList::new(&text)
    }

    /// Render `Ct:ConnectType = SQL:SQLite` for a (list, element) pair.
    /// Anything unresolvable comes back prefixed with `@`.
    pub fn describe_item(&self, item: ListItemRef) -> String {
        let lists = self.to_delimited_list();
        let Some(list_entry) = lists.by_id(item.list) else {
            return format!("@Bad List #{}", item.list);
        };
        let Some(list) = self.list(list_entry.name()) else {
            return format!("@Cannot find list {}", list_entry.name());
        };

        let head = format!("{}{NAME_DELIM}{}", list_entry.name(), list_entry.description());
        match list.by_id(item.id) {
            Some(e) => format!("{head} = {}{NAME_DELIM}{}", e.name(), e.description()),
            None => format!("@{head} = Bad ID #{}", item.id),
        }
    }
}

impl ListLookup for Registry {
    fn list_by_name(&self, name: &str) -> Option<(ListId, &DelimitedList)> {
        let id = self.id_of(name)?;
        self.get(id).map(|l| (id, l))
    }
}
