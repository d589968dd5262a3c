//! Serializable views over lists, registries and layout trees.
//!
//! These are what the renderers and UI collaborators consume; nothing here
//! mutates the core types.

use crate::layout::{LayoutTree, Node, NodeIndex};
use crate::list::{DelimitedList, Entry, FormatType, ListKind, Value, ValueFormat};
use crate::registry::{ListId, ListLookup, Registry};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FormatView {
    pub format_type: Option<FormatType>,
    pub tag: String,
    pub size_limit: Option<u32>,
    pub literal: Option<String>,
    pub member_list: Option<String>,
    pub value: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub numeric_values: Vec<f64>,
    pub format: Option<FormatView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub name: String,
    pub description: String,
    pub delimiter: String,
    pub kind: ListKind,
    pub ordinal_count: usize,
    /// Ordinals held by a reference list.
    pub ids: Vec<u32>,
    pub entries: Vec<EntryView>,
    pub children: Vec<ListView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListSummary {
    pub id: ListId,
    /// Ordinal in the `ListOfLists` export.
    pub ordinal: u32,
    pub name: String,
    pub description: String,
    pub kind: ListKind,
    pub ordinal_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistryView {
    pub list_of_lists: String,
    pub lists: Vec<ListSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub index: NodeIndex,
    pub level: u32,
    pub tile_ref: Option<String>,
    pub list: String,
    pub parent: NodeIndex,
    pub prev: NodeIndex,
    pub next: NodeIndex,
    pub first: NodeIndex,
    pub last: NodeIndex,
    pub subtree_size: usize,
    pub sublists: Vec<ListView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeView {
    pub roots: Vec<NodeIndex>,
    pub nodes: Vec<NodeView>,
}

/// One row of a selection widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub text: String,
    pub value: String,
}

pub fn format_view(fmt: &ValueFormat) -> FormatView {
    FormatView {
        format_type: fmt.format_type(),
        tag: fmt.to_tag(),
        size_limit: fmt.size_limit(),
        literal: fmt.literal().map(str::to_string),
        member_list: fmt.member_list_name().map(str::to_string),
        value: fmt.value().clone(),
    }
}

pub fn entry_view(entry: &Entry<'_>) -> EntryView {
    EntryView {
        id: entry.id(),
        name: entry.name().to_string(),
        description: entry.description().to_string(),
        numeric_values: entry.numeric_values().to_vec(),
        format: entry.format().map(format_view),
    }
}

/// View of a list and its nested sub-lists. `lists` resolves `@ListName`
/// member formats.
pub fn list_view(list: &DelimitedList, lists: Option<&dyn ListLookup>) -> ListView {
    let entries = (1..=list.ordinal_count() as u32)
        .filter_map(|id| list.by_name_with(list.name_of(id), lists))
        .map(|e| entry_view(&e))
        .collect();

    ListView {
        name: list.name().to_string(),
        description: list.description().to_string(),
        delimiter: list.delimiter().escape_default().to_string(),
        kind: list.kind(),
        ordinal_count: list.ordinal_count(),
        ids: list.ids().to_vec(),
        entries,
        children: list.children().iter().map(|c| list_view(c, lists)).collect(),
    }
}

pub fn registry_view(registry: &Registry) -> RegistryView {
    let lol = registry.to_delimited_list();
    let lists = registry
        .iter()
        .map(|(id, list)| ListSummary {
            id,
            ordinal: lol.id_of(list.name()),
            name: list.name().to_string(),
            description: list.description().to_string(),
            kind: list.kind(),
            ordinal_count: list.ordinal_count(),
        })
        .collect();

    RegistryView {
        list_of_lists: lol.raw().to_string(),
        lists,
    }
}

fn node_view(node: &Node) -> NodeView {
    NodeView {
        index: node.index,
        level: node.level,
        tile_ref: node.tile_ref.as_ref().map(ToString::to_string),
        list: node.list.raw().to_string(),
        parent: node.parent,
        prev: node.prev,
        next: node.next,
        first: node.first,
        last: node.last,
        subtree_size: node.subtree_size(),
        sublists: node.list.children().iter().map(|c| list_view(c, None)).collect(),
    }
}

pub fn tree_view(tree: &LayoutTree) -> TreeView {
    TreeView {
        roots: tree.roots(),
        nodes: tree.iter().map(node_view).collect(),
    }
}

/// Rows sorted by description; the value carries `[fmt]Name:ID`.
pub fn list_select_options(list: &DelimitedList) -> Vec<SelectOption> {
    list.sorted_entries()
        .iter()
        .map(|e| SelectOption {
            text: e.description().to_string(),
            value: e.to_extra_string(),
        })
        .collect()
}

/// One row per node: the tile ref indented by `indent_width` dashes per
/// level, valued `N<index>`.
pub fn tree_select_options(tree: &LayoutTree, indent_width: usize) -> Vec<SelectOption> {
    tree.iter()
        .map(|node| {
            let tile = node.tile_ref.as_ref().map(ToString::to_string).unwrap_or_default();
            SelectOption {
                text: format!(
                    "{}{}.{tile}",
                    "-".repeat(node.level as usize * indent_width),
                    node.index
                ),
                value: format!("N{}", node.index),
            }
        })
        .collect()
}
