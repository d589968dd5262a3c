use crate::layout::LayoutTree;
use crate::list::DelimitedList;
use crate::registry::Registry;
use std::fmt::Write as _;

/// One line per node: the list text, then its links.
///
/// ```text
/// T<TAB>a|name:Top|<TAB>    2.level=1 parent=1 prev=0 next=5 first=3 last=4 #=3 TileID=T
/// ```
pub fn render_tree_text(tree: &LayoutTree) -> String {
    let mut out = String::new();
    for node in tree.iter() {
        let tile = node
            .tile_ref
            .as_ref()
            .map_or_else(|| "NONE".to_string(), ToString::to_string);
        let _ = writeln!(
            out,
            "{}\t{}.level={} parent={} prev={} next={} first={} last={} #={} TileID={}",
            if node.list.is_valid() { node.list.raw() } else { "@NOLIST@" },
            node.index,
            node.level,
            node.parent,
            node.prev,
            node.next,
            node.first,
            node.last,
            node.subtree_size(),
            tile,
        );
    }
    out
}

/// A list, its entries sorted by description, and its nested sub-lists
/// indented below it.
pub fn render_list_dump(list: &DelimitedList) -> String {
    let mut out = String::new();
    dump_into(&mut out, list, 0);
    out
}

fn dump_into(out: &mut String, list: &DelimitedList, depth: usize) {
    let pad = "  ".repeat(depth);
    let _ = writeln!(
        out,
        "{pad}List {}({})\t{}",
        list.name(),
        list.description(),
        list.raw().escape_default()
    );
    let prefix = format!("{}.", list.name());
    for entry in list.sorted_entries() {
        let tag = entry.format().map(|f| f.to_tag()).unwrap_or_default();
        let _ = writeln!(
            out,
            "{pad}  {}\t{tag}\t{}\t{}",
            entry.name(),
            entry.description(),
            entry.to_declaration(&prefix)
        );
    }
    let _ = writeln!(out, "{pad}NameList={}\t{}", list.name_index(), list.ordinal_count());
    for child in list.children() {
        dump_into(out, child, depth + 1);
    }
}

/// Rust constants naming every element's ordinal, one block per registered
/// list, entries sorted by description.
pub fn render_defines(registry: &Registry) -> String {
    let mut out = String::from("// Defines for registered lists.\n");
    for (_, list) in registry.iter() {
        let _ = writeln!(
            out,
            "\n// {}:{} = {:?}",
            list.name(),
            list.description(),
            list.raw()
        );
        let mut formats = String::new();
        for entry in list.sorted_entries() {
            let _ = writeln!(
                out,
                "pub const {}_{}: u32 = {};",
                const_ident(list.name()),
                const_ident(entry.name()),
                entry.id()
            );
            if let Some(fmt) = entry.format() {
                let _ = write!(formats, "//\t{} {}", entry.name(), fmt.to_tag());
                if let Some(err) = fmt.error() {
                    let _ = write!(formats, " error={err:?}");
                }
                formats.push('\n');
            }
        }
        out.push_str(&formats);
    }
    out
}

// SCREAMING_SNAKE identifier; anything else becomes '_'.
fn const_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}
