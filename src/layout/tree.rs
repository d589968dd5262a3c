//! Layout tree: a flat, leveled sequence of lines linked into a tree.
//!
//! Nodes are numbered from 1 in input order (comments excluded). Relations
//! are node numbers with 0 meaning "none", so the tree is an arena with
//! integer edges:
//!
//! ```text
//! 1 Full            parent=0 first=2 last=5
//! 2  Top            parent=1 next=5  first=3 last=4
//! 3   Left          parent=2 next=4
//! 4   Right         parent=2 prev=3
//! 5  Bottom         parent=1 prev=2
//! ```

use crate::Result;
use crate::diagnostics;
use crate::layout::line::{TileRef, is_comment, split_level};
use crate::list::DelimitedList;
use crate::list::consts::LINE_DELIM;

use anyhow::Context;
use std::fs;
use std::path::Path;

/// 1-based node number; [`NO_NODE`] is the sentinel.
pub type NodeIndex = usize;

pub const NO_NODE: NodeIndex = 0;

#[derive(Debug, Clone)]
pub struct Node {
    pub index: NodeIndex,
    pub level: u32,
    pub list: DelimitedList,
    pub tile_ref: Option<TileRef>,
    pub parent: NodeIndex,
    pub prev: NodeIndex,
    pub next: NodeIndex,
    pub first: NodeIndex,
    pub last: NodeIndex,
}

fn some(i: NodeIndex) -> Option<NodeIndex> {
    (i != NO_NODE).then_some(i)
}

impl Node {
    fn parse(index: NodeIndex, line: &str) -> Self {
        let (level, body) = split_level(line);
        let list = DelimitedList::new(body);

        let tile_ref = if list.is_valid() {
            body.find(list.delimiter())
                .and_then(|pos| TileRef::parse(&body[..pos]))
        } else {
            diagnostics::warn(format!("layout line {index} has no list body: {line:?}"));
            None
        };

        Self {
            index,
            level,
            list,
            tile_ref,
            parent: NO_NODE,
            prev: NO_NODE,
            next: NO_NODE,
            first: NO_NODE,
            last: index,
        }
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        some(self.parent)
    }

    pub fn prev(&self) -> Option<NodeIndex> {
        some(self.prev)
    }

    pub fn next(&self) -> Option<NodeIndex> {
        some(self.next)
    }

    pub fn first_child(&self) -> Option<NodeIndex> {
        some(self.first)
    }

    /// Last node of this node's subtree (itself when it has none).
    pub fn last_descendant(&self) -> NodeIndex {
        self.last
    }

    /// Node count of the subtree rooted here, itself included.
    pub fn subtree_size(&self) -> usize {
        self.last + 1 - self.index
    }

    /// Nested sub-list by header name, e.g. `a` attributes or `s` styles.
    pub fn sublist(&self, name: &str) -> Option<&DelimitedList> {
        self.list.child(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LayoutTree {
    // nodes[i - 1] is node i.
    nodes: Vec<Node>,
}

impl LayoutTree {
    /// Build and link a tree. Comment (`!`) and blank lines are skipped.
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut nodes = Vec::new();
        for line in lines {
            let line = line.as_ref();
            let line = line.strip_suffix('\r').unwrap_or(line);
            if is_comment(line) || line.trim().is_empty() {
                continue;
            }
            nodes.push(Node::parse(nodes.len() + 1, line));
        }

        let mut tree = Self { nodes };
        tree.link();
        tree
    }

    /// Split bulk text on the line delimiter, then [`parse`](Self::parse).
    pub fn from_text(text: &str) -> Self {
        Self::parse(text.split(LINE_DELIM))
    }

    /// Read and parse a layout file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| {
            diagnostics::error_message(format!("read layout file {}", path.display()))
        })?;
        let tree = Self::from_text(&text);
        tracing::debug!(path = %path.display(), nodes = tree.len(), "layout loaded");
        Ok(tree)
    }

    // One backward and one forward scan per node.
    fn link(&mut self) {
        let levels: Vec<i64> = self.nodes.iter().map(|n| i64::from(n.level)).collect();
        let level = |i: NodeIndex| levels[i - 1];
        let count = self.nodes.len();

        for i in 1..=count {
            let mine = level(i);
            let (mut parent, mut prev, mut next, mut first) = (NO_NODE, NO_NODE, NO_NODE, NO_NODE);
            let mut last = i;

            for j in (1..i).rev() {
                let lev = level(j);
                if lev < mine - 1 {
                    break;
                }
                if lev == mine - 1 {
                    parent = j;
                    break;
                }
                if lev == mine && prev == NO_NODE {
                    prev = j;
                }
            }

            for k in i + 1..=count {
                let lev = level(k);
                if lev < mine {
                    break;
                }
                if lev == mine {
                    next = k;
                    break;
                }
                last = k;
                if lev == mine + 1 && first == NO_NODE {
                    first = k;
                }
            }

            let node = &mut self.nodes[i - 1];
            node.parent = parent;
            node.prev = prev;
            node.next = next;
            node.first = first;
            node.last = last;
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node `index` (1-based).
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        index.checked_sub(1).and_then(|i| self.nodes.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Direct children of `index`, following the first-child/next-sibling
    /// links.
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut cur = self.node(index).map_or(NO_NODE, |n| n.first);
        while let Some(node) = self.node(cur) {
            out.push(cur);
            cur = node.next;
        }
        out
    }

    /// Nodes without a parent, in input order.
    pub fn roots(&self) -> Vec<NodeIndex> {
        self.nodes
            .iter()
            .filter(|n| n.parent == NO_NODE)
            .map(|n| n.index)
            .collect()
    }

    /// First node whose tile ref is named `name`.
    pub fn find(&self, name: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| n.tile_ref.as_ref().is_some_and(|t| t.name == name))
    }
}
