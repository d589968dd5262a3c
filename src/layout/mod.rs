//! Layout trees built from leveled lines of delimited lists.

pub mod line;
pub mod tree;

pub use line::{COMMENT_START, TileRef};
pub use tree::{LayoutTree, NO_NODE, Node, NodeIndex};
