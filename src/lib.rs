//! Delimited lists: a compact, self-describing text format for named,
//! ordinal-indexed constants, with typed format tags, a registry of named
//! lists and layout trees built from leveled lines of lists.

pub mod config;
pub mod diagnostics;
pub mod layout;
pub mod list;
pub mod model;
pub mod registry;
pub mod render;

pub type Result<T> = anyhow::Result<T>;

pub use config::Config;
pub use layout::{LayoutTree, Node, TileRef};
pub use list::{DelimitedList, Entry, FormatType, ListKind, Value, ValueFormat};
pub use registry::{ListId, ListItemRef, ListLookup, Registry};
