//! Text and JSON renderings of lists, registries and layout trees.

pub mod json;
pub mod text;

pub use json::render_json;
pub use text::{render_defines, render_list_dump, render_tree_text};
