//! The delimited-list format: grammar, typed values, entries and lists.

pub mod consts;
pub mod delimited;
pub mod entry;
pub mod format;

pub use delimited::{DelimitedList, ListKind, MergeOutcome};
pub use entry::Entry;
pub use format::{FormatType, Value, ValueData, ValueFormat};
