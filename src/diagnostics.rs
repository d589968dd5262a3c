//! Uniform wording for warnings and error contexts.

use std::fmt::Display;

/// Prefix an error context so messages read the same across the crate.
pub fn error_message(msg: impl Display) -> String {
    format!("dlist: {msg}")
}

/// Report a degraded-but-usable condition.
pub fn warn(msg: impl Display) {
    tracing::warn!("{msg}");
}
