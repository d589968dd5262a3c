use crate::Result;
use serde::Serialize;

/// Serialize any view from [`crate::model`]. Non-finite numbers come out as
/// `null`.
pub fn render_json<T: Serialize>(view: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(view)?
    } else {
        serde_json::to_string(view)?
    };
    Ok(json)
}
