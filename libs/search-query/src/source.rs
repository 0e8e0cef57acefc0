//! `_source` inclusion/exclusion selection.

use serde_json::{json, Value};

/// Build the engine `_source` parameter from `fields`/`includeProperties`.
///
/// An explicit field list takes precedence over `includeProperties`. With
/// no field list and `includeProperties=false`, the `properties` blob is
/// excluded. `None` means all fields.
pub fn build_source_filter(fields: Option<&str>, include_properties: bool) -> Option<Value> {
    if let Some(raw) = fields {
        let parsed: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();
        return Some(json!(parsed));
    }

    if !include_properties {
        return Some(json!({ "excludes": ["properties"] }));
    }

    None
}
