//! Sort clause construction.

use serde_json::{json, Map, Value};

use crate::error::{QueryError, Result};

/// API sort field name → engine field name.
const SORT_FIELD_MAP: [(&str, &str); 2] = [
    ("datePublished", "datePublished"),
    ("dateModified", "dateModified"),
];

const VALID_DIRECTIONS: [&str; 2] = ["asc", "desc"];

fn allowed_sort_fields() -> String {
    let mut fields: Vec<&str> = SORT_FIELD_MAP.iter().map(|(api, _)| *api).collect();
    fields.sort_unstable();
    fields.join(", ")
}

/// Convert a `{field}:{direction}` sort string to an engine sort list.
///
/// `None` yields `None`: the engine's default relevance ordering applies.
pub fn build_sort(sort_param: Option<&str>) -> Result<Option<Value>> {
    let Some(raw) = sort_param else {
        return Ok(None);
    };

    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() != 2 {
        return Err(QueryError::InvalidSortFormat {
            value: raw.to_string(),
        });
    }

    let (field, direction) = (parts[0], parts[1]);
    let Some((_, engine_field)) = SORT_FIELD_MAP.iter().find(|(api, _)| *api == field) else {
        return Err(QueryError::InvalidSortField {
            field: field.to_string(),
            allowed: allowed_sort_fields(),
        });
    };
    if !VALID_DIRECTIONS.contains(&direction) {
        return Err(QueryError::InvalidSortDirection {
            direction: direction.to_string(),
        });
    }

    let mut clause = Map::new();
    clause.insert(engine_field.to_string(), json!({ "order": direction }));

    Ok(Some(Value::Array(vec![Value::Object(clause)])))
}
