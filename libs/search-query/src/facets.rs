//! Facet aggregation specs.

use serde_json::{json, Map, Value};

/// Fixed bucket cap per aggregation, bounding response size.
pub const FACET_AGG_SIZE: u32 = 50;

fn terms_agg(field: &str) -> Value {
    json!({ "terms": { "field": field, "size": FACET_AGG_SIZE } })
}

/// Build the aggregation spec for facet counts.
///
/// The three common facets are always requested; `type` only for cross-type
/// searches, `objectType` only for the bioproject scope.
pub fn build_facet_aggs(is_cross_type: bool, db_type: Option<&str>) -> Value {
    let mut aggs = Map::new();
    aggs.insert("organism".to_string(), terms_agg("organism.name"));
    aggs.insert("status".to_string(), terms_agg("status"));
    aggs.insert("accessibility".to_string(), terms_agg("accessibility"));

    if is_cross_type {
        aggs.insert("type".to_string(), terms_agg("type"));
    }
    if db_type == Some("bioproject") {
        aggs.insert("objectType".to_string(), terms_agg("objectType"));
    }

    Value::Object(aggs)
}
