//! Engine response reshaping: hits to list items, buckets to facets.

use serde_json::{Map, Value};

use quaero_query::merge_script_fields;

use crate::models::{FacetBucket, Facets};

/// Convert raw engine hits into list items.
///
/// Hits carrying scripted fields are merged via the truncation strategy;
/// plain hits pass their `_source` through with the cross-reference array
/// truncated in-process and per-type counts computed over the full array.
pub fn parse_hits(hits: &[Value], db_xrefs_limit: usize) -> Vec<Value> {
    hits.iter()
        .map(|hit| {
            if hit.get("fields").is_some() {
                merge_script_fields(hit)
            } else {
                let mut source = hit
                    .get("_source")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                truncate_db_xrefs(&mut source, db_xrefs_limit);
                Value::Object(source)
            }
        })
        .collect()
}

/// Truncate `dbXrefs` to `limit` elements and add `dbXrefsCount`.
///
/// Counts cover the full untruncated array, keyed by each element's `type`
/// tag (`unknown` when untagged); documents without a cross-reference array
/// are left untouched.
pub fn truncate_db_xrefs(source: &mut Map<String, Value>, limit: usize) {
    let Some(xrefs) = source.get("dbXrefs").and_then(Value::as_array) else {
        return;
    };

    let mut counts: Map<String, Value> = Map::new();
    for xref in xrefs {
        let tag = xref
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let count = counts.get(tag).and_then(Value::as_u64).unwrap_or(0);
        counts.insert(tag.to_string(), Value::from(count + 1));
    }

    let truncated: Vec<Value> = xrefs.iter().take(limit).cloned().collect();
    source.insert("dbXrefs".to_string(), Value::Array(truncated));
    source.insert("dbXrefsCount".to_string(), Value::Object(counts));
}

/// Convert engine aggregation buckets into the facet schema.
///
/// Missing aggregations fall back to empty lists; `type` is present only
/// for cross-type scopes, `objectType` only for the bioproject scope.
pub fn parse_facets(aggregations: &Value, is_cross_type: bool, db_type: Option<&str>) -> Facets {
    let buckets = |name: &str| -> Vec<FacetBucket> {
        aggregations
            .get(name)
            .and_then(|agg| agg.get("buckets"))
            .and_then(Value::as_array)
            .map(|buckets| {
                buckets
                    .iter()
                    .map(|bucket| FacetBucket {
                        value: match bucket.get("key") {
                            Some(Value::String(key)) => key.clone(),
                            Some(other) => other.to_string(),
                            None => String::new(),
                        },
                        count: bucket.get("doc_count").and_then(Value::as_u64).unwrap_or(0),
                    })
                    .collect()
            })
            .unwrap_or_default()
    };

    Facets {
        db_type: is_cross_type.then(|| buckets("type")),
        organism: buckets("organism"),
        status: buckets("status"),
        accessibility: buckets("accessibility"),
        object_type: (db_type == Some("bioproject")).then(|| buckets("objectType")),
    }
}
