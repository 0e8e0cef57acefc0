//! Scripted-field strategy for cross-reference truncation and counting.
//!
//! A single-entry detail lookup never transfers the full `dbXrefs` array
//! (which can run to hundreds of entries). The document is fetched with
//! `_source.excludes: ["dbXrefs"]` and two engine-side scripted fields: the
//! first `limit` elements of the array, and a per-type occurrence count over
//! the whole array. The merge step folds both back into the document.

use serde_json::{json, Map, Value};

const TRUNCATE_SCRIPT: &str = "def xrefs = params._source.containsKey('dbXrefs')\
 ? params._source.dbXrefs : [];\
 if (xrefs == null) { return []; }\
 int limit = params.limit;\
 if (limit >= xrefs.size()) { return xrefs; }\
 List result = new ArrayList();\
 for (int i = 0; i < limit; i++)\
 { result.add(xrefs.get(i)); }\
 return result;";

const COUNT_SCRIPT: &str = "def xrefs = params._source.containsKey('dbXrefs')\
 ? params._source.dbXrefs : [];\
 if (xrefs == null) { return [:]; }\
 Map counts = new HashMap();\
 for (def x : xrefs) {\
   String t = x.containsKey('type')\
     ? x['type'] : 'unknown';\
   counts.put(t,\
     counts.containsKey(t)\
       ? counts.get(t) + 1 : 1);\
 }\
 return counts;";

/// Build the `script_fields` spec for dbXrefs truncation and counting.
pub fn build_db_xrefs_script_fields(limit: usize) -> Value {
    json!({
        "dbXrefsTruncated": {
            "script": {
                "lang": "painless",
                "source": TRUNCATE_SCRIPT,
                "params": { "limit": limit },
            },
        },
        "dbXrefsCountByType": {
            "script": {
                "lang": "painless",
                "source": COUNT_SCRIPT,
            },
        },
    })
}

/// Build the full single-entry detail request body.
///
/// `_source` always excludes the raw array; the scripted fields carry the
/// truncated view and the counts instead.
pub fn detail_search_body(id: &str, limit: usize) -> Value {
    json!({
        "query": { "term": { "_id": id } },
        "size": 1,
        "_source": { "excludes": ["dbXrefs"] },
        "script_fields": build_db_xrefs_script_fields(limit),
    })
}

/// Merge a hit's scripted fields back into its `_source`.
///
/// The engine wraps each scripted value in a single-element array;
/// `dbXrefsTruncated` lands under `dbXrefs`, `dbXrefsCountByType` under
/// `dbXrefsCount`. Missing fields default to an empty list / map.
pub fn merge_script_fields(hit: &Value) -> Value {
    let mut source: Map<String, Value> = hit
        .get("_source")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let fields = hit.get("fields");
    let unwrap_first = |name: &str, default: Value| -> Value {
        fields
            .and_then(|f| f.get(name))
            .and_then(|v| v.get(0))
            .cloned()
            .unwrap_or(default)
    };

    source.insert(
        "dbXrefs".to_string(),
        unwrap_first("dbXrefsTruncated", json!([])),
    );
    source.insert(
        "dbXrefsCount".to_string(),
        unwrap_first("dbXrefsCountByType", json!({})),
    );

    Value::Object(source)
}
